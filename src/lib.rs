#![no_std]

extern crate alloc;
#[cfg(test)] extern crate std;

#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

pub mod cache;
pub mod codec;
pub mod distance;
pub mod error;
pub mod jsf;
pub mod jump;
pub mod lcg;
pub mod lxm;
pub mod mix;
pub mod msws;
pub mod pcg;
pub mod philox;
pub mod provider;
pub mod seed;
pub mod sfc;
pub mod splitmix;
pub mod wide;
pub mod word;
pub mod xoroshiro64;
pub mod xoroshiro128;
pub mod xoroshiro1024;
pub mod xorshift1024;
pub mod xoshiro128;
pub mod xoshiro256;
pub mod xoshiro512;

pub use error::*;
pub use jsf::*;
pub use lxm::*;
pub use msws::*;
pub use pcg::*;
pub use philox::*;
pub use provider::*;
pub use seed::{SeedBytes, SeedableCore};
pub use sfc::*;
pub use splitmix::*;
pub use xoroshiro64::*;
pub use xoroshiro128::*;
pub use xoroshiro1024::*;
pub use xorshift1024::*;
pub use xoshiro128::*;
pub use xoshiro256::*;
pub use xoshiro512::*;
pub use rand_core::*;

/// 2^64 divided by the golden ratio, rounded to an odd number.
pub const GOLDEN_RATIO_64: u64 = 0x9e3779b97f4a7c15;

/// 2^32 divided by the golden ratio, rounded to an odd number.
pub const GOLDEN_RATIO_32: u32 = 0x9e3779b9;

// Output scramblers. Each generator family implements its own scrambler trait for the
// markers it supports, so the marker selects the output function at compile time.

/// Sum of two state words.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plus;

/// Rotated sum of two state words plus one of them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlusPlus;

/// One state word times a constant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Star;

/// A state word multiplied, rotated and multiplied again.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StarStar;

/// One state word times the golden ratio constant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StarPhi;

/// Doug Lea's 64-bit mixer, the LXM default.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Mix;
