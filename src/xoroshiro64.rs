use alloc::vec::Vec;
use core::marker::PhantomData;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::provider::{Provider32, Source32};
use super::seed::{extend_seed32, SeedBytes, SeedableCore};
use super::{Star, StarStar};

/// Output function of a xoroshiro64 generator.
pub trait Xoroshiro64Scrambler {
    const NAME: &'static str;
    fn scramble(s0: u32) -> u32;
}

impl Xoroshiro64Scrambler for Star {
    const NAME: &'static str = "Xoroshiro64Star";

    #[wrappit]
    #[inline]
    fn scramble(s0: u32) -> u32 {
        s0 * 0x9e3779bb
    }
}

impl Xoroshiro64Scrambler for StarStar {
    const NAME: &'static str = "Xoroshiro64StarStar";

    #[wrappit]
    #[inline]
    fn scramble(s0: u32) -> u32 {
        (s0 * 0x9e3779bb).rotate_left(5) * 5
    }
}

/// Xoroshiro64 core: 64 bits of state, period 2^64 - 1, 32-bit output.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xoroshiro64Core<S> {
    s0: u32,
    s1: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    scrambler: PhantomData<S>,
}

pub type Xoroshiro64Star = Provider32<Xoroshiro64Core<Star>>;
pub type Xoroshiro64StarStar = Provider32<Xoroshiro64Core<StarStar>>;

/// The xoroshiro64 state update with rotations (26, 13) and shift 9.
/// Shared with the XBG half of the 32-bit LXM generator.
#[inline]
pub fn xoroshiro64_step(s0: u32, s1: u32) -> (u32, u32) {
    let s1 = s1 ^ s0;
    (s0.rotate_left(26) ^ s1 ^ (s1 << 9), s1.rotate_left(13))
}

impl<S: Xoroshiro64Scrambler> Xoroshiro64Core<S> {
    pub fn new(s0: u32, s1: u32) -> Self {
        Xoroshiro64Core { s0, s1, scrambler: PhantomData }
    }
}

impl<S: Xoroshiro64Scrambler> Source32 for Xoroshiro64Core<S> {
    const NAME: &'static str = S::NAME;

    #[inline]
    fn next(&mut self) -> u32 {
        let result = S::scramble(self.s0);
        let (s0, s1) = xoroshiro64_step(self.s0, self.s1);
        self.s0 = s0;
        self.s1 = s1;
        result
    }
}

impl<S: Xoroshiro64Scrambler> SeedableCore for Xoroshiro64Core<S> {
    type Word = u32;
    type Seed = SeedBytes<8>;

    fn from_seed_words(seed: &[u32]) -> Self {
        let s = extend_seed32(seed, 2);
        Self::new(s[0], s[1])
    }
}

impl<S> StateCodec for Xoroshiro64Core<S> {
    const STATE_SIZE: usize = 8;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.s0, self.s1]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [s0, s1] = read_words::<u32, 2>(bytes)?;
        self.s0 = s0;
        self.s1 = s1;
        Ok(())
    }
}
