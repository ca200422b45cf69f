use alloc::vec::Vec;
use core::marker::PhantomData;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::jump::{xor_jump, XorJump};
use super::provider::{JumpAhead, LongJumpAhead, Provider64, Source64};
use super::seed::{extend_seed64, SeedBytes, SeedableCore};
use super::{Plus, PlusPlus, StarStar};

/// Output function and update constants of a xoroshiro128 generator.
pub trait Xoroshiro128Scrambler {
    const NAME: &'static str;
    /// Rotation, shift and rotation of the state update.
    const ABC: (u32, u32, u32) = (24, 16, 37);
    /// Jump polynomial for 2^64 steps.
    const JUMP: [u64; 2] = [0xdf900294d8f554a5, 0x170865df4b3201fc];
    /// Jump polynomial for 2^96 steps.
    const LONG_JUMP: [u64; 2] = [0xd2a98b26625eee7b, 0xdddf9b1090aa7ac1];

    fn scramble(s0: u64, s1: u64) -> u64;
}

impl Xoroshiro128Scrambler for Plus {
    const NAME: &'static str = "Xoroshiro128Plus";

    #[wrappit]
    #[inline]
    fn scramble(s0: u64, s1: u64) -> u64 {
        s0 + s1
    }
}

impl Xoroshiro128Scrambler for StarStar {
    const NAME: &'static str = "Xoroshiro128StarStar";

    #[wrappit]
    #[inline]
    fn scramble(s0: u64, _s1: u64) -> u64 {
        (s0 * 5).rotate_left(7) * 9
    }
}

impl Xoroshiro128Scrambler for PlusPlus {
    const NAME: &'static str = "Xoroshiro128PlusPlus";
    const ABC: (u32, u32, u32) = (49, 21, 28);
    const JUMP: [u64; 2] = [0x2bd7a6a6e99c2ddc, 0x0992ccaf6a6fca05];
    const LONG_JUMP: [u64; 2] = [0x360fd5f2cf8d5d99, 0x9c6e6877736c46e3];

    #[wrappit]
    #[inline]
    fn scramble(s0: u64, s1: u64) -> u64 {
        (s0 + s1).rotate_left(17) + s0
    }
}

/// Xoroshiro128 core: 128 bits of state, period 2^128 - 1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xoroshiro128Core<S> {
    s0: u64,
    s1: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    scrambler: PhantomData<S>,
}

pub type Xoroshiro128Plus = Provider64<Xoroshiro128Core<Plus>>;
pub type Xoroshiro128StarStar = Provider64<Xoroshiro128Core<StarStar>>;
pub type Xoroshiro128PlusPlus = Provider64<Xoroshiro128Core<PlusPlus>>;

/// The xoroshiro128 state update with rotation `a`, shift `b` and rotation `c`.
#[inline]
pub fn xoroshiro128_step(s0: u64, s1: u64, (a, b, c): (u32, u32, u32)) -> (u64, u64) {
    let s1 = s1 ^ s0;
    (s0.rotate_left(a) ^ s1 ^ (s1 << b), s1.rotate_left(c))
}

impl<S: Xoroshiro128Scrambler> Xoroshiro128Core<S> {
    pub fn new(s0: u64, s1: u64) -> Self {
        Xoroshiro128Core { s0, s1, scrambler: PhantomData }
    }

    #[inline]
    fn step(&mut self) {
        let (s0, s1) = xoroshiro128_step(self.s0, self.s1, S::ABC);
        self.s0 = s0;
        self.s1 = s1;
    }
}

impl<S: Xoroshiro128Scrambler> Source64 for Xoroshiro128Core<S> {
    const NAME: &'static str = S::NAME;

    #[inline]
    fn next(&mut self) -> u64 {
        let result = S::scramble(self.s0, self.s1);
        self.step();
        result
    }
}

impl<S: Xoroshiro128Scrambler> XorJump for Xoroshiro128Core<S> {
    type Word = u64;
    const WORDS: usize = 2;

    fn cycle(&mut self) {
        self.step();
    }

    fn word(&self, i: usize) -> u64 {
        if i == 0 { self.s0 } else { self.s1 }
    }

    fn set_words(&mut self, words: &[u64]) {
        self.s0 = words[0];
        self.s1 = words[1];
    }
}

impl<S: Xoroshiro128Scrambler> JumpAhead for Xoroshiro128Core<S> {
    fn jump_ahead(&mut self) {
        xor_jump(self, &S::JUMP);
    }
}

impl<S: Xoroshiro128Scrambler> LongJumpAhead for Xoroshiro128Core<S> {
    fn long_jump_ahead(&mut self) {
        xor_jump(self, &S::LONG_JUMP);
    }
}

impl<S: Xoroshiro128Scrambler> SeedableCore for Xoroshiro128Core<S> {
    type Word = u64;
    type Seed = SeedBytes<16>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, 2);
        Self::new(s[0], s[1])
    }
}

impl<S> StateCodec for Xoroshiro128Core<S> {
    const STATE_SIZE: usize = 16;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.s0, self.s1]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [s0, s1] = read_words::<u64, 2>(bytes)?;
        self.s0 = s0;
        self.s1 = s1;
        Ok(())
    }
}
