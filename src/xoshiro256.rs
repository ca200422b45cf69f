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

/// Jump polynomial for 2^128 steps.
const JUMP: [u64; 4] = [0x180ec6d33cfd0aba, 0xd5a61266f0c9392c, 0xa9582618e03fc9aa, 0x39abdc4529b1661c];
/// Jump polynomial for 2^192 steps.
const LONG_JUMP: [u64; 4] = [0x76e15d3efefdcbbf, 0xc5004e441c522fb3, 0x77710069854ee241, 0x39109bb02acbe635];

/// Output function of a xoshiro256 generator.
pub trait Xoshiro256Scrambler {
    const NAME: &'static str;
    fn scramble(s: &[u64; 4]) -> u64;
}

impl Xoshiro256Scrambler for Plus {
    const NAME: &'static str = "Xoshiro256Plus";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u64; 4]) -> u64 {
        s[0] + s[3]
    }
}

impl Xoshiro256Scrambler for PlusPlus {
    const NAME: &'static str = "Xoshiro256PlusPlus";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u64; 4]) -> u64 {
        (s[0] + s[3]).rotate_left(23) + s[0]
    }
}

impl Xoshiro256Scrambler for StarStar {
    const NAME: &'static str = "Xoshiro256StarStar";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u64; 4]) -> u64 {
        (s[1] * 5).rotate_left(7) * 9
    }
}

/// Xoshiro256 core: 256 bits of state, period 2^256 - 1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xoshiro256Core<S> {
    s: [u64; 4],
    #[cfg_attr(feature = "serde", serde(skip))]
    scrambler: PhantomData<S>,
}

pub type Xoshiro256Plus = Provider64<Xoshiro256Core<Plus>>;
pub type Xoshiro256PlusPlus = Provider64<Xoshiro256Core<PlusPlus>>;
pub type Xoshiro256StarStar = Provider64<Xoshiro256Core<StarStar>>;

/// The xoshiro256 state update, shift 17 and rotation 45.
#[inline]
pub fn xoshiro256_step(s: &mut [u64; 4]) {
    let t = s[1] << 17;
    s[2] ^= s[0];
    s[3] ^= s[1];
    s[1] ^= s[2];
    s[0] ^= s[3];
    s[2] ^= t;
    s[3] = s[3].rotate_left(45);
}

impl<S: Xoshiro256Scrambler> Xoshiro256Core<S> {
    pub fn new(s: [u64; 4]) -> Self {
        Xoshiro256Core { s, scrambler: PhantomData }
    }

    #[inline]
    fn step(&mut self) {
        xoshiro256_step(&mut self.s);
    }
}

impl<S: Xoshiro256Scrambler> Source64 for Xoshiro256Core<S> {
    const NAME: &'static str = S::NAME;

    #[inline]
    fn next(&mut self) -> u64 {
        let result = S::scramble(&self.s);
        self.step();
        result
    }
}

impl<S: Xoshiro256Scrambler> XorJump for Xoshiro256Core<S> {
    type Word = u64;
    const WORDS: usize = 4;

    fn cycle(&mut self) {
        self.step();
    }

    fn word(&self, i: usize) -> u64 {
        self.s[i]
    }

    fn set_words(&mut self, words: &[u64]) {
        self.s.copy_from_slice(words);
    }
}

impl<S: Xoshiro256Scrambler> JumpAhead for Xoshiro256Core<S> {
    fn jump_ahead(&mut self) {
        xor_jump(self, &JUMP);
    }
}

impl<S: Xoshiro256Scrambler> LongJumpAhead for Xoshiro256Core<S> {
    fn long_jump_ahead(&mut self) {
        xor_jump(self, &LONG_JUMP);
    }
}

impl<S: Xoshiro256Scrambler> SeedableCore for Xoshiro256Core<S> {
    type Word = u64;
    type Seed = SeedBytes<32>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, 4);
        Self::new([s[0], s[1], s[2], s[3]])
    }
}

impl<S> StateCodec for Xoshiro256Core<S> {
    const STATE_SIZE: usize = 32;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &self.s);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.s = read_words::<u64, 4>(bytes)?;
        Ok(())
    }
}
