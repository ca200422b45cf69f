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

/// Jump polynomial for 2^256 steps.
const JUMP: [u64; 8] = [
    0x33ed89b6e7a353f9, 0x760083d7955323be, 0x2837f2fbb5f22fae, 0x4b8c5674d309511c,
    0xb11ac47a7ba28c25, 0xf1be7667092bcc1c, 0x53851efdb6df0aaf, 0x1ebbc8b23eaf25db,
];
/// Jump polynomial for 2^384 steps.
const LONG_JUMP: [u64; 8] = [
    0x11467fef8f921d28, 0xa2a819f2e79c8ea8, 0xa8299fc284b3959a, 0xb4d347340ca63ee1,
    0x1cb0940bedbff6ce, 0xd956c5c4fa1f8e17, 0x915e38fd4eda93bc, 0x5b3ccdfa5d7daca5,
];

/// Output function of a xoshiro512 generator.
pub trait Xoshiro512Scrambler {
    const NAME: &'static str;
    fn scramble(s: &[u64; 8]) -> u64;
}

impl Xoshiro512Scrambler for Plus {
    const NAME: &'static str = "Xoshiro512Plus";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u64; 8]) -> u64 {
        s[0] + s[2]
    }
}

impl Xoshiro512Scrambler for PlusPlus {
    const NAME: &'static str = "Xoshiro512PlusPlus";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u64; 8]) -> u64 {
        (s[0] + s[2]).rotate_left(17) + s[2]
    }
}

impl Xoshiro512Scrambler for StarStar {
    const NAME: &'static str = "Xoshiro512StarStar";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u64; 8]) -> u64 {
        (s[1] * 5).rotate_left(7) * 9
    }
}

/// Xoshiro512 core: 512 bits of state, period 2^512 - 1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xoshiro512Core<S> {
    s: [u64; 8],
    #[cfg_attr(feature = "serde", serde(skip))]
    scrambler: PhantomData<S>,
}

pub type Xoshiro512Plus = Provider64<Xoshiro512Core<Plus>>;
pub type Xoshiro512PlusPlus = Provider64<Xoshiro512Core<PlusPlus>>;
pub type Xoshiro512StarStar = Provider64<Xoshiro512Core<StarStar>>;

impl<S: Xoshiro512Scrambler> Xoshiro512Core<S> {
    pub fn new(s: [u64; 8]) -> Self {
        Xoshiro512Core { s, scrambler: PhantomData }
    }

    #[inline]
    fn step(&mut self) {
        let x = &mut self.s;
        let t = x[1] << 11;
        x[2] ^= x[0];
        x[5] ^= x[1];
        x[1] ^= x[2];
        x[7] ^= x[3];
        x[3] ^= x[4];
        x[4] ^= x[5];
        x[0] ^= x[6];
        x[6] ^= x[7];
        x[6] ^= t;
        x[7] = x[7].rotate_left(21);
    }
}

impl<S: Xoshiro512Scrambler> Source64 for Xoshiro512Core<S> {
    const NAME: &'static str = S::NAME;

    #[inline]
    fn next(&mut self) -> u64 {
        let result = S::scramble(&self.s);
        self.step();
        result
    }
}

impl<S: Xoshiro512Scrambler> XorJump for Xoshiro512Core<S> {
    type Word = u64;
    const WORDS: usize = 8;

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

impl<S: Xoshiro512Scrambler> JumpAhead for Xoshiro512Core<S> {
    fn jump_ahead(&mut self) {
        xor_jump(self, &JUMP);
    }
}

impl<S: Xoshiro512Scrambler> LongJumpAhead for Xoshiro512Core<S> {
    fn long_jump_ahead(&mut self) {
        xor_jump(self, &LONG_JUMP);
    }
}

impl<S: Xoshiro512Scrambler> SeedableCore for Xoshiro512Core<S> {
    type Word = u64;
    type Seed = SeedBytes<64>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, 8);
        let mut words = [0; 8];
        words.copy_from_slice(&s[.. 8]);
        Self::new(words)
    }
}

impl<S> StateCodec for Xoshiro512Core<S> {
    const STATE_SIZE: usize = 64;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &self.s);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.s = read_words::<u64, 8>(bytes)?;
        Ok(())
    }
}
