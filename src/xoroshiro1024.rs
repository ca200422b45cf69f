use alloc::vec::Vec;
use core::marker::PhantomData;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::jump::{xor_jump, XorJump};
use super::provider::{JumpAhead, LongJumpAhead, Provider64, Source64};
use super::seed::{extend_seed64, SeedBytes, SeedableCore};
use super::{PlusPlus, Star, StarStar};

/// Jump polynomial for 2^512 steps.
const JUMP: [u64; 16] = [
    0x931197d8e3177f17, 0xb59422e0b9138c5f, 0xf06a6afb49d668bb, 0xacb8a6412c8a1401,
    0x12304ec85f0b3468, 0xb7dfe7079209891e, 0x405b7eec77d9eb14, 0x34ead68280c44e4a,
    0xe0e4ba3e0ac9e366, 0x8f46eda8348905b7, 0x328bf4dbad90d6ff, 0xc8fd6fb31c9effc3,
    0xe899d452d4b67652, 0x45f387286ade3205, 0x03864f454a8920bd, 0xa68fa28725b1b384,
];

/// Jump polynomial for 2^768 steps.
const LONG_JUMP: [u64; 16] = [
    0x7374156360bbf00f, 0x4630c2efa3b3c1f6, 0x6654183a892786b1, 0x94f7bfcbfb0f1661,
    0x27d8243d3d13eb2d, 0x9701730f3dfb300f, 0x2f293baae6f604ad, 0xa661831cb60cd8b6,
    0x68280c77d9fe008c, 0x50554160f5ba9459, 0x2fc20b17ec7b2a9a, 0x49189bbdc8ec9f8f,
    0x92a65bca41852cc1, 0xf46820dd0509c12a, 0x52b00c35fbf92185, 0x1e5b3b7f589e03c1,
];

/// Sixteen-word ring buffer updated by xoroshiro1024 (25, 27, 36).
/// Also the XBG half of the 1024-bit LXM generators.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xoroshiro1024State {
    s: [u64; 16],
    index: usize,
}

impl Xoroshiro1024State {
    pub fn new(s: [u64; 16], index: usize) -> Self {
        Xoroshiro1024State { s, index: index & 15 }
    }

    /// Moves the cursor and updates the state.
    /// Returns the pair `(s0, s15)` the output is computed from.
    #[inline]
    pub fn advance(&mut self) -> (u64, u64) {
        let q = self.index;
        self.index = (q + 1) & 15;
        let s0 = self.s[self.index];
        let s15 = self.s[q];
        let t = s15 ^ s0;
        self.s[q] = s0.rotate_left(25) ^ t ^ (t << 27);
        self.s[self.index] = t.rotate_left(36);
        (s0, s15)
    }

    /// Appends the sixteen words followed by the cursor.
    pub fn write_words(&self, out: &mut Vec<u8>) {
        put_words(out, &self.s);
        put_words(out, &[self.index as u64]);
    }

    /// Reads the layout of `write_words`. Out of range cursors wrap around the buffer.
    pub fn read_words(bytes: &[u8]) -> Result<Self> {
        let words = read_words::<u64, 17>(bytes)?;
        let mut s = [0; 16];
        s.copy_from_slice(&words[.. 16]);
        Ok(Self::new(s, words[16] as usize))
    }
}

impl XorJump for Xoroshiro1024State {
    type Word = u64;
    const WORDS: usize = 16;

    fn cycle(&mut self) {
        self.advance();
    }

    fn word(&self, i: usize) -> u64 {
        self.s[(i + self.index) & 15]
    }

    fn set_words(&mut self, words: &[u64]) {
        for (j, &w) in words.iter().enumerate() {
            self.s[(j + self.index) & 15] = w;
        }
    }
}

/// Output function of a xoroshiro1024 generator.
pub trait Xoroshiro1024Scrambler {
    const NAME: &'static str;
    fn scramble(s0: u64, s15: u64) -> u64;
}

impl Xoroshiro1024Scrambler for Star {
    const NAME: &'static str = "Xoroshiro1024Star";

    #[wrappit]
    #[inline]
    fn scramble(s0: u64, _s15: u64) -> u64 {
        s0 * 0x9e3779b97f4a7c13
    }
}

impl Xoroshiro1024Scrambler for StarStar {
    const NAME: &'static str = "Xoroshiro1024StarStar";

    #[wrappit]
    #[inline]
    fn scramble(s0: u64, _s15: u64) -> u64 {
        (s0 * 5).rotate_left(7) * 9
    }
}

impl Xoroshiro1024Scrambler for PlusPlus {
    const NAME: &'static str = "Xoroshiro1024PlusPlus";

    #[wrappit]
    #[inline]
    fn scramble(s0: u64, s15: u64) -> u64 {
        (s0 + s15).rotate_left(23) + s15
    }
}

/// Xoroshiro1024 core: 1024 bits of state, period 2^1024 - 1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xoroshiro1024Core<S> {
    state: Xoroshiro1024State,
    #[cfg_attr(feature = "serde", serde(skip))]
    scrambler: PhantomData<S>,
}

pub type Xoroshiro1024Star = Provider64<Xoroshiro1024Core<Star>>;
pub type Xoroshiro1024StarStar = Provider64<Xoroshiro1024Core<StarStar>>;
pub type Xoroshiro1024PlusPlus = Provider64<Xoroshiro1024Core<PlusPlus>>;

impl<S: Xoroshiro1024Scrambler> Source64 for Xoroshiro1024Core<S> {
    const NAME: &'static str = S::NAME;

    #[inline]
    fn next(&mut self) -> u64 {
        let (s0, s15) = self.state.advance();
        S::scramble(s0, s15)
    }
}

impl<S> XorJump for Xoroshiro1024Core<S> {
    type Word = u64;
    const WORDS: usize = 16;

    fn cycle(&mut self) {
        self.state.cycle();
    }

    fn word(&self, i: usize) -> u64 {
        self.state.word(i)
    }

    fn set_words(&mut self, words: &[u64]) {
        self.state.set_words(words);
    }
}

impl<S> JumpAhead for Xoroshiro1024Core<S> {
    fn jump_ahead(&mut self) {
        xor_jump(self, &JUMP);
    }
}

impl<S> LongJumpAhead for Xoroshiro1024Core<S> {
    fn long_jump_ahead(&mut self) {
        xor_jump(self, &LONG_JUMP);
    }
}

impl<S> SeedableCore for Xoroshiro1024Core<S> {
    type Word = u64;
    type Seed = SeedBytes<128>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let mut s = [0; 16];
        s.copy_from_slice(&extend_seed64(seed, 16)[.. 16]);
        Xoroshiro1024Core { state: Xoroshiro1024State::new(s, 0), scrambler: PhantomData }
    }
}

impl<S> StateCodec for Xoroshiro1024Core<S> {
    const STATE_SIZE: usize = 17 * 8;

    fn write_state(&self, out: &mut Vec<u8>) {
        self.state.write_words(out);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.state = Xoroshiro1024State::read_words(bytes)?;
        Ok(())
    }
}
