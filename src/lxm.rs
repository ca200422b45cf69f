use alloc::vec::Vec;
use core::marker::PhantomData;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, split_state, StateCodec};
use super::error::Result;
use super::jump::XorJump;
use super::lcg::{Lcg128, Lcg32, Lcg64};
use super::mix::{lea32, lea64};
use super::provider::{JumpAhead, LongJumpAhead, Provider32, Provider64, Source32, Source64, SplitCore};
use super::seed::{extend_seed32, extend_seed64, SeedBytes, SeedableCore};
use super::xoroshiro1024::Xoroshiro1024State;
use super::xoroshiro128::xoroshiro128_step;
use super::xoroshiro64::xoroshiro64_step;
use super::xoshiro256::xoshiro256_step;
use super::{Mix, StarStar, GOLDEN_RATIO_64};

// LXM generators (Steele & Vigna, 2021). An LCG and an XBG advance independently;
// each output mixes the pre-update LCG high word with the pre-update XBG head word.
// The LCG makes the streams of different additive parameters independent, so jumping
// only the LCG is enough to separate a copy from its parent.

/// LCG half of an LXM generator.
pub trait LxmLcg: Clone {
    /// Number of 64-bit seed words.
    const WORDS: usize;
    /// Size of the encoded state in bytes.
    const STATE_SIZE: usize;

    /// Builds from seed words in the order add, then state.
    fn from_words(words: &[u64]) -> Self;

    /// Builds from a split seed, the remaining words drawn from `source`.
    fn create<R: rand_core::RngCore + ?Sized>(seed: u64, source: &mut R) -> Self;

    /// Word fed to the mixer.
    fn high(&self) -> u64;

    /// Least significant state word. Used to reseed an all-zero XBG after a split.
    fn low(&self) -> u64;

    fn cycle(&mut self);

    /// Advances by the long jump distance: 2^32 steps for 64-bit, 2^64 steps for 128-bit.
    fn long_cycle(&mut self);

    fn write_words(&self, out: &mut Vec<u8>);
    fn read_words(bytes: &[u8]) -> Result<Self>;
}

impl LxmLcg for Lcg64 {
    const WORDS: usize = 2;
    const STATE_SIZE: usize = 16;

    fn from_words(words: &[u64]) -> Self {
        Lcg64::new(words[0], words[1])
    }

    fn create<R: rand_core::RngCore + ?Sized>(seed: u64, source: &mut R) -> Self {
        // The shifted seed makes the additive parameter unique within a stream.
        Lcg64::new(seed << 1, source.next_u64())
    }

    fn high(&self) -> u64 {
        self.state()
    }

    fn low(&self) -> u64 {
        self.state()
    }

    fn cycle(&mut self) {
        Lcg64::cycle(self)
    }

    fn long_cycle(&mut self) {
        Lcg64::long_cycle(self)
    }

    fn write_words(&self, out: &mut Vec<u8>) {
        Lcg64::write_words(self, out)
    }

    fn read_words(bytes: &[u8]) -> Result<Self> {
        Lcg64::read_words(bytes)
    }
}

impl LxmLcg for Lcg128 {
    const WORDS: usize = 4;
    const STATE_SIZE: usize = 32;

    fn from_words(words: &[u64]) -> Self {
        Lcg128::new(words[0], words[1], words[2], words[3])
    }

    fn create<R: rand_core::RngCore + ?Sized>(seed: u64, source: &mut R) -> Self {
        let add_hi = source.next_u64();
        let state_hi = source.next_u64();
        let state_lo = source.next_u64();
        Lcg128::new(add_hi, seed << 1, state_hi, state_lo)
    }

    fn high(&self) -> u64 {
        self.state_hi()
    }

    fn low(&self) -> u64 {
        self.state_lo()
    }

    fn cycle(&mut self) {
        Lcg128::cycle(self)
    }

    fn long_cycle(&mut self) {
        Lcg128::long_cycle(self)
    }

    fn write_words(&self, out: &mut Vec<u8>) {
        Lcg128::write_words(self, out)
    }

    fn read_words(bytes: &[u8]) -> Result<Self> {
        Lcg128::read_words(bytes)
    }
}

/// XBG half of an LXM generator.
pub trait LxmXbg: Clone {
    /// Number of 64-bit seed words, at most 16.
    const WORDS: usize;
    /// Size of the encoded state in bytes.
    const STATE_SIZE: usize;

    fn from_words(words: &[u64]) -> Self;

    /// Word fed to the mixer.
    fn head(&self) -> u64;

    fn cycle(&mut self);

    fn write_words(&self, out: &mut Vec<u8>);
    fn read_words(bytes: &[u8]) -> Result<Self>;
}

/// Xoroshiro128 (24, 16, 37) state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xbg128 {
    s0: u64,
    s1: u64,
}

impl LxmXbg for Xbg128 {
    const WORDS: usize = 2;
    const STATE_SIZE: usize = 16;

    fn from_words(words: &[u64]) -> Self {
        Xbg128 { s0: words[0], s1: words[1] }
    }

    fn head(&self) -> u64 {
        self.s0
    }

    fn cycle(&mut self) {
        let (s0, s1) = xoroshiro128_step(self.s0, self.s1, (24, 16, 37));
        self.s0 = s0;
        self.s1 = s1;
    }

    fn write_words(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.s0, self.s1]);
    }

    fn read_words(bytes: &[u8]) -> Result<Self> {
        let [s0, s1] = read_words::<u64, 2>(bytes)?;
        Ok(Xbg128 { s0, s1 })
    }
}

/// Xoshiro256 state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xbg256 {
    s: [u64; 4],
}

impl LxmXbg for Xbg256 {
    const WORDS: usize = 4;
    const STATE_SIZE: usize = 32;

    fn from_words(words: &[u64]) -> Self {
        Xbg256 { s: [words[0], words[1], words[2], words[3]] }
    }

    fn head(&self) -> u64 {
        self.s[0]
    }

    fn cycle(&mut self) {
        xoshiro256_step(&mut self.s);
    }

    fn write_words(&self, out: &mut Vec<u8>) {
        put_words(out, &self.s);
    }

    fn read_words(bytes: &[u8]) -> Result<Self> {
        Ok(Xbg256 { s: read_words::<u64, 4>(bytes)? })
    }
}

impl LxmXbg for Xoroshiro1024State {
    const WORDS: usize = 16;
    const STATE_SIZE: usize = 17 * 8;

    /// The cursor starts at 15 so that the first head word is `words[0]`.
    fn from_words(words: &[u64]) -> Self {
        let mut s = [0; 16];
        s.copy_from_slice(&words[.. 16]);
        Xoroshiro1024State::new(s, 15)
    }

    fn head(&self) -> u64 {
        // Word 1 from the cursor is the next s0.
        self.word(1)
    }

    fn cycle(&mut self) {
        self.advance();
    }

    fn write_words(&self, out: &mut Vec<u8>) {
        Xoroshiro1024State::write_words(self, out)
    }

    fn read_words(bytes: &[u8]) -> Result<Self> {
        Xoroshiro1024State::read_words(bytes)
    }
}

/// LXM mix function.
pub trait LxmMix {
    fn mix(z: u64) -> u64;
}

impl LxmMix for Mix {
    #[inline]
    fn mix(z: u64) -> u64 {
        lea64(z)
    }
}

impl LxmMix for StarStar {
    #[wrappit]
    #[inline]
    fn mix(z: u64) -> u64 {
        (z * 5).rotate_left(7) * 9
    }
}

/// Name and native seed of a concrete LXM composition.
pub trait LxmLayout {
    const NAME: &'static str;
    type Seed: Sized + Default + AsMut<[u8]> + AsRef<[u8]>;
}

/// LXM core: LCG `L`, XBG `X` and mix function `M`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Lxm<L, X, M> {
    lcg: L,
    xbg: X,
    #[cfg_attr(feature = "serde", serde(skip))]
    mix: PhantomData<M>,
}

pub type L64X128Mix = Provider64<Lxm<Lcg64, Xbg128, Mix>>;
pub type L64X128StarStar = Provider64<Lxm<Lcg64, Xbg128, StarStar>>;
pub type L64X256Mix = Provider64<Lxm<Lcg64, Xbg256, Mix>>;
pub type L64X1024Mix = Provider64<Lxm<Lcg64, Xoroshiro1024State, Mix>>;
pub type L128X128Mix = Provider64<Lxm<Lcg128, Xbg128, Mix>>;
pub type L128X256Mix = Provider64<Lxm<Lcg128, Xbg256, Mix>>;
pub type L128X1024Mix = Provider64<Lxm<Lcg128, Xoroshiro1024State, Mix>>;

macro_rules! lxm_layout {
    ($lcg:ty, $xbg:ty, $mix:ty, $name:expr, $bytes:expr) => {
        impl LxmLayout for Lxm<$lcg, $xbg, $mix> {
            const NAME: &'static str = $name;
            type Seed = SeedBytes<$bytes>;
        }
    };
}

lxm_layout!(Lcg64, Xbg128, Mix, "L64X128Mix", 32);
lxm_layout!(Lcg64, Xbg128, StarStar, "L64X128StarStar", 32);
lxm_layout!(Lcg64, Xbg256, Mix, "L64X256Mix", 48);
lxm_layout!(Lcg64, Xoroshiro1024State, Mix, "L64X1024Mix", 144);
lxm_layout!(Lcg128, Xbg128, Mix, "L128X128Mix", 48);
lxm_layout!(Lcg128, Xbg256, Mix, "L128X256Mix", 64);
lxm_layout!(Lcg128, Xoroshiro1024State, Mix, "L128X1024Mix", 160);

impl<L: LxmLcg, X: LxmXbg, M> Lxm<L, X, M> {
    pub fn new(lcg: L, xbg: X) -> Self {
        Lxm { lcg, xbg, mix: PhantomData }
    }
}

impl<L: LxmLcg, X: LxmXbg, M: LxmMix> Source64 for Lxm<L, X, M> where Self: LxmLayout {
    const NAME: &'static str = <Self as LxmLayout>::NAME;

    #[inline]
    fn next(&mut self) -> u64 {
        let z = M::mix(self.lcg.high().wrapping_add(self.xbg.head()));
        self.lcg.cycle();
        self.xbg.cycle();
        z
    }
}

impl<L: LxmLcg, X: LxmXbg, M> JumpAhead for Lxm<L, X, M> {
    fn jump_ahead(&mut self) {
        self.lcg.cycle();
    }
}

impl<L: LxmLcg, X: LxmXbg, M> LongJumpAhead for Lxm<L, X, M> {
    fn long_jump_ahead(&mut self) {
        self.lcg.long_cycle();
    }
}

impl<L: LxmLcg, X: LxmXbg, M> SplitCore for Lxm<L, X, M> {
    fn create<R: rand_core::RngCore + ?Sized>(seed: u64, source: &mut R) -> Self {
        let lcg = L::create(seed, source);
        let mut buffer = [0u64; 16];
        let words = &mut buffer[.. X::WORDS];
        let mut any = 0;
        for w in words.iter_mut() {
            *w = source.next_u64();
            any |= *w;
        }
        if any == 0 {
            // An all-zero XBG never leaves zero; reseed it from the LCG state.
            let mut x = lcg.low();
            for w in words.iter_mut() {
                *w = lea64(x);
                x = x.wrapping_add(GOLDEN_RATIO_64);
            }
        }
        Self::new(lcg, X::from_words(words))
    }
}

impl<L: LxmLcg, X: LxmXbg, M> SeedableCore for Lxm<L, X, M> where Self: LxmLayout {
    type Word = u64;
    type Seed = <Self as LxmLayout>::Seed;

    /// Seed words are the LCG words (add, then state) followed by the XBG words.
    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, L::WORDS + X::WORDS);
        Self::new(L::from_words(&s[.. L::WORDS]), X::from_words(&s[L::WORDS ..]))
    }
}

impl<L: LxmLcg, X: LxmXbg, M> StateCodec for Lxm<L, X, M> {
    const STATE_SIZE: usize = X::STATE_SIZE + L::STATE_SIZE;

    fn write_state(&self, out: &mut Vec<u8>) {
        self.xbg.write_words(out);
        self.lcg.write_words(out);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let (xbg, lcg) = split_state(bytes, X::STATE_SIZE)?;
        let xbg = X::read_words(xbg)?;
        self.lcg = L::read_words(lcg)?;
        self.xbg = xbg;
        Ok(())
    }
}

/// L32X64Mix core: a 32-bit LCG with a xoroshiro64 XBG and the lea32 mixer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct L32X64MixCore {
    lcg: Lcg32,
    x0: u32,
    x1: u32,
}

pub type L32X64Mix = Provider32<L32X64MixCore>;

impl L32X64MixCore {
    pub fn new(lcg: Lcg32, x0: u32, x1: u32) -> Self {
        L32X64MixCore { lcg, x0, x1 }
    }
}

impl Source32 for L32X64MixCore {
    const NAME: &'static str = "L32X64Mix";

    #[inline]
    fn next(&mut self) -> u32 {
        let z = lea32(self.lcg.state().wrapping_add(self.x0));
        self.lcg.cycle();
        let (x0, x1) = xoroshiro64_step(self.x0, self.x1);
        self.x0 = x0;
        self.x1 = x1;
        z
    }
}

impl JumpAhead for L32X64MixCore {
    fn jump_ahead(&mut self) {
        self.lcg.cycle();
    }
}

impl LongJumpAhead for L32X64MixCore {
    /// Advances the LCG 2^16 steps.
    fn long_jump_ahead(&mut self) {
        self.lcg.long_cycle();
    }
}

impl SeedableCore for L32X64MixCore {
    type Word = u32;
    type Seed = SeedBytes<16>;

    /// Seed words are `[add, state, x0, x1]`.
    fn from_seed_words(seed: &[u32]) -> Self {
        let s = extend_seed32(seed, 4);
        Self::new(Lcg32::new(s[0], s[1]), s[2], s[3])
    }
}

impl StateCodec for L32X64MixCore {
    const STATE_SIZE: usize = 16;

    fn write_state(&self, out: &mut Vec<u8>) {
        self.lcg.write_words(out);
        put_words(out, &[self.x0, self.x1]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let (lcg, xbg) = split_state(bytes, 8)?;
        let [x0, x1] = read_words::<u32, 2>(xbg)?;
        *self = Self::new(Lcg32::read_words(lcg)?, x0, x1);
        Ok(())
    }
}
