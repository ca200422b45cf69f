use alloc::vec::Vec;
use core::marker::PhantomData;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::jump::{xor_jump, XorJump};
use super::provider::{JumpAhead, LongJumpAhead, Provider32, Source32};
use super::seed::{extend_seed32, SeedBytes, SeedableCore};
use super::{Plus, PlusPlus, StarStar};

/// Jump polynomial for 2^64 steps.
const JUMP: [u32; 4] = [0x8764000b, 0xf542d2d3, 0x6fa035c3, 0x77f2db5b];
/// Jump polynomial for 2^96 steps.
const LONG_JUMP: [u32; 4] = [0xb523952e, 0x0b6f099f, 0xccf5a0ef, 0x1c580662];

/// Output function of a xoshiro128 generator.
pub trait Xoshiro128Scrambler {
    const NAME: &'static str;
    fn scramble(s: &[u32; 4]) -> u32;
}

impl Xoshiro128Scrambler for Plus {
    const NAME: &'static str = "Xoshiro128Plus";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u32; 4]) -> u32 {
        s[0] + s[3]
    }
}

impl Xoshiro128Scrambler for PlusPlus {
    const NAME: &'static str = "Xoshiro128PlusPlus";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u32; 4]) -> u32 {
        (s[0] + s[3]).rotate_left(7) + s[0]
    }
}

impl Xoshiro128Scrambler for StarStar {
    const NAME: &'static str = "Xoshiro128StarStar";

    #[wrappit]
    #[inline]
    fn scramble(s: &[u32; 4]) -> u32 {
        (s[0] * 5).rotate_left(7) * 9
    }
}

/// Xoshiro128 core: 128 bits of state, period 2^128 - 1, 32-bit output.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xoshiro128Core<S> {
    s: [u32; 4],
    #[cfg_attr(feature = "serde", serde(skip))]
    scrambler: PhantomData<S>,
}

pub type Xoshiro128Plus = Provider32<Xoshiro128Core<Plus>>;
pub type Xoshiro128PlusPlus = Provider32<Xoshiro128Core<PlusPlus>>;
pub type Xoshiro128StarStar = Provider32<Xoshiro128Core<StarStar>>;

impl<S: Xoshiro128Scrambler> Xoshiro128Core<S> {
    pub fn new(s: [u32; 4]) -> Self {
        Xoshiro128Core { s, scrambler: PhantomData }
    }

    #[inline]
    fn step(&mut self) {
        let s = &mut self.s;
        let t = s[1] << 9;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(11);
    }
}

impl<S: Xoshiro128Scrambler> Source32 for Xoshiro128Core<S> {
    const NAME: &'static str = S::NAME;

    #[inline]
    fn next(&mut self) -> u32 {
        let result = S::scramble(&self.s);
        self.step();
        result
    }
}

impl<S: Xoshiro128Scrambler> XorJump for Xoshiro128Core<S> {
    type Word = u32;
    const WORDS: usize = 4;

    fn cycle(&mut self) {
        self.step();
    }

    fn word(&self, i: usize) -> u32 {
        self.s[i]
    }

    fn set_words(&mut self, words: &[u32]) {
        self.s.copy_from_slice(words);
    }
}

impl<S: Xoshiro128Scrambler> JumpAhead for Xoshiro128Core<S> {
    fn jump_ahead(&mut self) {
        xor_jump(self, &JUMP);
    }
}

impl<S: Xoshiro128Scrambler> LongJumpAhead for Xoshiro128Core<S> {
    fn long_jump_ahead(&mut self) {
        xor_jump(self, &LONG_JUMP);
    }
}

impl<S: Xoshiro128Scrambler> SeedableCore for Xoshiro128Core<S> {
    type Word = u32;
    type Seed = SeedBytes<16>;

    fn from_seed_words(seed: &[u32]) -> Self {
        let s = extend_seed32(seed, 4);
        Self::new([s[0], s[1], s[2], s[3]])
    }
}

impl<S> StateCodec for Xoshiro128Core<S> {
    const STATE_SIZE: usize = 16;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &self.s);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.s = read_words::<u32, 4>(bytes)?;
        Ok(())
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    const SEED: [u32; 4] = [0x012de1ba, 0xa5a818b8, 0xb124ea2b, 0x18e03749];

    #[test] pub fn all_zero_state_is_a_fixed_point() {
        let mut rng = Xoshiro128Plus::from_seed_words(&[0, 0, 0, 0]);
        for _ in 0 .. 8 {
            assert_eq!(0, rng.next_int());
        }
    }

    fn check<S: Xoshiro128Scrambler + Clone>(expected: &[u32], after_jump: &[u32], after_long_jump: &[u32]) {
        let mut rng = Provider32::<Xoshiro128Core<S>>::from_seed_words(&SEED);
        let mut copy = rng.jump();
        for (&e, &j) in expected.iter().zip(after_jump) {
            assert_eq!(e, copy.next_int());
            assert_eq!(j, rng.next_int());
        }
        let mut rng = Provider32::<Xoshiro128Core<S>>::from_seed_words(&SEED);
        let mut copy = rng.long_jump();
        for (&e, &j) in expected.iter().zip(after_long_jump) {
            assert_eq!(e, copy.next_int());
            assert_eq!(j, rng.next_int());
        }
    }

    #[test] pub fn plus_reference() {
        check::<Plus>(
            &[
                0x1a0e1903, 0xfde55c35, 0xddb16b2e, 0xab949ac5, 0xb5519fea,
                0xc6a97473, 0x1f0403d9, 0x1bb46995, 0x79c99a12, 0xe447ebce,
            ],
            &[
                0x65ddc942, 0x7e7c4d6b, 0x6745a785, 0x40897788, 0xfb60ce92,
                0x121f2ee0, 0xd000bae8, 0x52b3ebfc, 0x62fc3720, 0xf880f092,
            ],
            &[],
        );
    }

    #[test] pub fn plus_plus_reference() {
        check::<PlusPlus>(
            &[
                0x083a6347, 0xaf13e949, 0xc170e7f6, 0x1fff4fb2, 0x683f45ee,
                0x0447edcf, 0x42e85ced, 0xaf636b74, 0xb0087a5e, 0x75bf2669,
            ],
            &[
                0x4485d85f, 0x43f4d8a7, 0xe21ea064, 0x3eddd57d, 0x44f6149a,
                0xde7e1c16, 0xa7410410, 0x6360a4a9, 0x34dab153, 0xfdf089b0,
            ],
            &[
                0x27906b5a, 0xe2ce9fb2, 0xd97f8c4f, 0x7609af7d, 0x5b91ddd8,
                0x4134b769, 0x47f505f2, 0xacc18832, 0xeea7faf6, 0x50178ca9,
            ],
        );
    }

    #[test] pub fn star_star_reference() {
        let expected: [u32; 10] = [
            0x8856d912, 0xf2a19a86, 0x7693f66d, 0x23516f86, 0x4895054e,
            0xf4503fe6, 0x40e04672, 0x99244e34, 0xb971815c, 0x3008b82c,
        ];
        let mut rng = Xoshiro128StarStar::from_seed_words(&SEED);
        for &e in expected.iter() {
            assert_eq!(e, rng.next_int());
        }
    }

    #[test] pub fn long_jumps_are_spaced_apart() {
        let mut rng = Xoshiro128PlusPlus::from_seed_words(&SEED);
        let firsts: Vec<u32> = rng.long_jumps(3).map(|mut r| r.next_int()).collect();
        assert_eq!(0x083a6347, firsts[0]);
        assert_eq!(0x27906b5a, firsts[1]);
        assert_eq!(3, firsts.len());
        assert_ne!(firsts[1], firsts[2]);
    }
}
