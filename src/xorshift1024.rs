use alloc::vec::Vec;
use core::marker::PhantomData;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::error::Result;
use super::jump::{xor_jump, XorJump};
use super::provider::{JumpAhead, Provider64, Source64};
use super::seed::{extend_seed64, SeedBytes, SeedableCore};
use super::{Star, StarPhi};

/// Jump polynomial for 2^512 steps.
const JUMP: [u64; 16] = [
    0x84242f96eca9c41d, 0xa3c65b8776f96855, 0x5b34a39f070b5837, 0x4489affce4f31a1e,
    0x2ffeeb0a48316f40, 0xdc2d9891fe68c022, 0x3659132bb12fea70, 0xaac17d8efa43cab8,
    0xc4cb815590989b13, 0x5ee975283d71c93b, 0x691548c86c1bd540, 0x7910c41d10a1e6a5,
    0x0b5fc64563b3e2a8, 0x047f7684e9fc949d, 0xb99181f2d8f685ca, 0x284600e3f30e38c3,
];

/// Output multiplier of a xorshift1024* generator.
pub trait Xorshift1024Multiplier {
    const NAME: &'static str;
    const MULTIPLIER: u64;
}

impl Xorshift1024Multiplier for Star {
    const NAME: &'static str = "Xorshift1024Star";
    const MULTIPLIER: u64 = 1181783497276652981;
}

impl Xorshift1024Multiplier for StarPhi {
    const NAME: &'static str = "Xorshift1024StarPhi";
    const MULTIPLIER: u64 = 0x9e3779b97f4a7c13;
}

/// Xorshift1024* core: a sixteen-word ring buffer, period 2^1024 - 1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Xorshift1024Core<M> {
    s: [u64; 16],
    index: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    multiplier: PhantomData<M>,
}

pub type Xorshift1024Star = Provider64<Xorshift1024Core<Star>>;
pub type Xorshift1024StarPhi = Provider64<Xorshift1024Core<StarPhi>>;

impl<M> Xorshift1024Core<M> {
    #[inline]
    fn step(&mut self) -> u64 {
        let s0 = self.s[self.index];
        self.index = (self.index + 1) & 15;
        let mut s1 = self.s[self.index];
        s1 ^= s1 << 31;
        let x = s1 ^ s0 ^ (s1 >> 11) ^ (s0 >> 30);
        self.s[self.index] = x;
        x
    }
}

impl<M: Xorshift1024Multiplier> Source64 for Xorshift1024Core<M> {
    const NAME: &'static str = M::NAME;

    #[wrappit]
    #[inline]
    fn next(&mut self) -> u64 {
        self.step() * M::MULTIPLIER
    }
}

impl<M> XorJump for Xorshift1024Core<M> {
    type Word = u64;
    const WORDS: usize = 16;

    fn cycle(&mut self) {
        self.step();
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

impl<M> JumpAhead for Xorshift1024Core<M> {
    fn jump_ahead(&mut self) {
        xor_jump(self, &JUMP);
    }
}

impl<M> SeedableCore for Xorshift1024Core<M> {
    type Word = u64;
    type Seed = SeedBytes<128>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let mut s = [0; 16];
        s.copy_from_slice(&extend_seed64(seed, 16)[.. 16]);
        Xorshift1024Core { s, index: 0, multiplier: PhantomData }
    }
}

impl<M> StateCodec for Xorshift1024Core<M> {
    const STATE_SIZE: usize = 17 * 8;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &self.s);
        put_words(out, &[self.index as u64]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let words = read_words::<u64, 17>(bytes)?;
        self.s.copy_from_slice(&words[.. 16]);
        self.index = words[16] as usize & 15;
        Ok(())
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    const SEED: [u64; 16] = [
        0x012de1babb3c4104, 0xa5a818b8fc5aa503, 0xb124ea2b701f4993, 0x18e0374933d8c782,
        0x2af8df668d68ad55, 0x76e56f59daa06243, 0xf58c016f0f01e30f, 0x8eeafa41683dbbf4,
        0x7bf121347c06677f, 0x4fd0c88d25db5ccb, 0x99af3be9ebe0a272, 0x94f2b33b74d0bdcb,
        0x24b5d9d7a00a3140, 0x79d983d781a34a3c, 0x582e4a84d595f5ec, 0x7316fe8b0f606d20,
    ];

    #[test] pub fn extra_seed_words_are_ignored() {
        let mut long = [0; 17];
        long[.. 16].copy_from_slice(&SEED);
        long[16] = 0x5555;
        let mut a = Xorshift1024Star::from_seed_words(&long);
        let mut b = Xorshift1024Star::from_seed_words(&SEED);
        for _ in 0 .. 40 {
            assert_eq!(a.next_long(), b.next_long());
        }
    }

    #[test] pub fn star_reference() {
        let expected: [u64; 6] = [
            0xd85e9fc0855614cd, 0xaf4965c9c1ac6a3d, 0x067da398791111d8,
            0x2771c41db58d7644, 0xf71a471e1ac2b03e, 0x953449ae275f7409,
        ];
        let after_jump: [u64; 6] = [
            0x65d54201f5acfdde, 0x6fde36eb1f6a0de8, 0x4bb549d952f83a9e,
            0x8a450adce576715a, 0xb031eca9597292ad, 0xf37e0e06b835d614,
        ];
        let mut rng = Xorshift1024Star::from_seed_words(&SEED);
        let mut copy = rng.jump();
        for i in 0 .. 6 {
            assert_eq!(expected[i], copy.next_long());
            assert_eq!(after_jump[i], rng.next_long());
        }
    }

    #[test] pub fn star_phi_reference() {
        let expected: [u64; 6] = [
            0xc9351be6ae9af4bb, 0x2696a1a51e3040cb, 0xdcbbc38b838b4be8,
            0xc989eee03351a25c, 0xc4ad829b653ada72, 0x1cff4000cc0118df,
        ];
        let mut rng = Xorshift1024StarPhi::from_seed_words(&SEED);
        for &e in expected.iter() {
            assert_eq!(e, rng.next_long());
        }
    }

    #[test] pub fn jump_from_moved_cursor() {
        let mut a = Xorshift1024StarPhi::from_seed_words(&SEED);
        for _ in 0 .. 11 {
            a.next_long();
        }
        let mut b = a.clone();
        let mut c = a.clone();
        a.jump();
        // Restoring after the jump continues the jumped sequence.
        b.jump();
        c.restore_state(&b.save_state()).unwrap();
        for _ in 0 .. 20 {
            let x = a.next_long();
            assert_eq!(x, b.next_long());
            assert_eq!(x, c.next_long());
        }
    }
}
