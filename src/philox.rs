use alloc::vec::Vec;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::distance::{write_unsigned_integer_32, write_unsigned_integer_64};
use super::error::Result;
use super::provider::{ArbitraryJumpAhead, JumpAhead, LongJumpAhead, Provider32, Provider64, Source32, Source64};
use super::seed::{pad_seed, SeedBytes, SeedableCore};
use super::word::Word;

// Philox4x32-10 and Philox4x64-10 counter-based generators (Salmon et al., 2011).
// Each 4-word block of output is ten rounds of a keyed bijection of a 4-word counter.
// Outputs are handed out from a buffer; the counter is incremented when it runs dry,
// so a fresh generator's first block is the block of `counter + 1`.
//
// Jumps add to the counter: the ordinary jump moves 2^(2 + 2w) outputs and the long jump
// 2^(2 + 3w) outputs, w being the word width. Arbitrary distances split into a buffer
// skip and a counter increment of `distance / 4`.

/// Number of words in the output buffer.
const BUFFER_SIZE: usize = 4;

/// Below this distance the two lowest bits of a jump are exact.
const TWO_POW_54: f64 = 18014398509481984.0;

/// Word arithmetic of a Philox variant.
pub trait PhiloxWord: Word {
    const M0: Self;
    const M1: Self;
    /// Key schedule increments.
    const W0: Self;
    const W1: Self;
    const ONE: Self;
    /// Base-2 logarithm of the period: the 4-word counter plus the 2-bit buffer position.
    const LOG_PERIOD: i32;

    /// Full product as `(high, low)`.
    fn mul_wide(self, other: Self) -> (Self, Self);

    fn wrapping_add(self, other: Self) -> Self;

    /// Sum with carry in and carry out.
    fn carrying_add(self, other: Self, carry: bool) -> (Self, bool);

    /// Word with only bit `i` set.
    fn power_of_two(i: u32) -> Self;

    /// Buffer position stored as a word. Positions past the buffer mean an exhausted buffer.
    fn from_position(position: usize) -> Self;
    fn to_position(self) -> usize;

    /// Writes `floor(value)` into words, least significant first.
    fn write_unsigned_integer(value: f64, result: &mut [Self]) -> Result<()>;
}

macro_rules! philox_word {
    ($word:ty, $wide:ty, $m0:expr, $m1:expr, $w0:expr, $w1:expr, $log_period:expr, $write:ident) => {
        impl PhiloxWord for $word {
            const M0: Self = $m0;
            const M1: Self = $m1;
            const W0: Self = $w0;
            const W1: Self = $w1;
            const ONE: Self = 1;
            const LOG_PERIOD: i32 = $log_period;

            #[inline]
            fn mul_wide(self, other: Self) -> (Self, Self) {
                let product = self as $wide * other as $wide;
                ((product >> <$word>::BITS) as $word, product as $word)
            }

            #[inline]
            fn wrapping_add(self, other: Self) -> Self {
                <$word>::wrapping_add(self, other)
            }

            #[inline]
            fn carrying_add(self, other: Self, carry: bool) -> (Self, bool) {
                let (sum, c1) = self.overflowing_add(other);
                let (sum, c2) = sum.overflowing_add(carry as $word);
                (sum, c1 | c2)
            }

            fn power_of_two(i: u32) -> Self {
                1 << i
            }

            fn from_position(position: usize) -> Self {
                position as $word
            }

            fn to_position(self) -> usize {
                if self < BUFFER_SIZE as $word { self as usize } else { BUFFER_SIZE }
            }

            fn write_unsigned_integer(value: f64, result: &mut [Self]) -> Result<()> {
                $write(value, result)
            }
        }
    };
}

philox_word!(u32, u64, 0xD2511F53, 0xCD9E8D57, 0x9E3779B9, 0xBB67AE85, 130, write_unsigned_integer_32);
philox_word!(u64, u128, 0xD2E7470EE14C6C93, 0xCA5A826395121157, 0x9E3779B97F4A7C15, 0xBB67AE8584CAA73B,
    258, write_unsigned_integer_64);

/// Philox4xW-10 core: key, counter and the current output block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct PhiloxCore<W> {
    key: [W; 2],
    counter: [W; 4],
    buffer: [W; 4],
    position: usize,
}

pub type Philox4x32 = Provider32<PhiloxCore<u32>>;
pub type Philox4x64 = Provider64<PhiloxCore<u64>>;

impl<W: PhiloxWord> PhiloxCore<W> {
    /// Creates a generator with an exhausted buffer; the first output comes from `counter + 1`.
    pub fn new(key: [W; 2], counter: [W; 4]) -> Self {
        PhiloxCore { key, counter, buffer: [W::default(); 4], position: BUFFER_SIZE }
    }

    #[inline]
    fn next_word(&mut self) -> W {
        let p = self.position;
        if p < BUFFER_SIZE {
            self.position = p + 1;
            return self.buffer[p];
        }
        self.increment_counter();
        self.rand10();
        self.position = 1;
        self.buffer[0]
    }

    fn increment_counter(&mut self) {
        for c in self.counter.iter_mut() {
            *c = c.wrapping_add(W::ONE);
            if *c != W::default() {
                return;
            }
        }
    }

    /// Adds a 4-word increment to the counter, dropping the final carry.
    fn add_to_counter(&mut self, increment: &[W; 4]) {
        let mut carry = false;
        for (c, &i) in self.counter.iter_mut().zip(increment.iter()) {
            let (sum, out) = c.carrying_add(i, carry);
            *c = sum;
            carry = out;
        }
    }

    /// Fills the buffer with the block of the current counter.
    fn rand10(&mut self) {
        let mut b = self.counter;
        let [mut k0, mut k1] = self.key;
        for round in 0 .. 10 {
            if round > 0 {
                k0 = k0.wrapping_add(W::W0);
                k1 = k1.wrapping_add(W::W1);
            }
            let (hi0, lo0) = W::M0.mul_wide(b[0]);
            let (hi1, lo1) = W::M1.mul_wide(b[2]);
            let mut x = hi1;
            x ^= b[1];
            x ^= k0;
            let mut y = hi0;
            y ^= b[3];
            y ^= k1;
            b = [x, lo1, y, lo0];
        }
        self.buffer = b;
    }

    /// Moves the buffer position by `skip` (below 4) and adds `increment` to the counter.
    fn advance(&mut self, skip: usize, increment: &[W; 4]) {
        // A position of 4 stays pending so that the next output regenerates the buffer.
        self.position += skip;
        if self.position > BUFFER_SIZE {
            self.position -= BUFFER_SIZE;
            self.increment_counter();
        }
        self.add_to_counter(increment);
        self.finish_jump();
    }

    fn finish_jump(&mut self) {
        if self.position < BUFFER_SIZE {
            self.rand10();
        }
    }

    fn unit_increment(i: usize) -> [W; 4] {
        let mut increment = [W::default(); 4];
        increment[i] = W::ONE;
        increment
    }
}

impl Source32 for PhiloxCore<u32> {
    const NAME: &'static str = "Philox4x32";

    #[inline]
    fn next(&mut self) -> u32 {
        self.next_word()
    }
}

impl Source64 for PhiloxCore<u64> {
    const NAME: &'static str = "Philox4x64";

    #[inline]
    fn next(&mut self) -> u64 {
        self.next_word()
    }
}

impl<W: PhiloxWord> JumpAhead for PhiloxCore<W> {
    /// Increments counter word 2.
    fn jump_ahead(&mut self) {
        self.add_to_counter(&Self::unit_increment(2));
        self.finish_jump();
    }
}

impl<W: PhiloxWord> LongJumpAhead for PhiloxCore<W> {
    /// Increments counter word 3.
    fn long_jump_ahead(&mut self) {
        self.add_to_counter(&Self::unit_increment(3));
        self.finish_jump();
    }
}

impl<W: PhiloxWord> ArbitraryJumpAhead for PhiloxCore<W> {
    const LOG_PERIOD: i32 = W::LOG_PERIOD;

    fn jump_ahead_by(&mut self, distance: f64) -> Result<()> {
        let skip = if distance < TWO_POW_54 { (distance as u64 & 3) as usize } else { 0 };
        let mut increment = [W::default(); 4];
        if distance >= BUFFER_SIZE as f64 {
            W::write_unsigned_integer(distance * 0.25, &mut increment)?;
        }
        self.advance(skip, &increment);
        Ok(())
    }

    fn jump_ahead_power_of_two(&mut self, log_distance: i32) {
        let mut increment = [W::default(); 4];
        let mut skip = 0;
        if log_distance <= 1 {
            skip = 1 << log_distance;
        } else {
            let n = (log_distance - 2) as u32;
            increment[(n / W::BITS) as usize] = W::power_of_two(n % W::BITS);
        }
        self.advance(skip, &increment);
    }
}

impl<W: PhiloxWord> PhiloxCore<W> {
    /// Seed words are `[key0, key1, c0, c1, c2, c3]`. Missing words are zero.
    fn from_words(seed: &[W]) -> Self {
        let s = pad_seed(seed, 6);
        Self::new([s[0], s[1]], [s[2], s[3], s[4], s[5]])
    }
}

impl SeedableCore for PhiloxCore<u32> {
    type Word = u32;
    type Seed = SeedBytes<24>;

    fn from_seed_words(seed: &[u32]) -> Self {
        Self::from_words(seed)
    }
}

impl SeedableCore for PhiloxCore<u64> {
    type Word = u64;
    type Seed = SeedBytes<48>;

    fn from_seed_words(seed: &[u64]) -> Self {
        Self::from_words(seed)
    }
}

impl<W: PhiloxWord> StateCodec for PhiloxCore<W> {
    const STATE_SIZE: usize = 7 * W::BYTES;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &self.key);
        put_words(out, &self.counter);
        put_words(out, &[W::from_position(self.position)]);
    }

    /// The buffer is not saved; it is recomputed from the counter.
    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [k0, k1, c0, c1, c2, c3, position] = read_words::<W, 7>(bytes)?;
        self.key = [k0, k1];
        self.counter = [c0, c1, c2, c3];
        self.position = position.to_position();
        self.rand10();
        Ok(())
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    #[test] pub fn philox4x32_reference() {
        let expected: [u32; 8] = [
            0x9eeede35, 0x1cbe137c, 0xfa277093, 0x147edd50,
            0x3fc9c8d8, 0xfc06fa38, 0xcc170b27, 0x891d3b11,
        ];
        let mut rng = Philox4x32::from_seed_words(&[1234]);
        for &e in expected.iter() {
            assert_eq!(e, rng.next_int());
        }
        let expected: [u32; 8] = [
            0xe019f079, 0x10678d21, 0x556b04aa, 0xf3c4b9c2,
            0xadbac844, 0x0857527a, 0x941657b8, 0xed957f1d,
        ];
        let mut rng = Philox4x32::from_seed_words(&[123, 456, 789, 10, 11, 12]);
        for &e in expected.iter() {
            assert_eq!(e, rng.next_int());
        }
    }

    #[test] pub fn philox4x64_reference() {
        let expected: [u64; 8] = [
            0x55b073805f5e9690, 0x96f88e7a23008a82, 0xb1178efbd6b4b516, 0x555dc3201b6c465b,
            0x9790d12629b7ae9f, 0xdcf16c1900ac90f5, 0xe2f2d7e5c3a51b38, 0x22c5fc3358c0a11b,
        ];
        let mut rng = Philox4x64::from_seed_words(&[1234]);
        for &e in expected.iter() {
            assert_eq!(e, rng.next_long());
        }
        let expected: [u64; 8] = [
            0xdadc3783392fd001, 0xd9f722adf44bf037, 0x95e9586fd307847b, 0xe40d4181e42e2578,
            0x7ed3df9fdab44e72, 0x1a4e1c364f4fa7a3, 0x0f8bda133179e991, 0x8805bdeb2a6d1ac3,
        ];
        let mut rng = Philox4x64::from_seed_words(&[123, 456, 789, 10, 11, 12]);
        for &e in expected.iter() {
            assert_eq!(e, rng.next_long());
        }
    }

    #[test] pub fn jump_references() {
        let after_jump: [u32; 8] = [
            0x07129e5f, 0x653d7a73, 0x1d8331c1, 0x86ff06af,
            0x2c03a11b, 0x4b0da1a1, 0x66b9f664, 0x9cefb170,
        ];
        let after_long_jump: [u32; 8] = [
            0x0ec55d2d, 0xca6f1ed5, 0x72e58b38, 0xea66c6b1,
            0x663bab8a, 0x466dd22c, 0x4cc6399c, 0x4fb7e4c1,
        ];
        for skip in 0 .. 5 {
            let mut rng = Philox4x32::from_seed_words(&[1234]);
            let mut other = rng.clone();
            for _ in 0 .. skip {
                rng.next_int();
                other.next_int();
            }
            rng.jump();
            other.long_jump();
            for i in skip .. 8 {
                assert_eq!(after_jump[i], rng.next_int());
                assert_eq!(after_long_jump[i], other.next_int());
            }
        }

        let after_jump: [u64; 8] = [
            0x2e7cb54f5f4cb590, 0x3ff477e827fee3ea, 0x35e5bdcc50ced45d, 0x744adfe0aa4d5b6a,
            0x056c3ab561dea32c, 0x563db6d8c32671e6, 0x81cef80c53d390af, 0x81ff3ebda1bf9bcd,
        ];
        let after_long_jump: [u64; 8] = [
            0x71348c4ff1acbc36, 0x416b62c5af9b5eea, 0x1ab9ba9085bc6ca3, 0x63a5c47d5cf0c079,
            0x7aba82fec8599bb0, 0xf2ac083ae31391e2, 0xdcabf6903d0d4d83, 0xd6cef72b86a10c02,
        ];
        let mut rng = Philox4x64::from_seed_words(&[123, 456, 789, 10, 11, 12]);
        let mut other = rng.clone();
        for _ in 0 .. 3 {
            rng.next_long();
            other.next_long();
        }
        rng.jump();
        other.long_jump();
        for i in 3 .. 8 {
            assert_eq!(after_jump[i], rng.next_long());
            assert_eq!(after_long_jump[i], other.next_long());
        }
    }

    #[test] pub fn counter_carries() {
        let max = u32::MAX;
        let mut rng = Philox4x32::from_seed_words(&[1, 2, max, max, max, 0]);
        rng.next_int();
        let words: Vec<u32> = codec::words_from_le(&rng.save_state()[.. 28]);
        assert_eq!(&words, &[1, 2, 0, 0, 0, 1, 1]);

        // The last carry out of the counter is dropped.
        let mut rng = Philox4x64::from_seed_words(&[0, 0, 0, 0, u64::MAX, u64::MAX]);
        rng.jump();
        let words: Vec<u64> = codec::words_from_le(&rng.save_state()[.. 56]);
        assert_eq!(&words, &[0, 0, 0, 0, 0, 0, 4]);
    }

    #[test] pub fn arbitrary_jumps_match_stepping() {
        for consumed in 0 .. 5 {
            for distance in [0usize, 1, 2, 3, 4, 5, 7, 8, 17, 1001] {
                let mut rng = Philox4x32::from_seed_words(&[9, 8, 7]);
                for _ in 0 .. consumed {
                    rng.next_int();
                }
                let mut stepped = rng.clone();
                for _ in 0 .. distance {
                    stepped.next_int();
                }
                rng.jump_by(distance as f64).unwrap();
                for _ in 0 .. 12 {
                    assert_eq!(stepped.next_int(), rng.next_int());
                }
            }
        }

        let mut rng = Philox4x64::from_seed_words(&[5]);
        rng.next_long();
        let mut stepped = rng.clone();
        for _ in 0 .. 64 {
            stepped.next_long();
        }
        let mut by_power = rng.clone();
        rng.jump_by(64.5).unwrap();
        by_power.jump_power_of_two(6).unwrap();
        for _ in 0 .. 12 {
            let x = stepped.next_long();
            assert_eq!(x, rng.next_long());
            assert_eq!(x, by_power.next_long());
        }
    }

    #[test] pub fn fixed_jumps_are_powers_of_two() {
        let mut a = Philox4x64::from_seed_words(&[3, 1, 4, 1, 5, 9]);
        a.next_long();
        let mut b = a.clone();
        let mut c = a.clone();
        let mut d = a.clone();
        a.jump();
        b.jump_power_of_two(130).unwrap();
        c.long_jump();
        d.jump_by(2f64.powi(194)).unwrap();
        assert_eq!(a.save_state(), b.save_state());
        assert_eq!(c.save_state(), d.save_state());
        for _ in 0 .. 8 {
            assert_eq!(a.next_long(), b.next_long());
            assert_eq!(c.next_long(), d.next_long());
        }

        let mut a = Philox4x32::from_seed_words(&[3, 1, 4, 1, 5, 9]);
        let mut b = a.clone();
        let mut c = a.clone();
        let mut d = a.clone();
        a.jump();
        b.jump_power_of_two(66).unwrap();
        c.long_jump();
        d.jump_power_of_two(98).unwrap();
        assert_eq!(a.save_state(), b.save_state());
        assert_eq!(c.save_state(), d.save_state());
    }

    #[test] pub fn jump_limits() {
        let mut rng = Philox4x32::from_seed_words(&[1]);
        assert_eq!(2f64.powi(130), Philox4x32::period());
        assert_eq!(258, Philox4x64::LOG_PERIOD);
        assert!(rng.jump_by(2f64.powi(130)).is_err());
        assert!(rng.jump_by(-1.0).is_err());
        assert!(rng.jump_power_of_two(130).is_err());
        let mut copy = rng.clone();
        // A negative power leaves the sequence in place.
        rng.jump_power_of_two(-3).unwrap();
        assert_eq!(copy.next_int(), rng.next_int());
        assert!(rng.jump_by(2f64.powi(129) * 1.5).is_ok());
        let copies: Vec<Philox4x32> = rng.jumps_by(3, 1000.0).unwrap().collect();
        assert_eq!(3, copies.len());
    }

    #[test] pub fn restore_regenerates_the_buffer() {
        let mut rng = Philox4x64::from_seed_words(&[11, 22, 33]);
        rng.next_long();
        rng.next_long();
        let state = rng.save_state();
        assert_eq!(Philox4x64::STATE_SIZE, state.len());
        let mut other = Philox4x64::from_seed_words(&[]);
        other.restore_state(&state).unwrap();
        for _ in 0 .. 10 {
            assert_eq!(rng.next_long(), other.next_long());
        }

        // Positions past the buffer are treated as exhausted.
        let fresh = Philox4x32::from_seed_words(&[1234]);
        let mut bytes = fresh.save_state();
        bytes[24] = 200;
        let mut restored = Philox4x32::from_seed_words(&[]);
        restored.restore_state(&bytes).unwrap();
        assert_eq!(0x9eeede35, restored.next_int());
    }
}
