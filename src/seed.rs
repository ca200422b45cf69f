use alloc::vec::Vec;
use rand_core::RngCore;
use wrapping_arithmetic::wrappit;

use super::mix::{murmur3, stafford13};
use super::word::Word;
use super::{GOLDEN_RATIO_32, GOLDEN_RATIO_64};

/// A core generator constructible from an explicit array of seed words.
pub trait SeedableCore: Sized {
    /// Seed word type. 32-bit output generators may still take 64-bit seed words.
    type Word: Word;
    /// Seed bytes accepted by `SeedableRng::from_seed`: the native seed words, little-endian.
    type Seed: Sized + Default + AsMut<[u8]> + AsRef<[u8]>;

    /// Creates the core. Seeds shorter than the native length are expanded, never rejected.
    fn from_seed_words(seed: &[Self::Word]) -> Self;
}

/// Fixed-size seed byte array usable as `SeedableRng::Seed` at any length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for SeedBytes<N> {
    fn default() -> Self {
        SeedBytes([0; N])
    }
}

impl<const N: usize> AsMut<[u8]> for SeedBytes<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> AsRef<[u8]> for SeedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Extends a 64-bit seed to `length` words. Missing words continue a SplitMix64 sequence
/// started at the first word (zero for an empty seed). Existing words are kept.
#[wrappit]
pub fn extend_seed64(seed: &[u64], length: usize) -> Vec<u64> {
    let mut s = seed.to_vec();
    if s.len() < length {
        let mut x = seed.first().copied().unwrap_or(0);
        while s.len() < length {
            x += GOLDEN_RATIO_64;
            s.push(stafford13(x));
        }
    }
    s
}

/// Extends a 32-bit seed to `length` words using a SplitMix-style sequence
/// with the MurmurHash3 finalizer.
#[wrappit]
pub fn extend_seed32(seed: &[u32], length: usize) -> Vec<u32> {
    let mut s = seed.to_vec();
    if s.len() < length {
        let mut x = seed.first().copied().unwrap_or(0);
        while s.len() < length {
            x += GOLDEN_RATIO_32;
            s.push(murmur3(x));
        }
    }
    s
}

/// Zero-pads a seed to `length` words.
pub fn pad_seed<W: Word>(seed: &[W], length: usize) -> Vec<W> {
    let mut s = seed.to_vec();
    if s.len() < length {
        s.resize(length, W::default());
    }
    s
}

const SEED_CHAR_BITS: u32 = 4;

/// Creates the base seed of a stream of split generators.
/// Bit 0 is set and no other 4-bit character equals the lowest one, so `seed | position`
/// stays unique while the position is shorter than the seed's unique character.
pub fn create_stream_seed<R: RngCore + ?Sized>(source: &mut R) -> u64 {
    let mut bits = source.next_u64() | 1;
    let n: u64 = (1 << SEED_CHAR_BITS) - 1;
    let unique = bits & n;
    let mut i = SEED_CHAR_BITS;
    while i < 64 {
        let mut c = (bits >> i) & n;
        if c == unique {
            // Uniform over [0, n] excluding the unique character.
            c = (n * source.next_u32() as u64) >> 32;
            c = (unique + c + 1) & n;
            bits = (bits & !(n << i)) | (c << i);
        }
        i += SEED_CHAR_BITS;
    }
    bits
}
