use alloc::vec::Vec;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::put_words;

// Caches of source bits not yet handed out. A provider owns one of each it needs;
// any operation that moves the core out of band (jumps, restore) must reset them,
// otherwise stale bits from the old position would leak into the new sequence.

/// Unused bits of one source word, consumed one boolean at a time.
/// `BITS` is the source word width. The value `1` is the empty sentinel:
/// a refill stores the remaining bits below a marker bit that ends up alone once they are used.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoolCache<const BITS: u32> {
    bits: u64,
}

impl<const BITS: u32> BoolCache<BITS> {
    /// Encoding of the empty cache.
    pub const EMPTY: u64 = 1;

    pub fn new() -> Self {
        BoolCache { bits: Self::EMPTY }
    }

    /// Returns the next boolean, calling `refill` for a fresh source word when empty.
    #[inline]
    pub fn next<F: FnOnce() -> u64>(&mut self, refill: F) -> bool {
        let bits = self.bits;
        if bits == Self::EMPTY {
            let word = refill();
            self.bits = (1 << (BITS - 1)) | (word >> 1);
            return word & 1 == 1;
        }
        self.bits = bits >> 1;
        bits & 1 == 1
    }

    #[inline]
    pub fn reset(&mut self) {
        self.bits = Self::EMPTY;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == Self::EMPTY
    }
}

impl<const BITS: u32> Default for BoolCache<BITS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper half of a 64-bit source word saved for the next 32-bit request.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntCache {
    bits: u64,
}

impl IntCache {
    /// Encoding of the empty cache, the all-ones word. A stored half never reaches it.
    pub const EMPTY: u64 = u64::MAX;

    pub fn new() -> Self {
        IntCache { bits: Self::EMPTY }
    }

    /// Returns the next 32 bits: the low half of a fresh word, then its high half.
    #[inline]
    pub fn next<F: FnOnce() -> u64>(&mut self, refill: F) -> u32 {
        if self.bits == Self::EMPTY {
            let word = refill();
            self.bits = word >> 32;
            return word as u32;
        }
        let half = self.bits as u32;
        self.bits = Self::EMPTY;
        half
    }

    #[inline]
    pub fn reset(&mut self) {
        self.bits = Self::EMPTY;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == Self::EMPTY
    }
}

impl Default for IntCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The set of caches a provider keeps for its source word width.
pub trait Caches: Clone + Default {
    /// Size in bytes of the cache segment in saved state.
    const STATE_SIZE: usize;

    /// Empties every cache.
    fn reset(&mut self);

    /// Appends the cache segment encoding empty caches.
    fn write_empty(out: &mut Vec<u8>);
}

/// Caches of a 64-bit source: booleans and 32-bit halves.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cache64 {
    pub bools: BoolCache<64>,
    pub ints: IntCache,
}

impl Caches for Cache64 {
    const STATE_SIZE: usize = 16;

    fn reset(&mut self) {
        self.bools.reset();
        self.ints.reset();
    }

    fn write_empty(out: &mut Vec<u8>) {
        put_words(out, &[BoolCache::<64>::EMPTY, IntCache::EMPTY]);
    }
}

/// Caches of a 32-bit source: booleans only.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cache32 {
    pub bools: BoolCache<32>,
}

impl Caches for Cache32 {
    const STATE_SIZE: usize = 4;

    fn reset(&mut self) {
        self.bools.reset();
    }

    fn write_empty(out: &mut Vec<u8>) {
        put_words(out, &[BoolCache::<32>::EMPTY as u32]);
    }
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn booleans_come_lowest_bit_first() {
        let word: u64 = 0x8000_0000_0000_0005;
        let mut cache = BoolCache::<64>::new();
        let mut refills = 0;
        let mut bits = [false; 64];
        for b in bits.iter_mut() {
            *b = cache.next(|| { refills += 1; word });
        }
        assert_eq!(1, refills);
        assert!(cache.is_empty());
        for (i, &b) in bits.iter().enumerate() {
            assert_eq!((word >> i) & 1 == 1, b, "bit {}", i);
        }
        // The 65th boolean needs a new word.
        assert!(!cache.next(|| { refills += 1; 0 }));
        assert_eq!(2, refills);
    }

    #[test] pub fn a_32_bit_word_yields_32_booleans() {
        let mut cache = BoolCache::<32>::new();
        let mut refills = 0;
        for _ in 0 .. 32 {
            assert!(cache.next(|| { refills += 1; 0xffff_ffff }));
        }
        assert_eq!(1, refills);
        assert!(cache.is_empty());
        cache.next(|| { refills += 1; 0 });
        assert_eq!(2, refills);
        cache.reset();
        assert!(cache.is_empty());
    }

    #[test] pub fn halves_come_low_then_high() {
        let mut cache = IntCache::new();
        let mut words = [0xffff_ffff_0000_0001u64, 0x1234_5678_9abc_def0].into_iter();
        assert_eq!(1, cache.next(|| words.next().unwrap_or(0)));
        assert!(!cache.is_empty());
        assert_eq!(0xffff_ffff, cache.next(|| words.next().unwrap_or(0)));
        assert!(cache.is_empty());
        assert_eq!(0x9abc_def0, cache.next(|| words.next().unwrap_or(0)));
        cache.reset();
        assert_eq!(0, cache.next(|| 0));
    }

    #[test] pub fn empty_segments() {
        let mut out = Vec::new();
        Cache64::write_empty(&mut out);
        assert_eq!(Cache64::STATE_SIZE, out.len());
        assert_eq!(&out[0 .. 8], &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert!(out[8 ..].iter().all(|&b| b == 0xff));

        let mut out = Vec::new();
        Cache32::write_empty(&mut out);
        assert_eq!(out, [1, 0, 0, 0]);

        let mut caches = Cache64::default();
        caches.ints.next(|| 5);
        caches.bools.next(|| 5);
        caches.reset();
        assert_eq!(caches, Cache64::default());
    }
}
