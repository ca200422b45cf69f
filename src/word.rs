use core::ops::BitXorAssign;

/// Unsigned machine word a generator is built from.
pub trait Word: Copy + Default + Eq + BitXorAssign + core::fmt::Debug {
    /// Number of bits in the word.
    const BITS: u32;
    /// Number of bytes in the little-endian encoding.
    const BYTES: usize;

    /// Returns whether bit `i` is set.
    fn bit(self, i: u32) -> bool;

    /// Decodes a word from exactly `Self::BYTES` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Appends the little-endian encoding of the word.
    fn put_le(self, out: &mut alloc::vec::Vec<u8>);
}

impl Word for u64 {
    const BITS: u32 = 64;
    const BYTES: usize = 8;

    #[inline]
    fn bit(self, i: u32) -> bool {
        (self >> i) & 1 == 1
    }

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        let mut b = [0u8; 8];
        b.copy_from_slice(bytes);
        u64::from_le_bytes(b)
    }

    #[inline]
    fn put_le(self, out: &mut alloc::vec::Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Word for u32 {
    const BITS: u32 = 32;
    const BYTES: usize = 4;

    #[inline]
    fn bit(self, i: u32) -> bool {
        (self >> i) & 1 == 1
    }

    #[inline]
    fn from_le_slice(bytes: &[u8]) -> Self {
        let mut b = [0u8; 4];
        b.copy_from_slice(bytes);
        u32::from_le_bytes(b)
    }

    #[inline]
    fn put_le(self, out: &mut alloc::vec::Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}
