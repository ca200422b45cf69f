use alloc::vec::Vec;

use super::error::{Result, RngError};
use super::word::Word;

// State is serialized as a concatenation of fixed-size segments, outermost layer first,
// with every word in little-endian order. A layer writes its own words and then
// delegates to the layer it holds; restoring peels segments off the front in the same order.

/// Byte-exact save and restore of one structural layer.
pub trait StateCodec {
    /// Size of the encoded state in bytes.
    const STATE_SIZE: usize;

    /// Appends the encoded state.
    fn write_state(&self, out: &mut Vec<u8>);

    /// Replaces the state from exactly `STATE_SIZE` bytes.
    fn read_state(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Splits `state` into the local segment of `local` bytes and the remainder.
pub fn split_state(state: &[u8], local: usize) -> Result<(&[u8], &[u8])> {
    if state.len() < local {
        return Err(RngError::state_size(local, state.len()));
    }
    Ok(state.split_at(local))
}

/// Fails unless `state` is exactly `expected` bytes long.
pub fn check_state_size(state: &[u8], expected: usize) -> Result<()> {
    if state.len() != expected {
        return Err(RngError::state_size(expected, state.len()));
    }
    Ok(())
}

/// Appends little-endian words.
pub fn put_words<W: Word>(out: &mut Vec<u8>, words: &[W]) {
    for &w in words {
        w.put_le(out);
    }
}

/// Decodes exactly `N` little-endian words.
pub fn read_words<W: Word, const N: usize>(bytes: &[u8]) -> Result<[W; N]> {
    check_state_size(bytes, N * W::BYTES)?;
    let mut words = [W::default(); N];
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(W::BYTES)) {
        *w = W::from_le_slice(chunk);
    }
    Ok(words)
}

/// Decodes as many whole little-endian words as `bytes` holds.
pub fn words_from_le<W: Word>(bytes: &[u8]) -> Vec<W> {
    bytes.chunks_exact(W::BYTES).map(W::from_le_slice).collect()
}
