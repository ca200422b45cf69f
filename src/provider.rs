use alloc::vec::Vec;
use core::marker::PhantomData;
use log::{debug, trace};
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::cache::{Cache32, Cache64, Caches};
use super::codec::{check_state_size, split_state, words_from_le, StateCodec};
use super::distance::{power_of_two, validate_jump, validate_jump_power_of_two};
use super::error::{Result, RngError};
use super::seed::{create_stream_seed, SeedableCore};
use super::{Error, RngCore, SeedableRng};

// A core is a bare state transition with its state. A provider wraps one core with the
// caches for its word width and derives the full generator surface from it: bounded
// integers, floats, bytes, jumps, splits and state save/restore.

/// A core producing 64-bit words.
pub trait Source64 {
    /// Name used in diagnostics.
    const NAME: &'static str;
    fn next(&mut self) -> u64;
}

/// A core producing 32-bit words.
pub trait Source32 {
    /// Name used in diagnostics.
    const NAME: &'static str;
    fn next(&mut self) -> u32;
}

/// Core able to advance by its fixed jump distance.
pub trait JumpAhead {
    fn jump_ahead(&mut self);
}

/// Core able to advance by its fixed long jump distance.
pub trait LongJumpAhead {
    fn long_jump_ahead(&mut self);
}

/// Core able to advance by any distance below its period.
pub trait ArbitraryJumpAhead {
    /// Base-2 logarithm of the period.
    const LOG_PERIOD: i32;

    /// Advances by `distance` outputs. The distance has been validated against the period.
    fn jump_ahead_by(&mut self, distance: f64) -> Result<()>;

    /// Advances by `2^log_distance` outputs, where `0 <= log_distance < LOG_PERIOD`.
    fn jump_ahead_power_of_two(&mut self, log_distance: i32);
}

/// Core constructible from a split seed plus further words drawn from a source.
pub trait SplitCore: Sized {
    fn create<R: RngCore + ?Sized>(seed: u64, source: &mut R) -> Self;
}

/// Generator that can jump ahead by a fixed distance.
pub trait Jumpable: Sized {
    /// Returns a copy of the current generator and advances this one by the jump distance.
    fn jump(&mut self) -> Self;

    /// Yields `count` copies, advancing this generator by one jump after each.
    fn jumps(&mut self, count: usize) -> Jumps<'_, Self> {
        Jumps { rng: self, remaining: count, step: Self::jump }
    }
}

/// Generator that can jump ahead by a fixed distance far beyond its ordinary jump.
pub trait LongJumpable: Jumpable {
    /// Returns a copy of the current generator and advances this one by the long jump distance.
    fn long_jump(&mut self) -> Self;

    /// Yields `count` copies, advancing this generator by one long jump after each.
    fn long_jumps(&mut self, count: usize) -> Jumps<'_, Self> {
        Jumps { rng: self, remaining: count, step: Self::long_jump }
    }
}

/// Generator that can jump ahead by any distance below its period.
pub trait ArbitrarilyJumpable: Sized {
    /// Base-2 logarithm of the period.
    const LOG_PERIOD: i32;

    /// Period of the output sequence.
    fn period() -> f64 {
        power_of_two(Self::LOG_PERIOD)
    }

    /// Returns a copy of the current generator and advances this one by `distance` outputs.
    /// The fractional part of the distance is ignored.
    fn jump_by(&mut self, distance: f64) -> Result<Self>;

    /// Returns a copy of the current generator and advances this one by `2^log_distance` outputs.
    /// A negative `log_distance` leaves the sequence where it is.
    fn jump_power_of_two(&mut self, log_distance: i32) -> Result<Self>;

    /// Yields `count` copies, advancing this generator by `distance` after each.
    fn jumps_by(&mut self, count: usize, distance: f64) -> Result<JumpsBy<'_, Self>> {
        validate_jump(distance, Self::period())?;
        Ok(JumpsBy { rng: self, remaining: count, distance })
    }
}

/// Generator that can create statistically independent children.
pub trait Splittable: Sized {
    /// Creates a generator from a split seed, drawing the remaining state from `source`.
    fn from_split_seed<R: RngCore + ?Sized>(seed: u64, source: &mut R) -> Self;

    /// Creates a new generator of this type seeded from `source`.
    fn split_from<R: RngCore + ?Sized>(&self, source: &mut R) -> Self {
        let seed = source.next_u64();
        Self::from_split_seed(seed, source)
    }

    /// Creates a new generator of this type using this generator as the source.
    fn split(&mut self) -> Self where Self: RngCore {
        let seed = self.next_u64();
        Self::from_split_seed(seed, self)
    }

    /// Yields `count` generators whose split seeds are unique within the stream.
    fn splits<'a, R: RngCore + ?Sized>(&self, count: usize, source: &'a mut R) -> Splits<'a, Self, R> {
        let seed = create_stream_seed(source);
        Splits { source, position: 0, end: count as u64, seed, marker: PhantomData }
    }
}

/// Iterator of copies separated by a fixed jump.
pub struct Jumps<'a, G> {
    rng: &'a mut G,
    remaining: usize,
    step: fn(&mut G) -> G,
}

impl<'a, G> Iterator for Jumps<'a, G> {
    type Item = G;

    fn next(&mut self) -> Option<G> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some((self.step)(&mut *self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator of copies separated by an arbitrary, pre-validated jump.
pub struct JumpsBy<'a, G> {
    rng: &'a mut G,
    remaining: usize,
    distance: f64,
}

impl<'a, G: ArbitrarilyJumpable> Iterator for JumpsBy<'a, G> {
    type Item = G;

    fn next(&mut self) -> Option<G> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.rng.jump_by(self.distance).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator of split generators.
pub struct Splits<'a, G, R: ?Sized> {
    source: &'a mut R,
    position: u64,
    end: u64,
    seed: u64,
    marker: PhantomData<fn() -> G>,
}

/// Bits per character of a stream seed.
const SEED_CHAR_BITS: u32 = 4;

impl<'a, G: Splittable, R: RngCore + ?Sized> Iterator for Splits<'a, G, R> {
    type Item = G;

    fn next(&mut self) -> Option<G> {
        let position = self.position;
        if position >= self.end {
            return None;
        }
        self.position = position + 1;
        let child = G::from_split_seed(self.seed | position, &mut *self.source);
        // Keep the unique character of the seed above the position bits.
        if self.position & self.seed != 0 {
            self.seed <<= SEED_CHAR_BITS;
        }
        Some(child)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.position) as usize;
        (n, Some(n))
    }
}

/// A core together with the caches of its word width.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Provider<G, C> {
    core: G,
    cache: C,
}

/// Provider of a 64-bit core.
pub type Provider64<G> = Provider<G, Cache64>;

/// Provider of a 32-bit core.
pub type Provider32<G> = Provider<G, Cache32>;

// The Debug implementations do not expose internal state.
impl<G: Source64> core::fmt::Debug for Provider<G, Cache64> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} {{}}", G::NAME)
    }
}

impl<G: Source32> core::fmt::Debug for Provider<G, Cache32> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} {{}}", G::NAME)
    }
}

impl<G, C: Caches> Provider<G, C> {
    /// Wraps a core with empty caches.
    pub fn new(core: G) -> Self {
        Provider { core, cache: C::default() }
    }

    /// The wrapped core.
    pub fn core(&self) -> &G {
        &self.core
    }

    #[inline]
    fn reset_caches(&mut self) {
        self.cache.reset();
    }
}

impl<G: SeedableCore, C: Caches> Provider<G, C> {
    /// Creates a generator from seed words. Short seeds are expanded.
    pub fn from_seed_words(seed: &[G::Word]) -> Self {
        Self::new(G::from_seed_words(seed))
    }
}

impl<G: StateCodec, C: Caches> Provider<G, C> {
    /// Size of the saved state in bytes.
    pub const STATE_SIZE: usize = G::STATE_SIZE + C::STATE_SIZE;

    /// Encodes the state as `[core][caches]`. The caches are always written empty.
    pub fn save_state(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::STATE_SIZE);
        self.core.write_state(&mut out);
        C::write_empty(&mut out);
        out
    }

    /// Restores a state produced by `save_state`. Nothing changes when the size is wrong.
    pub fn restore_state(&mut self, state: &[u8]) -> Result<()> {
        if let Err(error) = check_state_size(state, Self::STATE_SIZE) {
            debug!("{}: restore rejected: {}", core::any::type_name::<G>(), error);
            return Err(error);
        }
        let (core, _) = split_state(state, G::STATE_SIZE)?;
        self.core.read_state(core)?;
        self.reset_caches();
        Ok(())
    }
}

/// Draws from `[0, n)` with Lemire's nearly divisionless method.
#[inline]
fn bounded_u32<F: FnMut() -> u32>(n: u32, mut next: F) -> Result<u32> {
    if n == 0 {
        return Err(RngError::InvalidBound(0));
    }
    let mut m = next() as u64 * n as u64;
    let mut l = m as u32;
    if l < n {
        let t = n.wrapping_neg() % n;
        while l < t {
            m = next() as u64 * n as u64;
            l = m as u32;
        }
    }
    Ok((m >> 32) as u32)
}

/// 64-bit counterpart of `bounded_u32` with a 128-bit product.
#[inline]
fn bounded_u64<F: FnMut() -> u64>(n: u64, mut next: F) -> Result<u64> {
    if n == 0 {
        return Err(RngError::InvalidBound(0));
    }
    let mut m = next() as u128 * n as u128;
    let mut l = m as u64;
    if l < n {
        let t = n.wrapping_neg() % n;
        while l < t {
            m = next() as u128 * n as u128;
            l = m as u64;
        }
    }
    Ok((m >> 64) as u64)
}

const DOUBLE_MULTIPLIER: f64 = 1.0 / (1u64 << 53) as f64;
const FLOAT_MULTIPLIER: f32 = 1.0 / (1u32 << 24) as f32;

impl<G: Source64> Provider<G, Cache64> {
    #[inline]
    pub fn next_long(&mut self) -> u64 {
        self.core.next()
    }

    /// Returns the low half of a fresh word, then the high half of the same word.
    #[inline]
    pub fn next_int(&mut self) -> u32 {
        self.cache.ints.next(|| self.core.next())
    }

    #[inline]
    pub fn next_boolean(&mut self) -> bool {
        self.cache.bools.next(|| self.core.next())
    }

    /// Uniform in `[0, 1)` from the top 53 bits of one word.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        (self.next_long() >> 11) as f64 * DOUBLE_MULTIPLIER
    }

    /// Uniform in `[0, 1)` from the top 24 bits of `next_int`.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        (self.next_int() >> 8) as f32 * FLOAT_MULTIPLIER
    }

    pub fn next_int_below(&mut self, n: u32) -> Result<u32> {
        bounded_u32(n, || self.next_int())
    }

    pub fn next_long_below(&mut self, n: u64) -> Result<u64> {
        bounded_u64(n, || self.core.next())
    }

    /// Fills `dest` little-endian, one word per 8 bytes; a partial tail uses the low bytes of one more word.
    pub fn next_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.core.next().to_le_bytes());
        }
        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            let n = tail.len();
            tail.copy_from_slice(&self.core.next().to_le_bytes()[0 .. n]);
        }
    }
}

impl<G: Source32> Provider<G, Cache32> {
    #[inline]
    pub fn next_int(&mut self) -> u32 {
        self.core.next()
    }

    /// Two consecutive words, the first one high.
    #[inline]
    pub fn next_long(&mut self) -> u64 {
        let high = self.core.next() as u64;
        let low = self.core.next() as u64;
        (high << 32) | low
    }

    #[inline]
    pub fn next_boolean(&mut self) -> bool {
        self.cache.bools.next(|| self.core.next() as u64)
    }

    /// Uniform in `[0, 1)` from 27 bits of one word and 26 bits of the next.
    #[inline]
    pub fn next_double(&mut self) -> f64 {
        let high = ((self.core.next() >> 6) as u64) << 27;
        let low = (self.core.next() >> 5) as u64;
        (high | low) as f64 * DOUBLE_MULTIPLIER
    }

    #[inline]
    pub fn next_float(&mut self) -> f32 {
        (self.core.next() >> 8) as f32 * FLOAT_MULTIPLIER
    }

    pub fn next_int_below(&mut self, n: u32) -> Result<u32> {
        bounded_u32(n, || self.core.next())
    }

    pub fn next_long_below(&mut self, n: u64) -> Result<u64> {
        bounded_u64(n, || self.next_long())
    }

    /// Fills `dest` little-endian, one word per 4 bytes; a partial tail uses the low bytes of one more word.
    pub fn next_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(4);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.core.next().to_le_bytes());
        }
        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            let n = tail.len();
            tail.copy_from_slice(&self.core.next().to_le_bytes()[0 .. n]);
        }
    }
}

impl<G: Source64> RngCore for Provider<G, Cache64> {
    fn next_u32(&mut self) -> u32 {
        self.next_int()
    }

    fn next_u64(&mut self) -> u64 {
        self.next_long()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.next_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}

impl<G: Source32> RngCore for Provider<G, Cache32> {
    fn next_u32(&mut self) -> u32 {
        self.next_int()
    }

    fn next_u64(&mut self) -> u64 {
        self.next_long()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.next_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}

impl<G: SeedableCore, C: Caches> SeedableRng for Provider<G, C> {
    type Seed = G::Seed;

    /// Creates a generator from the native seed words in little-endian byte order.
    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_seed_words(&words_from_le::<G::Word>(seed.as_ref()))
    }
}

impl<G: JumpAhead + Clone, C: Caches> Jumpable for Provider<G, C> {
    fn jump(&mut self) -> Self {
        let copy = self.clone();
        self.core.jump_ahead();
        self.reset_caches();
        trace!("{}: jump", core::any::type_name::<G>());
        copy
    }
}

impl<G: JumpAhead + LongJumpAhead + Clone, C: Caches> LongJumpable for Provider<G, C> {
    fn long_jump(&mut self) -> Self {
        let copy = self.clone();
        self.core.long_jump_ahead();
        self.reset_caches();
        trace!("{}: long jump", core::any::type_name::<G>());
        copy
    }
}

impl<G: ArbitraryJumpAhead + Clone, C: Caches> ArbitrarilyJumpable for Provider<G, C> {
    const LOG_PERIOD: i32 = G::LOG_PERIOD;

    fn jump_by(&mut self, distance: f64) -> Result<Self> {
        validate_jump(distance, Self::period())?;
        let copy = self.clone();
        self.core.jump_ahead_by(distance)?;
        self.reset_caches();
        trace!("{}: jump by {}", core::any::type_name::<G>(), distance);
        Ok(copy)
    }

    fn jump_power_of_two(&mut self, log_distance: i32) -> Result<Self> {
        validate_jump_power_of_two(log_distance, G::LOG_PERIOD)?;
        let copy = self.clone();
        if log_distance >= 0 {
            self.core.jump_ahead_power_of_two(log_distance);
        }
        self.reset_caches();
        trace!("{}: jump by 2^{}", core::any::type_name::<G>(), log_distance);
        Ok(copy)
    }
}

impl<G: SplitCore, C: Caches> Splittable for Provider<G, C> {
    fn from_split_seed<R: RngCore + ?Sized>(seed: u64, source: &mut R) -> Self {
        trace!("{}: split", core::any::type_name::<G>());
        Self::new(G::create(seed, source))
    }
}
