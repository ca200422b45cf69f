use alloc::vec::Vec;
use core::marker::PhantomData;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words, StateCodec};
use super::distance::write_unsigned_integer_64;
use super::error::Result;
use super::lcg::get_state_64;
use super::provider::{ArbitraryJumpAhead, Provider32, Provider64, Source32, Source64};
use super::seed::{extend_seed64, SeedBytes, SeedableCore};

// Permuted congruential generators (O'Neill, 2014): a 64-bit LCG or MCG whose state is
// passed through an output permutation. The LCG can be advanced any distance in
// logarithmic time.

/// PCG multiplier.
pub const PCG_MULTIPLIER: u64 = 6364136223846793005;

/// Increment used when only the state is seeded.
pub const PCG_DEFAULT_INCREMENT: u64 = 1442695040888963407;

/// Xorshift high bits, random rotation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct XshRr;

/// Xorshift high bits, random shift.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct XshRs;

/// Output permutation from 64-bit state to a 32-bit word.
pub trait Permutation32 {
    /// Name of the LCG-based generator.
    const NAME: &'static str;
    /// Name of the MCG-based generator.
    const MCG_NAME: &'static str;
    fn permute(x: u64) -> u32;
}

impl Permutation32 for XshRr {
    const NAME: &'static str = "PcgXshRr32";
    const MCG_NAME: &'static str = "PcgMcgXshRr32";

    #[inline]
    fn permute(x: u64) -> u32 {
        let count = (x >> 59) as u32;
        (((x ^ (x >> 18)) >> 27) as u32).rotate_right(count)
    }
}

impl Permutation32 for XshRs {
    const NAME: &'static str = "PcgXshRs32";
    const MCG_NAME: &'static str = "PcgMcgXshRs32";

    #[inline]
    fn permute(x: u64) -> u32 {
        let count = (x >> 61) as u32;
        ((x ^ (x >> 22)) >> (22 + count)) as u32
    }
}

/// The 64-bit LCG shared by the PCG generators. The increment is always odd.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct PcgState {
    state: u64,
    increment: u64,
}

impl PcgState {
    /// Seeds the way the reference PCG does: the increment is `2 * stream + 1`
    /// and the first state is one step past `seed + increment`.
    #[wrappit]
    pub fn new(seed: u64, stream: u64) -> Self {
        let increment = (stream << 1) | 1;
        PcgState { state: (seed + increment) * PCG_MULTIPLIER + increment, increment }
    }

    /// Seeds the state only, using the default increment.
    #[wrappit]
    pub fn with_default_increment(seed: u64) -> Self {
        let increment = PCG_DEFAULT_INCREMENT;
        PcgState { state: (seed + increment) * PCG_MULTIPLIER + increment, increment }
    }

    /// Returns the current state and advances.
    #[wrappit]
    #[inline]
    fn step(&mut self) -> u64 {
        let x = self.state;
        self.state = x * PCG_MULTIPLIER + self.increment;
        x
    }

    fn advance(&mut self, steps: u64) {
        self.state = get_state_64(PCG_MULTIPLIER, self.increment, self.state, steps);
    }

    fn advance_by(&mut self, distance: f64) -> Result<()> {
        let mut steps = [0u64];
        write_unsigned_integer_64(distance, &mut steps)?;
        self.advance(steps[0]);
        Ok(())
    }

    /// The increment is saved halved, so a restored increment is odd again.
    fn write_words(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.state, self.increment >> 1]);
    }

    fn read_words(bytes: &[u8]) -> Result<Self> {
        let [state, half] = read_words::<u64, 2>(bytes)?;
        Ok(PcgState { state, increment: (half << 1) | 1 })
    }
}

/// PCG core with a 64-bit LCG and a 32-bit output permutation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Pcg6432Core<P> {
    lcg: PcgState,
    #[cfg_attr(feature = "serde", serde(skip))]
    permutation: PhantomData<P>,
}

pub type PcgXshRr32 = Provider32<Pcg6432Core<XshRr>>;
pub type PcgXshRs32 = Provider32<Pcg6432Core<XshRs>>;

impl<P> Pcg6432Core<P> {
    pub fn new(lcg: PcgState) -> Self {
        Pcg6432Core { lcg, permutation: PhantomData }
    }
}

impl<P: Permutation32> Source32 for Pcg6432Core<P> {
    const NAME: &'static str = P::NAME;

    #[inline]
    fn next(&mut self) -> u32 {
        P::permute(self.lcg.step())
    }
}

impl<P> ArbitraryJumpAhead for Pcg6432Core<P> {
    const LOG_PERIOD: i32 = 64;

    fn jump_ahead_by(&mut self, distance: f64) -> Result<()> {
        self.lcg.advance_by(distance)
    }

    fn jump_ahead_power_of_two(&mut self, log_distance: i32) {
        self.lcg.advance(1 << log_distance);
    }
}

impl<P> SeedableCore for Pcg6432Core<P> {
    type Word = u64;
    type Seed = SeedBytes<16>;

    /// Seed words are `[state, stream]`.
    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, 2);
        Self::new(PcgState::new(s[0], s[1]))
    }
}

impl<P> StateCodec for Pcg6432Core<P> {
    const STATE_SIZE: usize = 16;

    fn write_state(&self, out: &mut Vec<u8>) {
        self.lcg.write_words(out);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.lcg = PcgState::read_words(bytes)?;
        Ok(())
    }
}

/// PCG core with a 64-bit multiplicative generator: smaller and faster, period 2^62.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct PcgMcg6432Core<P> {
    state: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    permutation: PhantomData<P>,
}

pub type PcgMcgXshRr32 = Provider32<PcgMcg6432Core<XshRr>>;
pub type PcgMcgXshRs32 = Provider32<PcgMcg6432Core<XshRs>>;

impl<P> PcgMcg6432Core<P> {
    /// The two low bits of the state are forced to 1.
    pub fn new(state: u64) -> Self {
        PcgMcg6432Core { state: state | 3, permutation: PhantomData }
    }
}

impl<P: Permutation32> Source32 for PcgMcg6432Core<P> {
    const NAME: &'static str = P::MCG_NAME;

    #[inline]
    fn next(&mut self) -> u32 {
        let x = self.state;
        self.state = x.wrapping_mul(PCG_MULTIPLIER);
        P::permute(x)
    }
}

impl<P> ArbitraryJumpAhead for PcgMcg6432Core<P> {
    const LOG_PERIOD: i32 = 62;

    fn jump_ahead_by(&mut self, distance: f64) -> Result<()> {
        let mut steps = [0u64];
        write_unsigned_integer_64(distance, &mut steps)?;
        self.state = get_state_64(PCG_MULTIPLIER, 0, self.state, steps[0]);
        Ok(())
    }

    fn jump_ahead_power_of_two(&mut self, log_distance: i32) {
        self.state = get_state_64(PCG_MULTIPLIER, 0, self.state, 1 << log_distance);
    }
}

impl<P> SeedableCore for PcgMcg6432Core<P> {
    type Word = u64;
    type Seed = SeedBytes<8>;

    fn from_seed_words(seed: &[u64]) -> Self {
        Self::new(extend_seed64(seed, 1)[0])
    }
}

impl<P> StateCodec for PcgMcg6432Core<P> {
    const STATE_SIZE: usize = 8;

    fn write_state(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.state]);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        let [state] = read_words::<u64, 1>(bytes)?;
        self.state = state | 3;
        Ok(())
    }
}

/// PCG core with a 64-bit LCG and the random xorshift, multiply, fixed xorshift permutation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct PcgRxsMXs64Core {
    lcg: PcgState,
}

pub type PcgRxsMXs64 = Provider64<PcgRxsMXs64Core>;

impl PcgRxsMXs64Core {
    pub fn new(lcg: PcgState) -> Self {
        PcgRxsMXs64Core { lcg }
    }
}

impl Source64 for PcgRxsMXs64Core {
    const NAME: &'static str = "PcgRxsMXs64";

    #[wrappit]
    #[inline]
    fn next(&mut self) -> u64 {
        let x = self.lcg.step();
        let word = ((x >> ((x >> 59) + 5)) ^ x) * 0xaef17502108ef2d9;
        (word >> 43) ^ word
    }
}

impl ArbitraryJumpAhead for PcgRxsMXs64Core {
    const LOG_PERIOD: i32 = 64;

    fn jump_ahead_by(&mut self, distance: f64) -> Result<()> {
        self.lcg.advance_by(distance)
    }

    fn jump_ahead_power_of_two(&mut self, log_distance: i32) {
        self.lcg.advance(1 << log_distance);
    }
}

impl SeedableCore for PcgRxsMXs64Core {
    type Word = u64;
    type Seed = SeedBytes<16>;

    fn from_seed_words(seed: &[u64]) -> Self {
        let s = extend_seed64(seed, 2);
        Self::new(PcgState::new(s[0], s[1]))
    }
}

impl StateCodec for PcgRxsMXs64Core {
    const STATE_SIZE: usize = 16;

    fn write_state(&self, out: &mut Vec<u8>) {
        self.lcg.write_words(out);
    }

    fn read_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.lcg = PcgState::read_words(bytes)?;
        Ok(())
    }
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    const SEED: [u64; 2] = [0x012de1babb3c4104, 0xc8161b4202294965];
    const MCG_SEED: u64 = 0x012de1babb3c4104;

    fn check_ints<G: Source32 + SeedableCore<Word = u64>>(seed: &[u64], expected: &[u32]) {
        let mut rng = Provider32::<G>::from_seed_words(seed);
        for &e in expected {
            assert_eq!(e, rng.next_int());
        }
    }

    #[test] pub fn xsh_rr_reference() {
        check_ints::<Pcg6432Core<XshRr>>(&SEED, &[
            0xe860dd24, 0x15d339c0, 0xd9f75c46, 0x00efabb7,
            0xa625e97f, 0xcdeae599, 0x6304e667, 0xbc81be11,
        ]);
    }

    #[test] pub fn xsh_rs_reference() {
        check_ints::<Pcg6432Core<XshRs>>(&SEED, &[
            0xba4138b8, 0xd329a393, 0x75d68d3f, 0xbb7572ca,
            0x7a48d2f2, 0xcb3c1e37, 0xc1374a97, 0x7c2c5bfa,
        ]);
    }

    #[test] pub fn mcg_xsh_rr_reference() {
        check_ints::<PcgMcg6432Core<XshRr>>(&[MCG_SEED], &[
            0x25bc3e38, 0xb0693d58, 0x155b98f0, 0x047e13d7,
            0xcfb227b3, 0x66601632, 0x71c6e68b, 0x16e2d4a7,
        ]);
    }

    #[test] pub fn mcg_xsh_rs_reference() {
        check_ints::<PcgMcg6432Core<XshRs>>(&[MCG_SEED], &[
            0xb786f832, 0x6920834f, 0x5b88b399, 0x6b811447,
            0x91230c70, 0x163c83b5, 0x8dd8bba9, 0xb8bcd10a,
        ]);
    }

    #[test] pub fn rxs_m_xs_reference() {
        let expected: [u64; 8] = [
            0xc147f2291fa40ccf, 0x8edbcbf8a5f49877, 0x61e05a1d5213f0b4, 0xc039f9369032e638,
            0x95146e605b2e4a96, 0x5480af6332262d03, 0x7cbfb3a67a714557, 0x5c9f0a25eba41575,
        ];
        let mut rng = PcgRxsMXs64::from_seed_words(&SEED);
        for &e in expected.iter() {
            assert_eq!(e, rng.next_long());
        }
    }

    #[test] pub fn default_increment() {
        let stream = PCG_DEFAULT_INCREMENT >> 1;
        let mut a = PcgXshRr32::new(Pcg6432Core::new(PcgState::with_default_increment(42)));
        let mut b = PcgXshRr32::from_seed_words(&[42, stream]);
        for _ in 0 .. 10 {
            assert_eq!(a.next_int(), b.next_int());
        }
    }

    #[test] pub fn jumps_match_stepping() {
        let mut stepped = PcgXshRs32::from_seed_words(&SEED);
        let mut jumped = stepped.clone();
        let mut copy = jumped.jump_by(1000.9).unwrap();
        for _ in 0 .. 1000 {
            assert_eq!(stepped.next_int(), copy.next_int());
        }
        assert_eq!(stepped.next_int(), jumped.next_int());

        let mut stepped = PcgRxsMXs64::from_seed_words(&SEED);
        let mut jumped = stepped.clone();
        jumped.jump_power_of_two(10).unwrap();
        for _ in 0 .. 1024 {
            stepped.next_long();
        }
        assert_eq!(stepped.next_long(), jumped.next_long());

        let mut stepped = PcgMcgXshRr32::from_seed_words(&[MCG_SEED]);
        let mut jumped = stepped.clone();
        jumped.jump_by(77.0).unwrap();
        jumped.jump_power_of_two(3).unwrap();
        for _ in 0 .. 85 {
            stepped.next_int();
        }
        assert_eq!(stepped.next_int(), jumped.next_int());
    }

    #[test] pub fn full_period_jumps_return() {
        // Two half-period jumps come back to the start.
        let mut rng = PcgXshRr32::from_seed_words(&SEED);
        let mut copy = rng.jump_power_of_two(63).unwrap();
        rng.jump_by(2f64.powi(63)).unwrap();
        assert_eq!(copy.next_int(), rng.next_int());

        let mut rng = PcgMcgXshRs32::from_seed_words(&[MCG_SEED]);
        let mut copy = rng.jump_power_of_two(61).unwrap();
        rng.jump_power_of_two(61).unwrap();
        assert_eq!(copy.next_int(), rng.next_int());
    }

    #[test] pub fn jump_limits() {
        let mut rng = PcgMcgXshRr32::from_seed_words(&[MCG_SEED]);
        assert_eq!(2f64.powi(62), PcgMcgXshRr32::period());
        assert!(rng.jump_by(2f64.powi(62)).is_err());
        assert!(rng.jump_power_of_two(62).is_err());
        assert!(rng.jump_by(-1.0).is_err());
        let mut rng = PcgRxsMXs64::from_seed_words(&SEED);
        assert!(rng.jump_by(2f64.powi(64)).is_err());
        assert!(rng.jump_by(f64::NAN).is_err());
        assert!(rng.jump_power_of_two(63).is_ok());
    }

    #[test] pub fn increment_stays_odd_on_restore() {
        let rng = PcgXshRr32::from_seed_words(&SEED);
        let state = rng.save_state();
        assert_eq!(20, state.len());
        let half = u64::from_le_bytes([
            state[8], state[9], state[10], state[11], state[12], state[13], state[14], state[15],
        ]);
        assert_eq!(SEED[1] & (u64::MAX >> 1), half);

        let mut mcg = PcgMcgXshRr32::from_seed_words(&[MCG_SEED]);
        let mut bytes = mcg.save_state();
        bytes[0] &= !3;
        let mut other = mcg.clone();
        other.restore_state(&bytes).unwrap();
        assert_eq!(mcg.next_int(), other.next_int());
    }
}
