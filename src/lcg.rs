use alloc::vec::Vec;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::codec::{put_words, read_words};
use super::error::Result;
use super::wide::{unsigned_add_high, unsigned_multiply_high};

// Linear congruential generators: state <- state * m + p.
// The LXM sub-states below use multipliers from Steele, G. and Vigna, S.,
// Computationally Easy, Spectrally Good Multipliers for
// Congruential Pseudorandom Number Generators (2020).

/// 64-bit LCG multiplier.
pub const M64: u64 = 0xd1342543de82ef95;
/// Multiplier advancing a 64-bit LCG by 2^32 steps.
pub const M64P: u64 = 0x8d23804c00000001;
/// Additive factor advancing a 64-bit LCG by 2^32 steps: `state' = M64P * state + C64P * add`.
pub const C64P: u64 = 0x16691c9700000000;

/// Low half of the 128-bit LCG multiplier `2^64 + M128L`.
pub const M128L: u64 = 0xd605bbb58c8abbfd;
/// High half of the multiplier advancing a 128-bit LCG by 2^64 steps. The low half is 1.
pub const M128PH: u64 = 0x31f179f5224754f4;
/// High half of the additive factor advancing a 128-bit LCG by 2^64 steps. The low half is 0.
pub const C128PH: u64 = 0x61139b28883277c3;

/// 32-bit LCG multiplier.
pub const M32: u32 = 0xadb4a92d;
/// Multiplier advancing a 32-bit LCG by 2^16 steps.
pub const M32P: u32 = 0x65640001;
/// Additive factor advancing a 32-bit LCG by 2^16 steps.
pub const C32P: u32 = 0x046b0000;

/// LCG iteration is state <- state * m + p.
/// Returns the (m, p) pair that iterates by n steps at once.
/// Assumes (m, p) is full period.
#[wrappit]
pub fn get_jump(m: u128, p: u128, n: u128) -> (u128, u128) {
    // Algorithm from Brown, F. B., "Random Number Generation with Arbitrary Stride",
    // Transactions of the American Nuclear Society, 1994.
    let mut unit_m = m;
    let mut unit_p = p;
    let mut jump_m: u128 = 1;
    let mut jump_p: u128 = 0;
    let mut delta = n;

    while delta > 0 {
        if delta & 1 == 1 {
            jump_m = jump_m * unit_m;
            jump_p = jump_p * unit_m + unit_p;
        }
        unit_p = (unit_m + 1) * unit_p;
        unit_m *= unit_m;
        delta >>= 1;
    }
    (jump_m, jump_p)
}

/// LCG iteration is state <- state * m + p.
/// Returns state after the specified number of iterations from the origin state.
#[wrappit]
pub fn get_state(m: u128, p: u128, origin: u128, iterations: u128) -> u128 {
    let mut jump_m = m;
    let mut jump_p = p;
    let mut state = origin;
    let mut ordinal = iterations;

    while ordinal > 0 {
        if ordinal & 1 == 1 {
            state = state * jump_m + jump_p;
        }
        jump_p = (jump_m + 1) * jump_p;
        jump_m *= jump_m;
        ordinal >>= 1;
    }
    state
}

/// `get_state` modulo 2^64. The low 64 bits of the 128-bit iteration only depend on
/// the low 64 bits of its inputs.
pub fn get_state_64(m: u64, p: u64, origin: u64, iterations: u64) -> u64 {
    get_state(m as u128, p as u128, origin as u128, iterations as u128) as u64
}

/// 32-bit LCG with multiplier `M32`. The additive parameter is always odd.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Lcg32 {
    add: u32,
    state: u32,
}

impl Lcg32 {
    pub fn new(add: u32, state: u32) -> Self {
        Lcg32 { add: add | 1, state }
    }

    /// Current state, the word fed to the mixer.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    #[wrappit]
    #[inline]
    pub fn cycle(&mut self) {
        self.state = M32 * self.state + self.add;
    }

    /// Advances 2^16 steps.
    #[wrappit]
    pub fn long_cycle(&mut self) {
        self.state = M32P * self.state + C32P * self.add;
    }

    /// Appends `[add, state]`.
    pub fn write_words(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.add, self.state]);
    }

    pub fn read_words(bytes: &[u8]) -> Result<Self> {
        let [add, state] = read_words::<u32, 2>(bytes)?;
        Ok(Self::new(add, state))
    }
}

/// 64-bit LCG with multiplier `M64`. The additive parameter is always odd.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Lcg64 {
    add: u64,
    state: u64,
}

impl Lcg64 {
    pub fn new(add: u64, state: u64) -> Self {
        Lcg64 { add: add | 1, state }
    }

    #[inline]
    pub fn state(&self) -> u64 {
        self.state
    }

    #[wrappit]
    #[inline]
    pub fn cycle(&mut self) {
        self.state = M64 * self.state + self.add;
    }

    /// Advances 2^32 steps.
    #[wrappit]
    pub fn long_cycle(&mut self) {
        self.state = M64P * self.state + C64P * self.add;
    }

    /// Appends `[add, state]`.
    pub fn write_words(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.add, self.state]);
    }

    pub fn read_words(bytes: &[u8]) -> Result<Self> {
        let [add, state] = read_words::<u64, 2>(bytes)?;
        Ok(Self::new(add, state))
    }
}

/// 128-bit LCG with multiplier `2^64 + M128L`, held as 64-bit halves.
/// The low half of the additive parameter is always odd.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct Lcg128 {
    add_hi: u64,
    add_lo: u64,
    state_hi: u64,
    state_lo: u64,
}

impl Lcg128 {
    pub fn new(add_hi: u64, add_lo: u64, state_hi: u64, state_lo: u64) -> Self {
        Lcg128 { add_hi, add_lo: add_lo | 1, state_hi, state_lo }
    }

    /// High half of the state, the word fed to the mixer.
    #[inline]
    pub fn state_hi(&self) -> u64 {
        self.state_hi
    }

    #[inline]
    pub fn state_lo(&self) -> u64 {
        self.state_lo
    }

    #[wrappit]
    #[inline]
    pub fn cycle(&mut self) {
        let sh = self.state_hi;
        let sl = self.state_lo;
        let u = M128L * sl;
        // The 2^64 term of the multiplier contributes sl to the high half.
        self.state_hi = M128L * sh + unsigned_multiply_high(M128L, sl) + sl + self.add_hi
            + unsigned_add_high(u, self.add_lo);
        self.state_lo = u + self.add_lo;
    }

    /// Advances 2^64 steps. Only the high half changes.
    #[wrappit]
    pub fn long_cycle(&mut self) {
        self.state_hi = self.state_hi + M128PH * self.state_lo + C128PH * self.add_lo;
    }

    /// Appends `[add_hi, add_lo, state_hi, state_lo]`.
    pub fn write_words(&self, out: &mut Vec<u8>) {
        put_words(out, &[self.add_hi, self.add_lo, self.state_hi, self.state_lo]);
    }

    pub fn read_words(bytes: &[u8]) -> Result<Self> {
        let [add_hi, add_lo, state_hi, state_lo] = read_words::<u64, 4>(bytes)?;
        Ok(Self::new(add_hi, add_lo, state_hi, state_lo))
    }
}

#[cfg(test)] mod tests {
    use super::*;

    // Iterations from `origin` to `state`, rebuilt one bit at a time, lowest first.
    #[wrappit]
    fn get_iterations(m: u128, p: u128, origin: u128, state: u128) -> u128 {
        let mut jump_m = m;
        let mut jump_p = p;
        let mut ordinal: u128 = 0;
        let mut bit: u128 = 1;
        let mut address = origin;

        while address != state {
            if (bit & address) != (bit & state) {
                address = address * jump_m + jump_p;
                ordinal = ordinal + bit;
            }
            jump_p = (jump_m + 1) * jump_p;
            jump_m *= jump_m;
            bit <<= 1;
        }
        ordinal
    }

    const M128: u128 = (1 << 64) + M128L as u128;

    fn join(hi: u64, lo: u64) -> u128 {
        ((hi as u128) << 64) | lo as u128
    }

    #[test] pub fn jump_parameters_agree_with_stepping() {
        let mut r: u128 = 0;
        let mut rnd = || -> u128 { r = r.wrapping_mul(M128).wrapping_add(0xffff); r };

        for _ in 0 .. 1 << 12 {
            let m = match rnd() % 3 { 0 => M128, 1 => M64 as u128, _ => M32 as u128 };
            let p = rnd() | 1;
            let origin = rnd();
            assert_eq!(origin.wrapping_mul(m).wrapping_add(p), get_state(m, p, origin, 1));

            let n = rnd() >> (rnd() % 128);
            let state = get_state(m, p, origin, n);
            let (m_total, p_total) = get_jump(m, p, n);
            assert_eq!(state, origin.wrapping_mul(m_total).wrapping_add(p_total));

            assert_eq!(n, get_iterations(m, p, origin, state));

            // Jumps compose.
            let h = n & rnd();
            let state_h = get_state(m, p, origin, h);
            assert_eq!(state, get_state(m, p, state_h, n - h));
            assert_eq!(n - h, get_iterations(m, p, state_h, state));

            let n64 = n as u64;
            assert_eq!(get_state(m, p, origin, n64 as u128) as u64, get_state_64(m as u64, p as u64, origin as u64, n64));
        }
    }

    #[test] pub fn long_jump_constants() {
        let (m, c) = get_jump(M64 as u128, 1, 1 << 32);
        assert_eq!((M64P, C64P), (m as u64, c as u64));

        let (m, c) = get_jump(M128, 1, 1 << 64);
        assert_eq!(join(M128PH, 1), m);
        assert_eq!(join(C128PH, 0), c);

        let (m, c) = get_jump(M32 as u128, 1, 1 << 16);
        assert_eq!((M32P, C32P), (m as u32, c as u32));
    }

    #[test] pub fn lcg128_matches_native_arithmetic() {
        let mut r: u128 = 1;
        let mut rnd = || -> u128 { r = r.wrapping_mul(M128).wrapping_add(0x1234_5678_9abc_def1); r };
        for _ in 0 .. 1000 {
            let add = rnd();
            let origin = rnd();
            let mut lcg = Lcg128::new((add >> 64) as u64, add as u64, (origin >> 64) as u64, origin as u64);
            let add = add | 1;
            let mut s = origin;
            for _ in 0 .. 4 {
                assert_eq!((s >> 64) as u64, lcg.state_hi());
                lcg.cycle();
                s = s.wrapping_mul(M128).wrapping_add(add);
            }
            lcg.long_cycle();
            let s = get_state(M128, add, s, 1 << 64);
            assert_eq!((s >> 64) as u64, lcg.state_hi());
            assert_eq!(s as u64, lcg.state_lo());
        }
    }

    #[test] pub fn small_lcg_long_cycles() {
        let mut lcg = Lcg64::new(0x2249232b631c5a32, 0x6231564c7b67752e);
        assert_eq!(0x2249232b631c5a33, lcg.add);
        let expected = get_state_64(M64, lcg.add, lcg.state(), 1 << 32);
        lcg.long_cycle();
        assert_eq!(expected, lcg.state());
        let expected = lcg.state().wrapping_mul(M64).wrapping_add(lcg.add);
        lcg.cycle();
        assert_eq!(expected, lcg.state());

        let mut a = Lcg32::new(0x1234, 0xdeadbeef);
        let mut b = a.clone();
        for _ in 0 .. 1 << 16 {
            a.cycle();
        }
        b.long_cycle();
        assert_eq!(a.state(), b.state());

        let mut out = Vec::new();
        b.write_words(&mut out);
        assert_eq!(&out[0 .. 4], &0x1235u32.to_le_bytes());
    }
}
