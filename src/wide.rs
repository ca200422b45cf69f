use wrapping_arithmetic::wrappit;

// 128-bit unsigned arithmetic assembled from 64-bit operations.
// The 128-bit LCG keeps its state, multiplier and increment as (high, low) word pairs,
// so every step needs the high half of a 64x64 product and the carry out of a 64-bit add.

const MASK32: u64 = 0xffff_ffff;

/// Returns the high 64 bits of the unsigned 128-bit product `value1 * value2`.
#[wrappit]
#[inline]
pub fn unsigned_multiply_high(value1: u64, value2: u64) -> u64 {
    let a = value1 >> 32;
    let b = value1 & MASK32;
    let x = value2 >> 32;
    let y = value2 & MASK32;

    let by = b * y;
    let bx = b * x;
    let ay = a * y;
    let ax = a * x;

    // Middle column. Bounded by 2^64 - 1 so it cannot overflow.
    let carry = (by >> 32) + (bx & MASK32) + ay;
    (bx >> 32) + (carry >> 32) + ax
}

/// Returns 1 if the unsigned sum `left + right` overflows 64 bits, otherwise 0.
#[wrappit]
#[inline]
pub fn unsigned_add_high(left: u64, right: u64) -> u64 {
    ((left >> 1) + (right >> 1) + (left & right & 1)) >> 63
}
