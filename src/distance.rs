use super::error::{Result, RngError};

// Jump distances are given as f64 so that periods far beyond 2^64 can be addressed.
// Every f64 at or above 2^53 is an integer, so the value maps to an exact
// multi-word unsigned integer: the significand shifted left by the exponent.

const TWO_POW_63: f64 = 9223372036854775808.0;
const MANTISSA_MASK: u64 = 0x000f_ffff_ffff_ffff;
/// Unbiased exponent of an infinity or NaN after subtracting the significand width.
const NON_FINITE_EXPONENT: i32 = 972;

/// Checks `0 <= distance < period`. NaN fails.
pub fn validate_jump(distance: f64, period: f64) -> Result<()> {
    if distance < period && distance >= 0.0 {
        Ok(())
    } else {
        Err(RngError::InvalidJumpDistance { distance, period })
    }
}

/// Checks that a jump of `2^log_distance` is shorter than the period `2^log_period`.
/// Negative logarithms pass; they denote an empty jump.
pub fn validate_jump_power_of_two(log_distance: i32, log_period: i32) -> Result<()> {
    if log_distance >= log_period {
        return Err(RngError::InvalidLogJumpDistance { log_distance, log_period });
    }
    Ok(())
}

/// Returns `(integer, shift)` with `floor(value) == integer * 2^shift`.
fn decompose(value: f64) -> Result<(u64, u32)> {
    if value < TWO_POW_63 {
        // Truncation toward zero maps (-1, 0) to 0, as an integer conversion would.
        let a = value as i64;
        if a < 0 {
            return Err(RngError::InvalidDistanceValue(value));
        }
        return Ok((a as u64, 0));
    }
    let bits = value.to_bits();
    let exponent = (bits >> 52) as i32 - 1075;
    if exponent == NON_FINITE_EXPONENT {
        return Err(RngError::InvalidDistanceValue(value));
    }
    let significand = (bits & MANTISSA_MASK) | (1 << 52);
    Ok((significand, exponent as u32))
}

/// Exact `2^log` for `log` in `-1022 ..= 1023`.
pub fn power_of_two(log: i32) -> f64 {
    f64::from_bits(((log + 1023) as u64) << 52)
}

/// Writes `floor(value)` into `result`, least significant word first.
/// Every word the value's significand spans is overwritten, zero or not; bits beyond the
/// last word are dropped.
pub fn write_unsigned_integer_64(value: f64, result: &mut [u64]) -> Result<()> {
    let (integer, exponent) = decompose(value)?;
    let offset = (exponent / 64) as usize;
    let shift = exponent % 64;
    let wide = (integer as u128) << shift;
    // A 53-bit significand reaches the next word once shifted past bit 11.
    let words = if shift > 11 { 2 } else { 1 };
    for i in 0 .. words {
        if let Some(slot) = result.get_mut(offset + i) {
            *slot = (wide >> (64 * i)) as u64;
        }
    }
    Ok(())
}

/// Writes `floor(value)` into 32-bit words, least significant first.
pub fn write_unsigned_integer_32(value: f64, result: &mut [u32]) -> Result<()> {
    let (integer, exponent) = decompose(value)?;
    let offset = (exponent / 32) as usize;
    let shift = exponent % 32;
    let wide = (integer as u128) << shift;
    let words = if shift > 11 { 3 } else { 2 };
    for i in 0 .. words {
        if let Some(slot) = result.get_mut(offset + i) {
            *slot = (wide >> (32 * i)) as u32;
        }
    }
    Ok(())
}
