//! Canonical 32-bit bit operations
//!
//! Each operation takes and returns a signed 32-bit word and computes what the
//! matching hardware instruction would, using only the helpers in
//! [`crate::math`].
//!
//! Shift amounts follow one contract throughout: a negative amount shifts the
//! other way, and the remaining magnitude is reduced modulo 32.
//!
//! `b_shr` is a logical (zero-filling) shift of the 32-bit pattern, even though
//! the result is read back as signed: `b_shr(-8, 1)` is `2147483644`, not `-4`.
//! The sign-extending variant is available separately as [`b_sar`].

use crate::error::BitwzError;
use crate::math::{floor_div, modulo, pow2, tobit, MOD, MODM, POW2, WORD_BITS};

/// Bit carrying weight `weight` (a power of two) in `value`: 0 or 1.
/// Correct for negative values because the division floors.
#[inline]
fn bit_at(value: i64, weight: i64) -> i64 {
    modulo(floor_div(value, weight), 2)
}

/// Reduce a shift amount modulo `bits`. The result is in `[0, bits)`; the
/// bit-position precondition is enforced where it indexes the `pow2` table.
pub(crate) fn reduce_shift(shift: i64, bits: u32) -> u32 {
    modulo(shift, i64::from(bits)) as u32
}

/// Unwrap a shift result, failing fast on a precondition violation.
pub(crate) fn or_panic<T>(result: Result<T, BitwzError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

// ============================================================================
// AND / OR (positional bit extraction)
// ============================================================================

/// Bitwise AND: a result bit is set only where both operands have it set.
pub fn b_and(left: i32, right: i32) -> i32 {
    let (left, right) = (i64::from(left), i64::from(right));
    let mut result: u32 = 0;
    for &weight in POW2.iter() {
        let w = i64::from(weight);
        if bit_at(left, w) == 1 && bit_at(right, w) == 1 {
            result += weight;
        }
    }
    tobit(i64::from(result))
}

/// Bitwise OR: a result bit is set where either operand has it set.
pub fn b_or(left: i32, right: i32) -> i32 {
    let (left, right) = (i64::from(left), i64::from(right));
    let mut result: u32 = 0;
    for &weight in POW2.iter() {
        let w = i64::from(weight);
        if bit_at(left, w) == 1 || bit_at(right, w) == 1 {
            result += weight;
        }
    }
    tobit(i64::from(result))
}

// ============================================================================
// XOR (bit consumption)
// ============================================================================

/// Bitwise exclusive OR.
///
/// Consumes both operands one low bit per step: an odd operand has 1
/// subtracted before both are halved, so every division is exact and the
/// next step sees the next bit, negative operands included.
pub fn b_xor(left: i32, right: i32) -> i32 {
    let mut left = i64::from(left);
    let mut right = i64::from(right);
    let mut result: u32 = 0;
    for &weight in POW2.iter() {
        if modulo(left, 2) == 0 {
            if modulo(right, 2) == 1 {
                right -= 1;
                result += weight;
            }
        } else {
            left -= 1;
            if modulo(right, 2) == 0 {
                result += weight;
            } else {
                right -= 1;
            }
        }
        left = floor_div(left, 2);
        right = floor_div(right, 2);
    }
    tobit(i64::from(result))
}

// ============================================================================
// NOT
// ============================================================================

/// One's complement: the unsigned pattern subtracted from all-ones.
pub fn b_not(value: i32) -> i32 {
    tobit(MODM - modulo(i64::from(value), MOD))
}

// ============================================================================
// Shifts
// ============================================================================

fn shl_word(value: i32, shift: i64) -> Result<i32, BitwzError> {
    if shift < 0 {
        return shr_word(value, -shift);
    }
    let factor = modulo(i64::from(pow2(reduce_shift(shift, WORD_BITS))?), MOD);
    // |value * factor| < 2^63; tobit discards everything above bit 31
    Ok(tobit(i64::from(value) * factor))
}

fn shr_word(value: i32, shift: i64) -> Result<i32, BitwzError> {
    if shift < 0 {
        return shl_word(value, -shift);
    }
    let divisor = i64::from(pow2(reduce_shift(shift, WORD_BITS))?);
    Ok(tobit(floor_div(modulo(i64::from(value), MOD), divisor)))
}

fn sar_word(value: i32, shift: i64) -> Result<i32, BitwzError> {
    if shift < 0 {
        return shl_word(value, -shift);
    }
    let divisor = i64::from(pow2(reduce_shift(shift, WORD_BITS))?);
    Ok(tobit(floor_div(i64::from(value), divisor)))
}

/// Left shift, returning an error instead of panicking on a bad shift amount.
pub fn checked_shl(value: i32, shift: i32) -> Result<i32, BitwzError> {
    shl_word(value, i64::from(shift))
}

/// Logical right shift, returning an error instead of panicking on a bad shift amount.
pub fn checked_shr(value: i32, shift: i32) -> Result<i32, BitwzError> {
    shr_word(value, i64::from(shift))
}

/// Arithmetic right shift, returning an error instead of panicking on a bad shift amount.
pub fn checked_sar(value: i32, shift: i32) -> Result<i32, BitwzError> {
    sar_word(value, i64::from(shift))
}

/// Left shift by `shift` bits, wrapping bits shifted past bit 31.
///
/// A negative `shift` is a logical right shift by `-shift`.
///
/// # Panics
/// If the reduced shift amount does not index the power table.
pub fn b_shl(value: i32, shift: i32) -> i32 {
    or_panic(checked_shl(value, shift))
}

/// Logical (zero-fill) right shift of the 32-bit pattern.
///
/// A negative `shift` is a left shift by `-shift`.
///
/// # Panics
/// If the reduced shift amount does not index the power table.
pub fn b_shr(value: i32, shift: i32) -> i32 {
    or_panic(checked_shr(value, shift))
}

/// Arithmetic (sign-extending) right shift: `floor(value / 2^shift)`.
///
/// A negative `shift` is a left shift by `-shift`.
///
/// # Panics
/// If the reduced shift amount does not index the power table.
pub fn b_sar(value: i32, shift: i32) -> i32 {
    or_panic(checked_sar(value, shift))
}
