//! Modular-arithmetic core
//!
//! Everything the bit operations need is built here from floor-division,
//! true modulo and multiplication: no native bitwise instruction is used.
//!
//! - [`floor`] rounds toward negative infinity
//! - [`modulo`] is true modulo: the result takes the sign of the divisor
//! - [`tobit`] normalises any integer into the signed 32-bit range
//! - [`POW2`] is the table of `2^0 ..= 2^31`, built once

use crate::error::BitwzError;
use once_cell::sync::Lazy;

/// 2^32, the modulus of a 32-bit word
pub const MOD: i64 = 4_294_967_296;

/// 2^32 - 1, the all-ones 32-bit pattern
pub const MODM: i64 = 4_294_967_295;

/// Bit count of the canonical word
pub const WORD_BITS: u32 = 32;

/// Powers of two, `POW2[n] == 2^n` for n in `0..32`.
///
/// Built on first use and never written again.
pub static POW2: Lazy<[u32; 32]> = Lazy::new(|| {
    let mut table = [1u32; 32];
    for i in 1..table.len() {
        table[i] = table[i - 1] * 2;
    }
    table
});

/// Look up `2^index` in the table.
///
/// Indices past the end of the table are a caller error, reported rather than
/// wrapped or clamped.
pub fn pow2(index: u32) -> Result<u32, BitwzError> {
    POW2.get(index as usize)
        .copied()
        .ok_or(BitwzError::ShiftOutOfRange {
            shift: i64::from(index),
            bits: WORD_BITS,
        })
}

/// `2^index` for index in `0..64`, assembled from table entries
pub fn pow2_wide(index: u32) -> Result<i128, BitwzError> {
    if index < WORD_BITS {
        return Ok(i128::from(pow2(index)?));
    }
    if index < 2 * WORD_BITS {
        return Ok(i128::from(pow2(index - WORD_BITS)?) * i128::from(MOD));
    }
    Err(BitwzError::ShiftOutOfRange {
        shift: i64::from(index),
        bits: 2 * WORD_BITS,
    })
}

/// Largest integer less than or equal to `d`.
/// NaN and the infinities are returned unchanged.
#[inline]
pub fn floor(d: f64) -> f64 {
    d.floor()
}

/// Integer division rounded toward negative infinity.
///
/// Panics if `divisor` is zero, as integer division does.
#[inline]
pub fn floor_div(dividend: i64, divisor: i64) -> i64 {
    let quotient = dividend / divisor;
    // `/` truncates toward zero; step down once when the exact quotient was negative
    if quotient * divisor != dividend && (dividend < 0) != (divisor < 0) {
        quotient - 1
    } else {
        quotient
    }
}

/// True modulo: `dividend - divisor * floor(dividend / divisor)`.
///
/// The result has the sign of the divisor, so for a positive divisor it always
/// lies in `[0, divisor)`, negative dividends included.
#[inline]
pub fn modulo(dividend: i64, divisor: i64) -> i64 {
    dividend - divisor * floor_div(dividend, divisor)
}

/// [`floor_div`] over `i128`, for 64-bit operands and their unsigned patterns
#[inline]
pub fn floor_div_wide(dividend: i128, divisor: i128) -> i128 {
    let quotient = dividend / divisor;
    if quotient * divisor != dividend && (dividend < 0) != (divisor < 0) {
        quotient - 1
    } else {
        quotient
    }
}

/// [`modulo`] over `i128`
#[inline]
pub fn modulo_wide(dividend: i128, divisor: i128) -> i128 {
    dividend - divisor * floor_div_wide(dividend, divisor)
}

/// Normalise `value` into the signed 32-bit two's-complement range.
///
/// The value is first reduced into `[0, 2^32)`; anything at or above `2^31`
/// then wraps to the negative half. This is the only place 32-bit wraparound
/// happens.
pub fn tobit(value: i64) -> i32 {
    let v = modulo(value, MOD);
    let v = if v < i64::from(POW2[31]) { v } else { v - MOD };
    // v is in [-2^31, 2^31) so the cast is exact
    v as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Table
    // ============================================================================

    #[test]
    fn test_pow2_table() {
        assert_eq!(POW2.len(), 32);
        assert_eq!(POW2[0], 1);
        assert_eq!(POW2[1], 2);
        assert_eq!(POW2[10], 1024);
        assert_eq!(POW2[31], 2_147_483_648);
        for i in 1..32 {
            assert_eq!(POW2[i], POW2[i - 1] * 2, "entry {i}");
        }
    }

    #[test]
    fn test_pow2_lookup() {
        assert_eq!(pow2(0).unwrap(), 1);
        assert_eq!(pow2(31).unwrap(), 0x8000_0000);
        assert!(matches!(
            pow2(32),
            Err(BitwzError::ShiftOutOfRange { shift: 32, bits: 32 })
        ));
    }

    #[test]
    fn test_pow2_wide() {
        assert_eq!(pow2_wide(0).unwrap(), 1);
        assert_eq!(pow2_wide(31).unwrap(), 1i128 << 31);
        assert_eq!(pow2_wide(32).unwrap(), 1i128 << 32);
        assert_eq!(pow2_wide(63).unwrap(), 1i128 << 63);
        assert!(matches!(
            pow2_wide(64),
            Err(BitwzError::ShiftOutOfRange { shift: 64, bits: 64 })
        ));
    }

    // ============================================================================
    // floor / floor_div / modulo
    // ============================================================================

    #[test]
    fn test_floor() {
        assert_eq!(floor(2.7), 2.0);
        assert_eq!(floor(-2.1), -3.0);
        assert_eq!(floor(-0.5), -1.0);
        assert_eq!(floor(5.0), 5.0);
        assert!(floor(f64::NAN).is_nan());
        assert_eq!(floor(f64::INFINITY), f64::INFINITY);
        assert_eq!(floor(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-7, -2), 3);
        assert_eq!(floor_div(-8, 2), -4);
        assert_eq!(floor_div(0, 5), 0);
        assert_eq!(floor_div(-1, MOD), -1);
    }

    #[test]
    fn test_modulo_sign_follows_divisor() {
        assert_eq!(modulo(7, 3), 1);
        assert_eq!(modulo(-7, 3), 2);
        assert_eq!(modulo(7, -3), -2);
        assert_eq!(modulo(-7, -3), -1);
        assert_eq!(modulo(-1, 2), 1);
        assert_eq!(modulo(-1, MOD), MODM);
        assert_eq!(modulo(i64::from(i32::MIN), MOD), 2_147_483_648);
    }

    #[test]
    fn test_modulo_matches_rem_euclid() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a = rng.gen::<i32>() as i64;
            let b = rng.gen_range(1..=i64::from(i32::MAX));
            assert_eq!(modulo(a, b), a.rem_euclid(b), "{a} mod {b}");
            assert_eq!(floor_div(a, b), a.div_euclid(b), "{a} div {b}");
        }
    }

    #[test]
    fn test_wide_variants() {
        let two64 = i128::from(MOD) * i128::from(MOD);
        assert_eq!(modulo_wide(-1, two64), two64 - 1);
        assert_eq!(floor_div_wide(-1, i128::from(MOD)), -1);
        assert_eq!(modulo_wide(i128::from(i64::MIN), two64), 1i128 << 63);
        assert_eq!(floor_div_wide(-9, 4), -3);
    }

    // ============================================================================
    // tobit
    // ============================================================================

    #[test]
    fn test_tobit() {
        assert_eq!(tobit(0), 0);
        assert_eq!(tobit(-1), -1);
        assert_eq!(tobit(MODM), -1);
        assert_eq!(tobit(MOD), 0);
        assert_eq!(tobit(2_147_483_647), i32::MAX);
        assert_eq!(tobit(2_147_483_648), i32::MIN);
        assert_eq!(tobit(-2_147_483_649), i32::MAX);
        assert_eq!(tobit(MOD + 5), 5);
        assert_eq!(tobit(-MOD - 5), -5);
    }
}
