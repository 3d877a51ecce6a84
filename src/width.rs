//! Width-dispatch layer
//!
//! Runs the canonical 32-bit operations for every integral width. Operands of
//! 32 bits or fewer are narrowed into a 32-bit word, the canonical operation
//! runs, and the result is narrowed back to the operand width, exactly as an
//! implicit narrowing conversion would. Shift amounts reduce modulo the
//! operand's own bit count.
//!
//! 64-bit operands do not fit one word, so the pattern is split into a high
//! and a low 32-bit half, each half goes through the canonical operation, and
//! the halves are joined again by multiplication.

use crate::error::BitwzError;
use crate::math::{floor_div_wide, modulo_wide, pow2_wide, MOD, POW2, WORD_BITS};
use crate::ops::bitwise::{
    b_and, b_not, b_or, b_xor, checked_sar, checked_shl, checked_shr, or_panic, reduce_shift,
};
use std::fmt;
use std::str::FromStr;

/// The nine integral widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    I8,
    U8,
    I16,
    U16,
    /// 16-bit unsigned character code unit
    Char16,
    I32,
    U32,
    I64,
    U64,
}

impl Width {
    pub const ALL: [Width; 9] = [
        Width::I8,
        Width::U8,
        Width::I16,
        Width::U16,
        Width::Char16,
        Width::I32,
        Width::U32,
        Width::I64,
        Width::U64,
    ];

    pub fn bits(self) -> u32 {
        match self {
            Width::I8 | Width::U8 => 8,
            Width::I16 | Width::U16 | Width::Char16 => 16,
            Width::I32 | Width::U32 => 32,
            Width::I64 | Width::U64 => 64,
        }
    }

    pub fn signed(self) -> bool {
        matches!(self, Width::I8 | Width::I16 | Width::I32 | Width::I64)
    }

    pub fn name(self) -> &'static str {
        match self {
            Width::I8 => "i8",
            Width::U8 => "u8",
            Width::I16 => "i16",
            Width::U16 => "u16",
            Width::Char16 => "char16",
            Width::I32 => "i32",
            Width::U32 => "u32",
            Width::I64 => "i64",
            Width::U64 => "u64",
        }
    }

    /// 2^bits
    pub fn modulus(self) -> i128 {
        match self.bits() {
            64 => i128::from(MOD) * i128::from(MOD),
            bits => i128::from(POW2[(bits - 1) as usize]) * 2,
        }
    }

    pub fn min(self) -> i128 {
        if self.signed() {
            -(self.modulus() / 2)
        } else {
            0
        }
    }

    pub fn max(self) -> i128 {
        if self.signed() {
            self.modulus() / 2 - 1
        } else {
            self.modulus() - 1
        }
    }

    pub fn contains(self, value: i128) -> bool {
        (self.min()..=self.max()).contains(&value)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Width {
    type Err = BitwzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i8" => Ok(Width::I8),
            "u8" => Ok(Width::U8),
            "i16" => Ok(Width::I16),
            "u16" => Ok(Width::U16),
            "char16" | "char" => Ok(Width::Char16),
            "i32" => Ok(Width::I32),
            "u32" => Ok(Width::U32),
            "i64" => Ok(Width::I64),
            "u64" => Ok(Width::U64),
            _ => Err(BitwzError::UnknownWidth(s.to_string())),
        }
    }
}

/// Keep the low `width.bits()` bits of `value` and read them with the width's
/// signedness.
pub fn narrow(value: i128, width: Width) -> i128 {
    let modulus = width.modulus();
    let v = modulo_wide(value, modulus);
    if width.signed() && v >= modulus / 2 {
        v - modulus
    } else {
        v
    }
}

/// The unsigned bit pattern of `value` at `width`
pub fn pattern(value: i128, width: Width) -> u64 {
    // in [0, 2^64) so the cast is exact
    modulo_wide(value, width.modulus()) as u64
}

/// Bit `index` of `value` at `width`, or `None` past the top bit
pub fn bit(value: i128, width: Width, index: u32) -> Option<bool> {
    if index >= width.bits() {
        return None;
    }
    let weight = pow2_wide(index).ok()?;
    let unsigned = modulo_wide(value, width.modulus());
    Some(modulo_wide(floor_div_wide(unsigned, weight), 2) == 1)
}

/// The bit pattern as big-endian hex, two digits per byte of the width
pub fn hex_pattern(value: i128, width: Width) -> String {
    let bytes = pattern(value, width).to_be_bytes();
    let len = (width.bits() / 8) as usize;
    hex::encode(&bytes[bytes.len() - len..])
}

/// The bit pattern as `0`/`1` characters, most significant first
pub fn bit_string(value: i128, width: Width) -> String {
    (0..width.bits())
        .rev()
        .map(|i| if bit(value, width, i) == Some(true) { '1' } else { '0' })
        .collect()
}

// ============================================================================
// Operand types
// ============================================================================

/// A 16-bit unsigned character code unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Char16(pub u16);

impl Char16 {
    /// The character this code unit encodes, if it is not a surrogate
    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }
}

impl From<u16> for Char16 {
    fn from(value: u16) -> Self {
        Char16(value)
    }
}

impl TryFrom<char> for Char16 {
    type Error = BitwzError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u16::try_from(u32::from(c))
            .map(Char16)
            .map_err(|_| BitwzError::InvalidLiteral {
                width: Width::Char16.name().to_string(),
                text: c.to_string(),
            })
    }
}

impl fmt::Display for Char16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An integer type the engine can operate on
pub trait Operand: Copy + fmt::Debug + fmt::Display + PartialEq {
    const WIDTH: Width;

    fn to_i128(self) -> i128;

    /// `value` must already lie in `Self::WIDTH`'s range
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_operand {
    ($($t:ty => $width:expr),* $(,)?) => {
        $(
            impl Operand for $t {
                const WIDTH: Width = $width;

                fn to_i128(self) -> i128 {
                    i128::from(self)
                }

                fn from_i128(value: i128) -> Self {
                    debug_assert!(Self::WIDTH.contains(value));
                    value as $t
                }
            }
        )*
    };
}

impl_operand! {
    i8 => Width::I8,
    u8 => Width::U8,
    i16 => Width::I16,
    u16 => Width::U16,
    i32 => Width::I32,
    u32 => Width::U32,
    i64 => Width::I64,
    u64 => Width::U64,
}

impl Operand for Char16 {
    const WIDTH: Width = Width::Char16;

    fn to_i128(self) -> i128 {
        i128::from(self.0)
    }

    fn from_i128(value: i128) -> Self {
        debug_assert!(Self::WIDTH.contains(value));
        Char16(value as u16)
    }
}

// ============================================================================
// Dispatch on raw values
// ============================================================================

fn to_word(value: i128) -> i32 {
    narrow(value, Width::I32) as i32
}

fn join_halves(high: i32, low: i32) -> i128 {
    let half = i128::from(MOD);
    modulo_wide(i128::from(high), half) * half + modulo_wide(i128::from(low), half)
}

/// Apply a canonical binary operation to two values of `width`
pub(crate) fn binary_raw(width: Width, left: i128, right: i128, op: fn(i32, i32) -> i32) -> i128 {
    if width.bits() <= WORD_BITS {
        return narrow(i128::from(op(to_word(left), to_word(right))), width);
    }
    let half = i128::from(MOD);
    let (left, right) = (modulo_wide(left, width.modulus()), modulo_wide(right, width.modulus()));
    let low = op(to_word(modulo_wide(left, half)), to_word(modulo_wide(right, half)));
    let high = op(to_word(floor_div_wide(left, half)), to_word(floor_div_wide(right, half)));
    narrow(join_halves(high, low), width)
}

/// Apply a canonical unary operation to a value of `width`
pub(crate) fn unary_raw(width: Width, value: i128, op: fn(i32) -> i32) -> i128 {
    if width.bits() <= WORD_BITS {
        return narrow(i128::from(op(to_word(value))), width);
    }
    let half = i128::from(MOD);
    let value = modulo_wide(value, width.modulus());
    let low = op(to_word(modulo_wide(value, half)));
    let high = op(to_word(floor_div_wide(value, half)));
    narrow(join_halves(high, low), width)
}

pub(crate) fn shl_raw(width: Width, value: i128, shift: i64) -> Result<i128, BitwzError> {
    if shift < 0 {
        return shr_raw(width, value, -shift);
    }
    let n = reduce_shift(shift, width.bits());
    if width.bits() <= WORD_BITS {
        return Ok(narrow(i128::from(checked_shl(to_word(value), n as i32)?), width));
    }
    // |value| < 2^64 and the factor is at most 2^63, so the product fits
    Ok(narrow(value * pow2_wide(n)?, width))
}

pub(crate) fn shr_raw(width: Width, value: i128, shift: i64) -> Result<i128, BitwzError> {
    if shift < 0 {
        return shl_raw(width, value, -shift);
    }
    let n = reduce_shift(shift, width.bits());
    if width.bits() <= WORD_BITS {
        return Ok(narrow(i128::from(checked_shr(to_word(value), n as i32)?), width));
    }
    let pattern = modulo_wide(value, width.modulus());
    Ok(narrow(floor_div_wide(pattern, pow2_wide(n)?), width))
}

pub(crate) fn sar_raw(width: Width, value: i128, shift: i64) -> Result<i128, BitwzError> {
    if shift < 0 {
        return shl_raw(width, value, -shift);
    }
    // no sign bit to extend
    if !width.signed() {
        return shr_raw(width, value, shift);
    }
    let n = reduce_shift(shift, width.bits());
    if width.bits() <= WORD_BITS {
        return Ok(narrow(i128::from(checked_sar(to_word(value), n as i32)?), width));
    }
    Ok(narrow(floor_div_wide(value, pow2_wide(n)?), width))
}

// ============================================================================
// Typed API
// ============================================================================

fn binary<T: Operand>(left: T, right: T, op: fn(i32, i32) -> i32) -> T {
    T::from_i128(binary_raw(T::WIDTH, left.to_i128(), right.to_i128(), op))
}

/// Bitwise AND at `T`'s width
pub fn and<T: Operand>(left: T, right: T) -> T {
    binary(left, right, b_and)
}

/// Bitwise OR at `T`'s width
pub fn or<T: Operand>(left: T, right: T) -> T {
    binary(left, right, b_or)
}

/// Bitwise XOR at `T`'s width
pub fn xor<T: Operand>(left: T, right: T) -> T {
    binary(left, right, b_xor)
}

/// One's complement at `T`'s width
pub fn not<T: Operand>(value: T) -> T {
    T::from_i128(unary_raw(T::WIDTH, value.to_i128(), b_not))
}

pub fn checked_shl_as<T: Operand>(value: T, shift: i32) -> Result<T, BitwzError> {
    shl_raw(T::WIDTH, value.to_i128(), i64::from(shift)).map(T::from_i128)
}

pub fn checked_shr_as<T: Operand>(value: T, shift: i32) -> Result<T, BitwzError> {
    shr_raw(T::WIDTH, value.to_i128(), i64::from(shift)).map(T::from_i128)
}

pub fn checked_sar_as<T: Operand>(value: T, shift: i32) -> Result<T, BitwzError> {
    sar_raw(T::WIDTH, value.to_i128(), i64::from(shift)).map(T::from_i128)
}

/// Left shift at `T`'s width; the amount reduces modulo `T`'s bit count.
///
/// # Panics
/// If the reduced shift amount is not a valid bit position.
pub fn shl<T: Operand>(value: T, shift: i32) -> T {
    or_panic(checked_shl_as(value, shift))
}

/// Right shift at `T`'s width, through the canonical zero-filling word shift.
///
/// For signed widths under 32 bits the operand is sign-extended into the word
/// first, so small shifts keep the sign after narrowing back; for 32 and 64
/// bits the vacated bits are zero.
///
/// # Panics
/// If the reduced shift amount is not a valid bit position.
pub fn shr<T: Operand>(value: T, shift: i32) -> T {
    or_panic(checked_shr_as(value, shift))
}

/// Arithmetic right shift at `T`'s width.
///
/// # Panics
/// If the reduced shift amount is not a valid bit position.
pub fn sar<T: Operand>(value: T, shift: i32) -> T {
    or_panic(checked_sar_as(value, shift))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    // ============================================================================
    // Width metadata
    // ============================================================================

    #[test]
    fn test_width_ranges() {
        assert_eq!(Width::I8.min(), -128);
        assert_eq!(Width::I8.max(), 127);
        assert_eq!(Width::U8.max(), 255);
        assert_eq!(Width::Char16.max(), 65535);
        assert_eq!(Width::I32.min(), i128::from(i32::MIN));
        assert_eq!(Width::U32.max(), i128::from(u32::MAX));
        assert_eq!(Width::I64.min(), i128::from(i64::MIN));
        assert_eq!(Width::U64.max(), i128::from(u64::MAX));
        assert_eq!(Width::U64.modulus(), 1i128 << 64);
    }

    #[test]
    fn test_width_from_str() {
        for width in Width::ALL {
            assert_eq!(width.name().parse::<Width>().unwrap(), width);
        }
        assert_eq!("CHAR".parse::<Width>().unwrap(), Width::Char16);
        assert!(matches!("i128".parse::<Width>(), Err(BitwzError::UnknownWidth(_))));
    }

    #[test]
    fn test_pattern_and_bit() {
        assert_eq!(pattern(-1, Width::I8), 0xFF);
        assert_eq!(pattern(-2, Width::I64), u64::MAX - 1);
        assert_eq!(bit(-128, Width::I8, 7), Some(true));
        assert_eq!(bit(-128, Width::I8, 6), Some(false));
        assert_eq!(bit(5, Width::U8, 2), Some(true));
        assert_eq!(bit(5, Width::U8, 8), None);
        assert_eq!(bit(i128::from(i64::MIN), Width::I64, 63), Some(true));
    }

    #[test]
    fn test_hex_and_bit_string() {
        assert_eq!(hex_pattern(-1, Width::I16), "ffff");
        assert_eq!(hex_pattern(0x12, Width::U32), "00000012");
        assert_eq!(bit_string(-2, Width::I8), "11111110");
        assert_eq!(bit_string(1, Width::U16), "0000000000000001");
    }

    #[test]
    fn test_narrow() {
        assert_eq!(narrow(300, Width::U8), 44);
        assert_eq!(narrow(200, Width::I8), -56);
        assert_eq!(narrow(-1, Width::U16), 65535);
        assert_eq!(narrow(-1, Width::Char16), 65535);
        assert_eq!(narrow(i128::from(u32::MAX), Width::I32), -1);
        assert_eq!(narrow(-1, Width::U64), i128::from(u64::MAX));
        assert_eq!(narrow(1i128 << 63, Width::I64), i128::from(i64::MIN));
    }

    // ============================================================================
    // Narrow widths
    // ============================================================================

    #[test]
    fn test_i8_ops() {
        assert_eq!(and(-8i8, 0x7Fi8), 0x78);
        assert_eq!(or(-128i8, 1i8), -127);
        assert_eq!(xor(-1i8, 0x0Fi8), -16);
        assert_eq!(not(0i8), -1);
        assert_eq!(shl(1i8, 7), i8::MIN);
        assert_eq!(shl(3i8, 7), i8::MIN);
        assert_eq!(sar(-128i8, 7), -1);
    }

    #[test]
    fn test_i8_shr_narrows_sign_extended_word() {
        // -8i8 widens to the word 0xFFFFFFF8; its zero-fill shift 0x7FFFFFFC
        // narrows back to 0xFC
        assert_eq!(shr(-8i8, 1), -4);
        assert_eq!(shr(-128i8, 7), -1);
    }

    #[test]
    fn test_u8_ops() {
        assert_eq!(and(0xF0u8, 0x3Cu8), 0x30);
        assert_eq!(or(0xF0u8, 0x0Fu8), 0xFF);
        assert_eq!(xor(0xFFu8, 0x0Fu8), 0xF0);
        assert_eq!(not(0u8), 255);
        assert_eq!(shl(0x81u8, 1), 0x02);
        assert_eq!(shr(0x80u8, 7), 1);
        assert_eq!(shr(0x80u8, -1), 0);
    }

    #[test]
    fn test_shift_reduces_mod_width() {
        assert_eq!(shl(1u8, 9), 2);
        assert_eq!(shl(1u16, 17), 2);
        assert_eq!(shr(0x8000u16, 31), 1);
        assert_eq!(shl(1i32, 33), 2);
        assert_eq!(shl(1u64, 65), 2);
        assert_eq!(shl(1u8, -9), 0);
    }

    #[test]
    fn test_char16_ops() {
        let a = Char16::try_from('a').unwrap();
        let upper = and(a, not(Char16(0x20)));
        assert_eq!(upper.to_char(), Some('A'));
        assert_eq!(or(upper, Char16(0x20)), a);
        assert_eq!(shl(Char16(0x8001), 1), Char16(2));
        assert!(Char16::try_from('\u{1F600}').is_err());
    }

    #[test]
    fn test_u32_logical_shr() {
        assert_eq!(shr(0xFFFF_FFF8u32, 1), 0x7FFF_FFFC);
        assert_eq!(not(0u32), u32::MAX);
        assert_eq!(sar(0xFFFF_FFF8u32, 1), 0x7FFF_FFFC);
    }

    // ============================================================================
    // 64-bit widths
    // ============================================================================

    #[test]
    fn test_i64_ops() {
        let a = 0x1234_5678_9ABC_DEF0i64;
        let b = -0x0F0F_0F0F_0F0F_0F10i64;
        assert_eq!(and(a, b), a & b);
        assert_eq!(or(a, b), a | b);
        assert_eq!(xor(a, b), a ^ b);
        assert_eq!(not(a), !a);
        assert_eq!(not(i64::MIN), i64::MAX);
        assert_eq!(shl(1i64, 63), i64::MIN);
        assert_eq!(shl(a, 36), a << 36);
        assert_eq!(shr(-8i64, 1), ((-8i64 as u64) >> 1) as i64);
        assert_eq!(sar(-8i64, 1), -4);
        assert_eq!(sar(i64::MIN, 63), -1);
    }

    #[test]
    fn test_u64_ops() {
        assert_eq!(and(u64::MAX, 0xF0F0u64), 0xF0F0);
        assert_eq!(xor(u64::MAX, 1u64 << 63), u64::MAX >> 1);
        assert_eq!(shl(u64::MAX, 63), 1u64 << 63);
        assert_eq!(shr(u64::MAX, 63), 1);
        assert_eq!(shr(1u64 << 40, -3), 1u64 << 43);
    }

    // ============================================================================
    // Cross-check against native operators
    // ============================================================================

    macro_rules! native_sweep {
        ($name:ident, $t:ty, $bits:expr) => {
            #[test]
            fn $name() {
                let mut rng = rand::thread_rng();
                for _ in 0..300 {
                    let a: $t = rng.gen();
                    let b: $t = rng.gen();
                    let n: i32 = rng.gen_range(0..$bits);
                    assert_eq!(and(a, b), a & b);
                    assert_eq!(or(a, b), a | b);
                    assert_eq!(xor(a, b), a ^ b);
                    assert_eq!(not(a), !a);
                    assert_eq!(shl(a, n), a.wrapping_shl(n as u32));
                    assert_eq!(sar(a, n), a >> n);
                }
            }
        };
    }

    native_sweep!(test_native_i8, i8, 8);
    native_sweep!(test_native_u8, u8, 8);
    native_sweep!(test_native_i16, i16, 16);
    native_sweep!(test_native_u16, u16, 16);
    native_sweep!(test_native_i32, i32, 32);
    native_sweep!(test_native_u32, u32, 32);
    native_sweep!(test_native_i64, i64, 64);
    native_sweep!(test_native_u64, u64, 64);

    #[test]
    fn test_native_shr_64() {
        let mut rng = rand::thread_rng();
        for _ in 0..300 {
            let a: i64 = rng.gen();
            let n: i32 = rng.gen_range(0..64);
            assert_eq!(shr(a, n), ((a as u64) >> n) as i64);
            let u: u64 = rng.gen();
            assert_eq!(shr(u, n), u >> n);
        }
    }
}
