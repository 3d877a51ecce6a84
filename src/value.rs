//! Width-tagged integer values

use crate::error::BitwzError;
use crate::ops::{BitOp, OpFn};
use crate::width::{
    binary_raw, bit_string, hex_pattern, narrow, pattern, shl_raw, shr_raw, unary_raw, Char16,
    Operand, Width,
};
use std::fmt;

/// An integer of one of the nine supported widths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    Char16(Char16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
}

impl Value {
    /// Get the width of this value
    pub fn width(&self) -> Width {
        match self {
            Value::I8(_) => Width::I8,
            Value::U8(_) => Width::U8,
            Value::I16(_) => Width::I16,
            Value::U16(_) => Width::U16,
            Value::Char16(_) => Width::Char16,
            Value::I32(_) => Width::I32,
            Value::U32(_) => Width::U32,
            Value::I64(_) => Width::I64,
            Value::U64(_) => Width::U64,
        }
    }

    pub fn to_i128(&self) -> i128 {
        match *self {
            Value::I8(v) => v.to_i128(),
            Value::U8(v) => v.to_i128(),
            Value::I16(v) => v.to_i128(),
            Value::U16(v) => v.to_i128(),
            Value::Char16(v) => v.to_i128(),
            Value::I32(v) => v.to_i128(),
            Value::U32(v) => v.to_i128(),
            Value::I64(v) => v.to_i128(),
            Value::U64(v) => v.to_i128(),
        }
    }

    /// Build a value of `width` from `value`, keeping only the low bits
    pub fn wrapping(width: Width, value: i128) -> Self {
        let v = narrow(value, width);
        match width {
            Width::I8 => Value::I8(i8::from_i128(v)),
            Width::U8 => Value::U8(u8::from_i128(v)),
            Width::I16 => Value::I16(i16::from_i128(v)),
            Width::U16 => Value::U16(u16::from_i128(v)),
            Width::Char16 => Value::Char16(Char16::from_i128(v)),
            Width::I32 => Value::I32(i32::from_i128(v)),
            Width::U32 => Value::U32(u32::from_i128(v)),
            Width::I64 => Value::I64(i64::from_i128(v)),
            Width::U64 => Value::U64(u64::from_i128(v)),
        }
    }

    /// Unsigned bit pattern
    pub fn pattern(&self) -> u64 {
        pattern(self.to_i128(), self.width())
    }

    /// Big-endian hex of the bit pattern
    pub fn hex(&self) -> String {
        hex_pattern(self.to_i128(), self.width())
    }

    /// The bit pattern as `0`/`1` characters, most significant first
    pub fn bits(&self) -> String {
        bit_string(self.to_i128(), self.width())
    }

    /// Parse a value from a width name and a literal.
    ///
    /// Decimal literals must lie in the width's range. `0x` literals give the
    /// bit pattern, so `0xFF` as `i8` is `-1`.
    pub fn from_strings(width: &str, text: &str) -> Result<Self, BitwzError> {
        let width: Width = width.parse()?;
        let invalid = || BitwzError::InvalidLiteral {
            width: width.name().to_string(),
            text: text.to_string(),
        };
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let bits = u128::from_str_radix(hex, 16).map_err(|_| invalid())?;
            let bits = i128::try_from(bits).map_err(|_| invalid())?;
            if bits >= width.modulus() {
                return Err(invalid());
            }
            return Ok(Value::wrapping(width, bits));
        }
        let value = text.parse::<i128>().map_err(|_| invalid())?;
        if !width.contains(value) {
            return Err(invalid());
        }
        Ok(Value::wrapping(width, value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width(), self.to_i128())
    }
}

fn shift_amount(op: BitOp, rhs: Option<Value>) -> Result<i64, BitwzError> {
    match rhs {
        Some(Value::I32(n)) => Ok(i64::from(n)),
        Some(other) => Err(BitwzError::WidthMismatch {
            expected: Width::I32.name().to_string(),
            actual: other.width().name().to_string(),
        }),
        None => Err(BitwzError::MissingOperand(op.name().to_string())),
    }
}

fn same_width_operand(op: BitOp, width: Width, rhs: Option<Value>) -> Result<i128, BitwzError> {
    let rhs = rhs.ok_or_else(|| BitwzError::MissingOperand(op.name().to_string()))?;
    if rhs.width() != width {
        return Err(BitwzError::WidthMismatch {
            expected: width.name().to_string(),
            actual: rhs.width().name().to_string(),
        });
    }
    Ok(rhs.to_i128())
}

/// Apply `op` to a tagged value.
///
/// AND, OR and XOR need a right operand of the same width; shifts need an
/// `i32` amount; NOT ignores `rhs`.
pub fn apply(op: BitOp, value: Value, rhs: Option<Value>) -> Result<Value, BitwzError> {
    let width = value.width();
    let raw = value.to_i128();
    let result = match op.function() {
        OpFn::Unary(f) => unary_raw(width, raw, f),
        OpFn::Binary(_) if op == BitOp::Shl => shl_raw(width, raw, shift_amount(op, rhs)?)?,
        OpFn::Binary(_) if op == BitOp::Shr => shr_raw(width, raw, shift_amount(op, rhs)?)?,
        OpFn::Binary(f) => binary_raw(width, raw, same_width_operand(op, width, rhs)?, f),
    };
    Ok(Value::wrapping(width, result))
}
