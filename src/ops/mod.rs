//! Operation kinds
//!
//! The operation set is closed, so each kind maps to its implementation
//! through a plain `match`; there is no lookup by name at run time beyond
//! parsing user input into a [`BitOp`].

pub mod bitwise;

use crate::error::BitwzError;
use std::fmt;
use std::str::FromStr;

pub use bitwise::{
    b_and, b_not, b_or, b_sar, b_shl, b_shr, b_xor, checked_sar, checked_shl, checked_shr,
};

/// The six bitwise operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitOp {
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,
}

/// Function reference for an operation, by arity
#[derive(Clone, Copy)]
pub enum OpFn {
    Unary(fn(i32) -> i32),
    Binary(fn(i32, i32) -> i32),
}

impl BitOp {
    pub const ALL: [BitOp; 6] = [
        BitOp::And,
        BitOp::Or,
        BitOp::Xor,
        BitOp::Not,
        BitOp::Shl,
        BitOp::Shr,
    ];

    /// Engine function name
    pub fn name(self) -> &'static str {
        match self {
            BitOp::And => "b_and",
            BitOp::Or => "b_or",
            BitOp::Xor => "b_xor",
            BitOp::Not => "b_not",
            BitOp::Shl => "b_shl",
            BitOp::Shr => "b_shr",
        }
    }

    /// Operator token as written in Rust source
    pub fn token(self) -> &'static str {
        match self {
            BitOp::And => "&",
            BitOp::Or => "|",
            BitOp::Xor => "^",
            BitOp::Not => "!",
            BitOp::Shl => "<<",
            BitOp::Shr => ">>",
        }
    }

    pub fn is_unary(self) -> bool {
        self == BitOp::Not
    }

    pub fn is_shift(self) -> bool {
        matches!(self, BitOp::Shl | BitOp::Shr)
    }

    /// Binding strength, lowest first: OR, XOR, AND, the shifts, then NOT
    pub fn precedence(self) -> u8 {
        match self {
            BitOp::Or => 1,
            BitOp::Xor => 2,
            BitOp::And => 3,
            BitOp::Shl | BitOp::Shr => 4,
            BitOp::Not => 5,
        }
    }

    pub fn has_higher_precedence_than(self, other: BitOp) -> bool {
        self.precedence() > other.precedence()
    }

    /// The canonical 32-bit implementation of this operation
    pub fn function(self) -> OpFn {
        match self {
            BitOp::And => OpFn::Binary(b_and),
            BitOp::Or => OpFn::Binary(b_or),
            BitOp::Xor => OpFn::Binary(b_xor),
            BitOp::Not => OpFn::Unary(b_not),
            BitOp::Shl => OpFn::Binary(b_shl),
            BitOp::Shr => OpFn::Binary(b_shr),
        }
    }

    /// Evaluate on 32-bit words. `right` is ignored for `Not`.
    pub fn eval(self, left: i32, right: i32) -> i32 {
        match self.function() {
            OpFn::Unary(f) => f(left),
            OpFn::Binary(f) => f(left, right),
        }
    }

    /// The same operation computed with Rust's native operators, honouring the
    /// engine's shift contract (negative amounts flip, magnitude mod 32, `>>`
    /// zero-fills).
    pub fn native(self, left: i32, right: i32) -> i32 {
        match self {
            BitOp::And => left & right,
            BitOp::Or => left | right,
            BitOp::Xor => left ^ right,
            BitOp::Not => !left,
            BitOp::Shl | BitOp::Shr => {
                let to_left = (self == BitOp::Shl) == (right >= 0);
                let amount = (i64::from(right).unsigned_abs() & 31) as u32;
                if to_left {
                    left.wrapping_shl(amount)
                } else {
                    ((left as u32) >> amount) as i32
                }
            }
        }
    }
}

impl fmt::Display for BitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BitOp {
    type Err = BitwzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "&" => BitOp::And,
            "|" => BitOp::Or,
            "^" => BitOp::Xor,
            "!" | "~" => BitOp::Not,
            "<<" => BitOp::Shl,
            ">>" => BitOp::Shr,
            _ => match s.to_ascii_lowercase().as_str() {
                "and" | "b_and" | "band" => BitOp::And,
                "or" | "b_or" | "bor" => BitOp::Or,
                "xor" | "b_xor" | "bxor" => BitOp::Xor,
                "not" | "b_not" | "bnot" => BitOp::Not,
                "shl" | "b_shl" | "bshl" => BitOp::Shl,
                "shr" | "b_shr" | "bshr" => BitOp::Shr,
                _ => return Err(BitwzError::UnknownOperation(s.to_string())),
            },
        };
        Ok(op)
    }
}
