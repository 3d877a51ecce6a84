//! `Word<T>`: an integer whose bitwise operators go through the engine
//!
//! ```
//! use bitwz::Word;
//!
//! let a = Word(12i32);
//! let b = Word(10i32);
//! assert_eq!(a & b, Word(8));
//! assert_eq!(a | b, Word(14));
//! assert_eq!(a ^ b, Word(6));
//! assert_eq!(!Word(0i32), Word(-1));
//! assert_eq!(Word(1i32) << 31, Word(i32::MIN));
//! // `>>` is the engine's zero-filling shift
//! assert_eq!(Word(-8i32) >> 1, Word(2147483644));
//! ```

use crate::width::{self, Operand, Width};
use std::fmt;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word<T>(pub T);

impl<T: Operand> Word<T> {
    pub fn get(self) -> T {
        self.0
    }

    pub fn width(self) -> Width {
        T::WIDTH
    }

    /// Bit `index`, counting from the least significant; `None` past the top bit
    pub fn bit(self, index: u32) -> Option<bool> {
        width::bit(self.0.to_i128(), T::WIDTH, index)
    }

    /// The bit pattern as `0`/`1` characters, most significant first
    pub fn bits(self) -> String {
        width::bit_string(self.0.to_i128(), T::WIDTH)
    }

    /// The bit pattern as big-endian hex, two digits per byte of the width
    pub fn hex(self) -> String {
        width::hex_pattern(self.0.to_i128(), T::WIDTH)
    }

    /// Arithmetic (sign-extending) right shift
    pub fn sar(self, shift: i32) -> Self {
        Word(width::sar(self.0, shift))
    }
}

impl<T> From<T> for Word<T> {
    fn from(value: T) -> Self {
        Word(value)
    }
}

impl<T: fmt::Display> fmt::Display for Word<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

macro_rules! forward_binary {
    ($trait:ident, $method:ident, $assign:ident, $assign_method:ident, $engine:path) => {
        impl<T: Operand> $trait for Word<T> {
            type Output = Word<T>;

            fn $method(self, rhs: Word<T>) -> Word<T> {
                Word($engine(self.0, rhs.0))
            }
        }

        impl<T: Operand> $trait<T> for Word<T> {
            type Output = Word<T>;

            fn $method(self, rhs: T) -> Word<T> {
                Word($engine(self.0, rhs))
            }
        }

        impl<T: Operand> $assign for Word<T> {
            fn $assign_method(&mut self, rhs: Word<T>) {
                self.0 = $engine(self.0, rhs.0);
            }
        }
    };
}

forward_binary!(BitAnd, bitand, BitAndAssign, bitand_assign, width::and);
forward_binary!(BitOr, bitor, BitOrAssign, bitor_assign, width::or);
forward_binary!(BitXor, bitxor, BitXorAssign, bitxor_assign, width::xor);

impl<T: Operand> Not for Word<T> {
    type Output = Word<T>;

    fn not(self) -> Word<T> {
        Word(width::not(self.0))
    }
}

impl<T: Operand> Shl<i32> for Word<T> {
    type Output = Word<T>;

    fn shl(self, shift: i32) -> Word<T> {
        Word(width::shl(self.0, shift))
    }
}

impl<T: Operand> ShlAssign<i32> for Word<T> {
    fn shl_assign(&mut self, shift: i32) {
        self.0 = width::shl(self.0, shift);
    }
}

impl<T: Operand> Shr<i32> for Word<T> {
    type Output = Word<T>;

    fn shr(self, shift: i32) -> Word<T> {
        Word(width::shr(self.0, shift))
    }
}

impl<T: Operand> ShrAssign<i32> for Word<T> {
    fn shr_assign(&mut self, shift: i32) {
        self.0 = width::shr(self.0, shift);
    }
}
