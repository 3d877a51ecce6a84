//! Bitwise operators computed without bitwise instructions.
//!
//! bitwz reproduces AND, OR, XOR, NOT, left shift and right shift using only
//! floor-division, true modulo, multiplication and a table of powers of two.
//! Each result is the one a hardware bitwise instruction would produce on the
//! two's-complement pattern of the operands.
//!
//! # Modules
//!
//! - [`math`] -- `floor`, true `modulo`, `tobit` and the `POW2` table.
//! - [`ops`] -- The canonical 32-bit operations and the [`BitOp`] kinds.
//! - [`width`] -- Width dispatch for 8, 16, 32 and 64-bit operands and [`Char16`].
//! - [`value`] -- [`Value`], an integer tagged with its width, and [`apply`].
//! - [`word`] -- [`Word`], a wrapper whose `&`, `|`, `^`, `!`, `<<`, `>>` use the engine.
//! - [`assertgen`] -- Writes boundary-value assertions for the operations.
//!
//! # Example
//!
//! ```
//! use bitwz::{b_and, b_not, b_or, b_shl, b_shr, b_xor};
//!
//! assert_eq!(b_and(12, 10), 8);
//! assert_eq!(b_or(12, 10), 14);
//! assert_eq!(b_xor(12, 10), 6);
//! assert_eq!(b_not(0), -1);
//! assert_eq!(b_shl(1, 31), i32::MIN);
//!
//! // Right shift fills with zeros, even for negative input
//! assert_eq!(b_shr(-8, 1), 2147483644);
//! assert_eq!(bitwz::b_sar(-8, 1), -4);
//!
//! // Other widths
//! assert_eq!(bitwz::width::and(-8i8, 0x7F), 0x78);
//! assert_eq!(bitwz::width::shl(0x81u8, 1), 0x02);
//! ```

pub mod assertgen;
pub mod error;
pub mod math;
pub mod ops;
pub mod value;
pub mod width;
pub mod word;

pub use error::BitwzError;
pub use ops::{
    b_and, b_not, b_or, b_sar, b_shl, b_shr, b_xor, checked_sar, checked_shl, checked_shr, BitOp,
    OpFn,
};
pub use value::{apply, Value};
pub use width::{Char16, Operand, Width};
pub use word::Word;
