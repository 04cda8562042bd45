//! Arbitrary-precision signed integers.
//!
//! [`BigInt`] stores a sign and a little-endian sequence of 32-bit words. All
//! arithmetic is exact; bitwise operators behave as if values were stored in
//! infinite-width two's complement.

#![warn(clippy::std_instead_of_core)]

mod bitwise;
mod decimal;
mod div;
mod error;
mod int;
mod mag;
mod ops;

pub use error::{Error, FormatError};
pub use int::BigInt;

/// One storage unit of a magnitude.
pub type Word = u32;

/// Double-width word used for carries and partial products.
pub(crate) type DWord = u64;

pub(crate) const WORD_BITS: u32 = Word::BITS;
pub(crate) const BASE: DWord = 1 << WORD_BITS;
