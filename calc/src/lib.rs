//! A small expression language over [`bigint::BigInt`].

pub mod ast;
pub mod diag;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use diag::Diag;
pub use eval::Calc;
