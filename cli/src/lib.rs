mod bigcalc_cli;
mod common;

pub use bigcalc_cli::*;
pub use common::*;
