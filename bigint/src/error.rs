use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("invalid integer literal: {0}")]
  InvalidFormat(#[from] FormatError),
  #[error("attempt to divide by zero")]
  DivisionByZero,
  #[error("integer does not fit in the target type")]
  OutOfRange,
}

/// Why a decimal string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
  #[error("expected a non-empty string")]
  Empty,
  #[error("no digits after sign")]
  NoDigits,
  #[error("unexpected character `{found}` at byte {index}; only digits are allowed")]
  InvalidDigit { index: usize, found: char },
}
