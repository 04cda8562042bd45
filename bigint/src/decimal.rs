use core::{
  fmt::{self, Debug, Display},
  str::FromStr,
};

use crate::{
  error::{Error, FormatError},
  int::BigInt,
  mag, Word,
};

/// Decimal digits handled per word-sized step when formatting or parsing.
const MAX_CHUNK_DIGITS: usize = 9;

const CHUNK: Word = 1_000_000_000;

#[rustfmt::skip]
const POW10: [Word; MAX_CHUNK_DIGITS + 1] = [
  1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000, 1_000_000_000,
];

impl BigInt {
  /// Decimal digits of the magnitude, without sign.
  fn magnitude_digits(&self) -> String {
    if self.is_zero() {
      return "0".to_owned();
    }
    let mut rest = self.mag.clone();
    let mut chunks = Vec::with_capacity(rest.len() * 32 / 29 + 1);
    while !rest.is_empty() {
      chunks.push(mag::div_word(&mut rest, CHUNK));
    }
    let mut chunks = chunks.iter().rev();
    let mut digits = chunks.next().map(Word::to_string).unwrap_or_default();
    for chunk in chunks {
      digits.push_str(&format!("{chunk:09}"));
    }
    digits
  }
}

impl Display for BigInt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad_integral(!self.negative, "", &self.magnitude_digits())
  }
}

impl Debug for BigInt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    Display::fmt(self, f)
  }
}

impl FromStr for BigInt {
  type Err = Error;

  fn from_str(src: &str) -> Result<BigInt, Error> {
    if src.is_empty() {
      Err(FormatError::Empty)?
    }
    let digits = src.strip_prefix('-');
    let negative = digits.is_some();
    let digits = digits.unwrap_or(src);
    if digits.is_empty() {
      Err(FormatError::NoDigits)?
    }
    if let Some((index, found)) = digits.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
      Err(FormatError::InvalidDigit { index: index + negative as usize, found })?
    }

    let mut mag = Vec::with_capacity(digits.len() / MAX_CHUNK_DIGITS + 1);
    for chunk in digits.as_bytes().chunks(MAX_CHUNK_DIGITS) {
      let value = chunk.iter().fold(0, |acc, &b| acc * 10 + (b - b'0') as Word);
      mag::mul_word(&mut mag, POW10[chunk.len()]);
      mag::add_word(&mut mag, value);
    }
    Ok(BigInt::from_words(negative, mag))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(s: &str) -> BigInt {
    s.parse().unwrap()
  }

  #[test]
  fn formats_chunks_with_padding() {
    assert_eq!(BigInt::ZERO.to_string(), "0");
    assert_eq!(BigInt::from(1_000_000_000).to_string(), "1000000000");
    assert_eq!(BigInt::from(-1_000_000_007_i64).to_string(), "-1000000007");
    assert_eq!(BigInt::from(u128::MAX).to_string(), u128::MAX.to_string());
    assert_eq!(BigInt::from(i128::MIN).to_string(), i128::MIN.to_string());
  }

  #[test]
  fn honours_formatter_flags() {
    assert_eq!(format!("{:>6}", BigInt::from(-42)), "   -42");
    assert_eq!(format!("{:+}", BigInt::from(42)), "+42");
    assert_eq!(format!("{:06}", BigInt::from(-42)), "-00042");
    assert_eq!(format!("{:?}", BigInt::from(7)), "7");
  }

  #[test]
  fn parses_across_chunk_boundaries() {
    for s in ["1", "123456789", "1234567890", "4294967296", "-18446744073709551616"] {
      assert_eq!(parse(s).to_string(), s);
    }
    assert_eq!(parse("000000000000000000012"), BigInt::from(12));
    assert_eq!(parse("340282366920938463463374607431768211455"), BigInt::from(u128::MAX));
  }

  #[test]
  fn negative_zero_is_canonical() {
    let zero = parse("-0");
    assert_eq!(zero, BigInt::ZERO);
    assert!(!zero.is_negative());
    assert_eq!(parse("-000").to_string(), "0");
  }

  #[test]
  fn rejects_malformed_input() {
    let err = |s: &str| s.parse::<BigInt>().unwrap_err();
    assert_eq!(err(""), Error::InvalidFormat(FormatError::Empty));
    assert_eq!(err("-"), Error::InvalidFormat(FormatError::NoDigits));
    assert_eq!(err("12a4"), FormatError::InvalidDigit { index: 2, found: 'a' }.into());
    assert_eq!(err("-1-2"), FormatError::InvalidDigit { index: 2, found: '-' }.into());
    assert_eq!(err("+5"), FormatError::InvalidDigit { index: 0, found: '+' }.into());
    assert_eq!(err(" 5"), FormatError::InvalidDigit { index: 0, found: ' ' }.into());
    assert_eq!(err("--5"), FormatError::InvalidDigit { index: 1, found: '-' }.into());
  }
}
