use core::cmp::Ordering;

use crate::{error::Error, mag, DWord, Word, WORD_BITS};

/// An arbitrary-precision signed integer.
///
/// The value is stored in sign-magnitude form: `mag` holds the absolute value
/// as little-endian base-2<sup>32</sup> words with no high zero words, and
/// zero is always the empty magnitude with a non-negative sign.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
  pub(crate) negative: bool,
  pub(crate) mag: Vec<Word>,
}

impl BigInt {
  pub const ZERO: BigInt = BigInt { negative: false, mag: Vec::new() };

  /// Builds a value from a sign and little-endian words, canonicalizing the
  /// result.
  pub fn from_words(negative: bool, words: Vec<Word>) -> Self {
    let mut value = BigInt { negative, mag: words };
    value.canonicalize();
    value
  }

  /// The little-endian words of the absolute value.
  pub fn words(&self) -> &[Word] {
    &self.mag
  }

  pub fn is_zero(&self) -> bool {
    self.mag.is_empty()
  }

  pub fn is_negative(&self) -> bool {
    self.negative
  }

  pub fn is_positive(&self) -> bool {
    !self.negative && !self.is_zero()
  }

  /// Returns `-1`, `0` or `1`.
  pub fn signum(&self) -> BigInt {
    match (self.negative, self.is_zero()) {
      (_, true) => BigInt::ZERO,
      (true, _) => BigInt::from(-1),
      (false, _) => BigInt::from(1),
    }
  }

  pub fn abs(&self) -> BigInt {
    BigInt { negative: false, mag: self.mag.clone() }
  }

  /// Number of significant bits in the magnitude.
  pub fn bit_len(&self) -> u64 {
    match self.mag.last() {
      None => 0,
      Some(top) => {
        (self.mag.len() as u64 - 1) * WORD_BITS as u64 + (WORD_BITS - top.leading_zeros()) as u64
      }
    }
  }

  /// Raises `self` to the power `exp` by repeated squaring.
  pub fn pow(&self, mut exp: u32) -> BigInt {
    let mut base = self.clone();
    let mut acc = BigInt::from(1);
    while exp != 0 {
      if exp & 1 == 1 {
        acc *= &base;
      }
      exp >>= 1;
      if exp != 0 {
        base = &base * &base;
      }
    }
    acc
  }

  /// Adds one in place.
  pub fn increment(&mut self) -> &mut Self {
    if self.negative {
      mag::sub_word(&mut self.mag, 1);
    } else {
      mag::add_word(&mut self.mag, 1);
    }
    self.fix_zero_sign();
    self
  }

  /// Subtracts one in place.
  pub fn decrement(&mut self) -> &mut Self {
    if self.negative {
      mag::add_word(&mut self.mag, 1);
    } else if self.is_zero() {
      self.negative = true;
      self.mag.push(1);
    } else {
      mag::sub_word(&mut self.mag, 1);
    }
    self.fix_zero_sign();
    self
  }

  /// Adds one in place, returning the previous value.
  pub fn post_increment(&mut self) -> BigInt {
    let old = self.clone();
    self.increment();
    old
  }

  /// Subtracts one in place, returning the previous value.
  pub fn post_decrement(&mut self) -> BigInt {
    let old = self.clone();
    self.decrement();
    old
  }

  pub(crate) fn canonicalize(&mut self) {
    mag::trim(&mut self.mag);
    self.fix_zero_sign();
  }

  pub(crate) fn fix_zero_sign(&mut self) {
    if self.is_zero() {
      self.negative = false;
    }
  }

  /// Compares absolute values.
  pub(crate) fn cmp_abs(&self, other: &BigInt) -> Ordering {
    mag::cmp(&self.mag, &other.mag)
  }

  /// Signed addition of `rhs`, optionally negated, into `self`.
  pub(crate) fn add_signed(&mut self, rhs: &BigInt, rhs_negative: bool) {
    if self.negative == rhs_negative {
      mag::add_assign(&mut self.mag, &rhs.mag);
    } else if self.cmp_abs(rhs) == Ordering::Less {
      let mut diff = rhs.mag.clone();
      mag::sub_assign(&mut diff, &self.mag);
      self.mag = diff;
      self.negative = rhs_negative;
    } else {
      mag::sub_assign(&mut self.mag, &rhs.mag);
    }
    self.fix_zero_sign();
  }

  pub(crate) fn mul_assign_ref(&mut self, rhs: &BigInt) {
    if self.is_zero() || rhs.is_zero() {
      *self = BigInt::ZERO;
      return;
    }
    self.mag = mag::mul(&self.mag, &rhs.mag);
    self.negative ^= rhs.negative;
  }
}

macro_rules! from_unsigned {
  ($($ty:ty),*) => {$(
    impl From<$ty> for BigInt {
      fn from(n: $ty) -> BigInt {
        BigInt::from_u128(n as u128, false)
      }
    }
  )*};
}

macro_rules! from_signed {
  ($($ty:ty),*) => {$(
    impl From<$ty> for BigInt {
      fn from(n: $ty) -> BigInt {
        BigInt::from_u128((n as i128).unsigned_abs(), n < 0)
      }
    }
  )*};
}

from_unsigned!(u8, u16, u32, u64, u128, usize);
from_signed!(i8, i16, i32, i64, i128, isize);

impl BigInt {
  fn from_u128(mut n: u128, negative: bool) -> BigInt {
    let mut mag = Vec::new();
    while n != 0 {
      mag.push(n as Word);
      n >>= WORD_BITS;
    }
    BigInt { negative: negative && !mag.is_empty(), mag }
  }

  fn to_u64_abs(&self) -> Result<u64, Error> {
    match self.mag[..] {
      [] => Ok(0),
      [n] => Ok(n as u64),
      [n, m] => Ok(n as DWord | (m as DWord) << WORD_BITS),
      _ => Err(Error::OutOfRange),
    }
  }
}

impl TryFrom<&BigInt> for u64 {
  type Error = Error;

  fn try_from(value: &BigInt) -> Result<u64, Error> {
    if value.negative {
      return Err(Error::OutOfRange);
    }
    value.to_u64_abs()
  }
}

impl TryFrom<&BigInt> for i64 {
  type Error = Error;

  fn try_from(value: &BigInt) -> Result<i64, Error> {
    let abs = value.to_u64_abs()?;
    if value.negative {
      0i64.checked_sub_unsigned(abs).ok_or(Error::OutOfRange)
    } else {
      i64::try_from(abs).map_err(|_| Error::OutOfRange)
    }
  }
}

impl TryFrom<&BigInt> for usize {
  type Error = Error;

  fn try_from(value: &BigInt) -> Result<usize, Error> {
    usize::try_from(u64::try_from(value)?).map_err(|_| Error::OutOfRange)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn native_extremes() {
    assert_eq!(BigInt::from(0u8).words(), &[] as &[Word]);
    assert_eq!(BigInt::from(-1i8).words(), &[1]);
    assert!(BigInt::from(-1i8).is_negative());
    assert_eq!(BigInt::from(i64::MIN).words(), &[0, 0x8000_0000]);
    assert_eq!(BigInt::from(u64::MAX).words(), &[u32::MAX, u32::MAX]);
    assert_eq!(BigInt::from(i128::MIN).words(), &[0, 0, 0, 0x8000_0000]);
    assert_eq!(BigInt::from(u128::MAX).words(), &[u32::MAX; 4]);
  }

  #[test]
  fn from_words_canonicalizes() {
    let zero = BigInt::from_words(true, vec![0, 0]);
    assert_eq!(zero, BigInt::ZERO);
    assert!(!zero.is_negative());
    assert_eq!(BigInt::from_words(false, vec![3, 0]).words(), &[3]);
  }

  #[test]
  fn increment_and_decrement_cross_zero() {
    let mut n = BigInt::from(1);
    n.decrement();
    assert_eq!(n, BigInt::ZERO);
    n.decrement();
    assert_eq!(n, BigInt::from(-1));
    assert!(n.is_negative());
    n.increment();
    assert_eq!(n, BigInt::ZERO);
    assert!(!n.is_negative());

    let mut m = BigInt::from(u32::MAX);
    assert_eq!(m.post_increment(), BigInt::from(u32::MAX));
    assert_eq!(m.words(), &[0, 1]);
    assert_eq!(m.post_decrement(), BigInt::from(1u64 << 32));
    assert_eq!(m, BigInt::from(u32::MAX));
  }

  #[test]
  fn native_conversions() {
    assert_eq!(i64::try_from(&BigInt::from(i64::MIN)), Ok(i64::MIN));
    assert_eq!(i64::try_from(&BigInt::from(i64::MAX)), Ok(i64::MAX));
    assert_eq!(i64::try_from(&BigInt::from(1u64 << 63)), Err(Error::OutOfRange));
    assert_eq!(u64::try_from(&BigInt::from(-1)), Err(Error::OutOfRange));
    assert_eq!(u64::try_from(&BigInt::from(u64::MAX)), Ok(u64::MAX));
    assert_eq!(u64::try_from(&BigInt::from(u128::MAX)), Err(Error::OutOfRange));
    assert_eq!(usize::try_from(&BigInt::from(42)), Ok(42));
  }

  #[test]
  fn pow_and_bit_len() {
    assert_eq!(BigInt::from(2).pow(100).bit_len(), 101);
    assert_eq!(BigInt::from(-3).pow(3), BigInt::from(-27));
    assert_eq!(BigInt::from(7).pow(0), BigInt::from(1));
    assert_eq!(BigInt::ZERO.pow(5), BigInt::ZERO);
    assert_eq!(BigInt::ZERO.bit_len(), 0);
  }

  #[test]
  fn signum_and_abs() {
    assert_eq!(BigInt::from(-12).signum(), BigInt::from(-1));
    assert_eq!(BigInt::ZERO.signum(), BigInt::ZERO);
    assert_eq!(BigInt::from(12).signum(), BigInt::from(1));
    assert_eq!(BigInt::from(-12).abs(), BigInt::from(12));
    assert!(BigInt::from(3).is_positive());
    assert!(!BigInt::ZERO.is_positive());
  }
}
