//! Multi-word long division.
//!
//! This is Knuth's Algorithm D: both operands are normalized so that the top
//! word of the divisor has its high bit set, which keeps each trial quotient
//! digit within a small distance above the true digit. The estimate is then
//! corrected downward until the partial product fits in the remainder window.

use core::cmp::Ordering;

use crate::{error::Error, int::BigInt, mag, DWord, Word, BASE, WORD_BITS};

/// Divides magnitudes, returning `(quotient, remainder)`.
///
/// `v` must be nonzero.
pub(crate) fn div_rem_mag(u: &[Word], v: &[Word]) -> (Vec<Word>, Vec<Word>) {
  debug_assert!(!v.is_empty(), "division by a zero magnitude");

  if mag::cmp(u, v) == Ordering::Less {
    return (Vec::new(), u.to_vec());
  }

  if let [d] = *v {
    let mut quotient = u.to_vec();
    let rem = mag::div_word(&mut quotient, d);
    return (quotient, mag::trimmed(&[rem]).to_vec());
  }

  let shift = v[v.len() - 1].leading_zeros();
  let mut divisor = v.to_vec();
  mag::mul_word(&mut divisor, 1 << shift);
  let mut rem = u.to_vec();
  mag::mul_word(&mut rem, 1 << shift);

  let n = divisor.len();
  let top = divisor[n - 1] as DWord;
  debug_assert!(top >= BASE / 2);
  let m = rem.len() - n;
  let mut quotient = vec![0; m + 1];

  for j in (0..=m).rev() {
    let hi = rem.get(j + n).copied().unwrap_or(0) as DWord;
    let lo = rem[j + n - 1] as DWord;
    let mut digit = ((hi << WORD_BITS | lo) / top).min(BASE - 1);

    let end = rem.len().min(j + n + 1);
    let mut product = divisor.clone();
    mag::mul_word(&mut product, digit as Word);
    while mag::cmp(&product, mag::trimmed(&rem[j..end])) == Ordering::Greater {
      digit -= 1;
      mag::sub_assign(&mut product, &divisor);
    }

    let borrow = mag::sub_borrow(&mut rem[j..end], &product);
    debug_assert!(!borrow);
    quotient[j] = digit as Word;
  }

  mag::trim(&mut quotient);
  mag::trim(&mut rem);
  mag::div_word(&mut rem, 1 << shift);
  (quotient, rem)
}

impl BigInt {
  /// Truncating division, returning `(quotient, remainder)`.
  ///
  /// The quotient rounds toward zero and the remainder takes the sign of
  /// `self`, matching the primitive integer operators.
  pub fn div_rem(&self, rhs: &BigInt) -> Result<(BigInt, BigInt), Error> {
    if rhs.is_zero() {
      return Err(Error::DivisionByZero);
    }
    let (quotient, rem) = div_rem_mag(&self.mag, &rhs.mag);
    Ok((
      BigInt::from_words(self.negative ^ rhs.negative, quotient),
      BigInt::from_words(self.negative, rem),
    ))
  }

  pub fn checked_div(&self, rhs: &BigInt) -> Result<BigInt, Error> {
    Ok(self.div_rem(rhs)?.0)
  }

  pub fn checked_rem(&self, rhs: &BigInt) -> Result<BigInt, Error> {
    Ok(self.div_rem(rhs)?.1)
  }
}
