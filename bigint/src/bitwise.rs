//! Bitwise operators with infinite two's-complement semantics.
//!
//! Values stay in sign-magnitude form; a negative operand is viewed through
//! [`TwosComplement`], which complements each word and adds the carry on the
//! fly. Words past the stored length read as the sign extension.

use core::slice;

use crate::{int::BigInt, mag, Word};

/// The two's-complement words of a value, extended forever with its sign.
struct TwosComplement<'a> {
  words: slice::Iter<'a, Word>,
  negative: bool,
  carry: bool,
}

impl<'a> TwosComplement<'a> {
  fn new(value: &'a BigInt) -> Self {
    TwosComplement { words: value.mag.iter(), negative: value.negative, carry: true }
  }

  fn next_word(&mut self) -> Word {
    match self.words.next() {
      Some(&w) if self.negative => {
        let (w, carry) = (!w).overflowing_add(self.carry as Word);
        self.carry = carry;
        w
      }
      Some(&w) => w,
      // a nonzero magnitude always absorbs the carry before its end
      None if self.negative => !0,
      None => 0,
    }
  }
}

impl BigInt {
  fn apply_bitwise(&mut self, rhs: &BigInt, op: impl Fn(Word, Word) -> Word) {
    let len = self.mag.len().max(rhs.mag.len());
    let mut a = TwosComplement::new(self);
    let mut b = TwosComplement::new(rhs);
    let mut words: Vec<Word> = (0..len).map(|_| op(a.next_word(), b.next_word())).collect();
    let negative = op(sign_word(self.negative), sign_word(rhs.negative)) != 0;
    if negative {
      negate_in_place(&mut words);
    }
    mag::trim(&mut words);
    self.mag = words;
    self.negative = negative;
    self.fix_zero_sign();
  }

  pub(crate) fn bitand_assign_ref(&mut self, rhs: &BigInt) {
    self.apply_bitwise(rhs, |a, b| a & b);
  }

  pub(crate) fn bitor_assign_ref(&mut self, rhs: &BigInt) {
    self.apply_bitwise(rhs, |a, b| a | b);
  }

  pub(crate) fn bitxor_assign_ref(&mut self, rhs: &BigInt) {
    self.apply_bitwise(rhs, |a, b| a ^ b);
  }

  /// `!self == -self - 1`
  pub(crate) fn not_in_place(&mut self) {
    self.increment();
    self.negative = !self.negative;
    self.fix_zero_sign();
  }
}

fn sign_word(negative: bool) -> Word {
  if negative {
    !0
  } else {
    0
  }
}

/// Two's-complement negation of a word sequence whose sign extension is all
/// ones, yielding the magnitude.
fn negate_in_place(words: &mut Vec<Word>) {
  let mut carry = true;
  for w in words.iter_mut() {
    let (n, c) = (!*w).overflowing_add(carry as Word);
    *w = n;
    carry = c;
  }
  if carry {
    words.push(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn int(n: i128) -> BigInt {
    BigInt::from(n)
  }

  #[test]
  fn matches_native_twos_complement() {
    let samples =
      [0, 1, -1, 2, -2, 5, -5, 0xffff_ffff, -0xffff_ffff, 1 << 32, -(1 << 32), i64::MIN as i128];
    for &a in &samples {
      for &b in &samples {
        assert_eq!(&int(a) & &int(b), int(a & b), "{a} & {b}");
        assert_eq!(&int(a) | &int(b), int(a | b), "{a} | {b}");
        assert_eq!(&int(a) ^ &int(b), int(a ^ b), "{a} ^ {b}");
      }
      assert_eq!(!int(a), int(!a), "!{a}");
    }
  }

  #[test]
  fn negative_one_and_one() {
    assert_eq!(&int(-1) & &int(1), int(1));
  }

  #[test]
  fn result_wider_than_operands() {
    assert_eq!(&int(-(1 << 32)) & &int(-1), int(-(1 << 32)));
    // every stored word cancels, so negation carries into a new word
    assert_eq!(&int(-(1 << 32)) ^ &int(0xffff_ffff_0000_0000), int(-(1 << 64)));
    assert_eq!(&int(-(1 << 32)) ^ &int(0xffff_ffff), int(-1));
    assert_eq!(&int(-(1 << 32)) | &int(-(1 << 32)), int(-(1 << 32)));
  }

  #[test]
  fn zero_results_are_canonical() {
    let x = &int(-7) ^ &int(-7);
    assert!(x.is_zero() && !x.is_negative());
    let y = !int(-1);
    assert!(y.is_zero() && !y.is_negative());
  }
}
