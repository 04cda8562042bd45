//! Unsigned magnitude arithmetic over little-endian word slices.
//!
//! Every function that produces a `Vec<Word>` leaves it trimmed: the most
//! significant word is nonzero, or the vector is empty.

use core::cmp::Ordering;

use crate::{DWord, Word, WORD_BITS};

pub(crate) fn trim(mag: &mut Vec<Word>) {
  while mag.last().is_some_and(|&w| w == 0) {
    mag.pop();
  }
}

/// Borrows the prefix of `mag` that excludes any high zero words.
pub(crate) fn trimmed(mag: &[Word]) -> &[Word] {
  let len = mag.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1);
  &mag[..len]
}

/// Compares two trimmed magnitudes.
pub(crate) fn cmp(a: &[Word], b: &[Word]) -> Ordering {
  a.len().cmp(&b.len()).then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

pub(crate) fn add_assign(a: &mut Vec<Word>, b: &[Word]) {
  if a.len() < b.len() {
    a.resize(b.len(), 0);
  }
  let mut carry = false;
  for (i, d) in a.iter_mut().enumerate() {
    if i >= b.len() && !carry {
      break;
    }
    let (sum, c0) = d.overflowing_add(b.get(i).copied().unwrap_or(0));
    let (sum, c1) = sum.overflowing_add(carry as Word);
    *d = sum;
    carry = c0 | c1;
  }
  if carry {
    a.push(1);
  }
}

pub(crate) fn add_word(a: &mut Vec<Word>, mut n: Word) {
  for d in a.iter_mut() {
    if n == 0 {
      return;
    }
    let (sum, carry) = d.overflowing_add(n);
    *d = sum;
    n = carry as Word;
  }
  if n != 0 {
    a.push(n);
  }
}

/// Subtracts `b` from `a` in place, returning the outgoing borrow.
///
/// Words of `b` beyond the length of `a` are ignored.
pub(crate) fn sub_borrow(a: &mut [Word], b: &[Word]) -> bool {
  let mut borrow = false;
  for (i, d) in a.iter_mut().enumerate() {
    if i >= b.len() && !borrow {
      break;
    }
    let (diff, b0) = d.overflowing_sub(b.get(i).copied().unwrap_or(0));
    let (diff, b1) = diff.overflowing_sub(borrow as Word);
    *d = diff;
    borrow = b0 | b1;
  }
  borrow
}

/// `a -= b`; requires `a >= b`.
pub(crate) fn sub_assign(a: &mut Vec<Word>, b: &[Word]) {
  debug_assert!(cmp(a, b) != Ordering::Less, "magnitude subtraction would underflow");
  let borrow = sub_borrow(a, b);
  debug_assert!(!borrow);
  trim(a);
}

/// `a -= n`; requires `a >= n`.
pub(crate) fn sub_word(a: &mut Vec<Word>, n: Word) {
  debug_assert!(cmp(a, trimmed(&[n])) != Ordering::Less, "magnitude subtraction would underflow");
  let borrow = sub_borrow(a, &[n]);
  debug_assert!(!borrow);
  trim(a);
}

pub(crate) fn mul_word(a: &mut Vec<Word>, n: Word) {
  if n == 0 {
    a.clear();
    return;
  }
  let mut carry = 0;
  for d in a.iter_mut() {
    let total = *d as DWord * n as DWord + carry;
    *d = total as Word;
    carry = total >> WORD_BITS;
  }
  if carry != 0 {
    a.push(carry as Word);
  }
}

/// Schoolbook multiplication into a buffer of `a.len() + b.len()` words.
pub(crate) fn mul(a: &[Word], b: &[Word]) -> Vec<Word> {
  if a.is_empty() || b.is_empty() {
    return Vec::new();
  }
  let mut out = vec![0; a.len() + b.len()];
  for (i, &x) in a.iter().enumerate() {
    let mut carry: DWord = 0;
    for (j, &y) in b.iter().enumerate() {
      // at most (2^32 - 1) + (2^32 - 1)^2 + (2^32 - 1) = 2^64 - 1
      let total = out[i + j] as DWord + x as DWord * y as DWord + carry;
      out[i + j] = total as Word;
      carry = total >> WORD_BITS;
    }
    out[i + b.len()] = carry as Word;
  }
  trim(&mut out);
  out
}

/// Divides `a` by a single nonzero word in place, returning the remainder.
pub(crate) fn div_word(a: &mut Vec<Word>, n: Word) -> Word {
  debug_assert!(n != 0);
  let mut rem: DWord = 0;
  for d in a.iter_mut().rev() {
    let cur = rem << WORD_BITS | *d as DWord;
    *d = (cur / n as DWord) as Word;
    rem = cur % n as DWord;
  }
  trim(a);
  rem as Word
}
