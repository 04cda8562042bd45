//! Operator trait implementations.
//!
//! Each binary operator clones its left operand and applies the compound
//! form, so the algorithms live in exactly one place.

use core::{
  cmp::Ordering,
  iter::{self, Product, Sum},
  ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
  },
};

use crate::{int::BigInt, mag, WORD_BITS};

impl BigInt {
  fn add_assign_ref(&mut self, rhs: &BigInt) {
    self.add_signed(rhs, rhs.negative);
  }

  fn sub_assign_ref(&mut self, rhs: &BigInt) {
    self.add_signed(rhs, !rhs.negative);
  }

  fn div_assign_ref(&mut self, rhs: &BigInt) {
    match self.div_rem(rhs) {
      Ok((quotient, _)) => *self = quotient,
      Err(err) => panic!("{err}"),
    }
  }

  fn rem_assign_ref(&mut self, rhs: &BigInt) {
    match self.div_rem(rhs) {
      Ok((_, rem)) => *self = rem,
      Err(err) => panic!("{err}"),
    }
  }
}

macro_rules! binary_ops {
  ($($Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $method:ident;)*) => {$(
    impl $OpAssign<&BigInt> for BigInt {
      fn $op_assign(&mut self, rhs: &BigInt) {
        self.$method(rhs);
      }
    }

    impl $OpAssign<BigInt> for BigInt {
      fn $op_assign(&mut self, rhs: BigInt) {
        self.$method(&rhs);
      }
    }

    impl $Op<&BigInt> for BigInt {
      type Output = BigInt;

      fn $op(mut self, rhs: &BigInt) -> BigInt {
        self.$method(rhs);
        self
      }
    }

    impl $Op<BigInt> for BigInt {
      type Output = BigInt;

      fn $op(mut self, rhs: BigInt) -> BigInt {
        self.$method(&rhs);
        self
      }
    }

    impl $Op<&BigInt> for &BigInt {
      type Output = BigInt;

      fn $op(self, rhs: &BigInt) -> BigInt {
        self.clone().$op(rhs)
      }
    }

    impl $Op<BigInt> for &BigInt {
      type Output = BigInt;

      fn $op(self, rhs: BigInt) -> BigInt {
        self.clone().$op(&rhs)
      }
    }

    binary_ops!(@native $Op::$op, $OpAssign::$op_assign, i64, u32);
  )*};

  (@native $Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident, $($ty:ty),*) => {$(
    impl $OpAssign<$ty> for BigInt {
      fn $op_assign(&mut self, rhs: $ty) {
        self.$op_assign(&BigInt::from(rhs));
      }
    }

    impl $Op<$ty> for BigInt {
      type Output = BigInt;

      fn $op(self, rhs: $ty) -> BigInt {
        self.$op(&BigInt::from(rhs))
      }
    }

    impl $Op<$ty> for &BigInt {
      type Output = BigInt;

      fn $op(self, rhs: $ty) -> BigInt {
        self.clone().$op(&BigInt::from(rhs))
      }
    }
  )*};
}

binary_ops! {
  Add::add, AddAssign::add_assign => add_assign_ref;
  Sub::sub, SubAssign::sub_assign => sub_assign_ref;
  Mul::mul, MulAssign::mul_assign => mul_assign_ref;
  Div::div, DivAssign::div_assign => div_assign_ref;
  Rem::rem, RemAssign::rem_assign => rem_assign_ref;
  BitAnd::bitand, BitAndAssign::bitand_assign => bitand_assign_ref;
  BitOr::bitor, BitOrAssign::bitor_assign => bitor_assign_ref;
  BitXor::bitxor, BitXorAssign::bitxor_assign => bitxor_assign_ref;
}

impl Neg for BigInt {
  type Output = BigInt;

  fn neg(mut self) -> BigInt {
    self.negative = !self.negative;
    self.fix_zero_sign();
    self
  }
}

impl Neg for &BigInt {
  type Output = BigInt;

  fn neg(self) -> BigInt {
    -self.clone()
  }
}

impl Not for BigInt {
  type Output = BigInt;

  fn not(mut self) -> BigInt {
    self.not_in_place();
    self
  }
}

impl Not for &BigInt {
  type Output = BigInt;

  fn not(self) -> BigInt {
    !self.clone()
  }
}

impl ShlAssign<usize> for BigInt {
  fn shl_assign(&mut self, bits: usize) {
    if self.is_zero() {
      return;
    }
    let words = bits / WORD_BITS as usize;
    mag::mul_word(&mut self.mag, 1 << (bits % WORD_BITS as usize));
    self.mag.splice(0..0, iter::repeat(0).take(words));
  }
}

impl ShrAssign<usize> for BigInt {
  /// Arithmetic shift: rounds toward negative infinity.
  fn shr_assign(&mut self, bits: usize) {
    let words = bits / WORD_BITS as usize;
    if words >= self.mag.len() {
      *self = if self.negative { BigInt::from(-1) } else { BigInt::ZERO };
      return;
    }
    let dropped_bits = self.mag.drain(..words).any(|w| w != 0);
    let rem = mag::div_word(&mut self.mag, 1 << (bits % WORD_BITS as usize));
    if self.negative && (dropped_bits || rem != 0) {
      mag::add_word(&mut self.mag, 1);
    }
    self.fix_zero_sign();
  }
}

impl Shl<usize> for BigInt {
  type Output = BigInt;

  fn shl(mut self, bits: usize) -> BigInt {
    self <<= bits;
    self
  }
}

impl Shl<usize> for &BigInt {
  type Output = BigInt;

  fn shl(self, bits: usize) -> BigInt {
    self.clone() << bits
  }
}

impl Shr<usize> for BigInt {
  type Output = BigInt;

  fn shr(mut self, bits: usize) -> BigInt {
    self >>= bits;
    self
  }
}

impl Shr<usize> for &BigInt {
  type Output = BigInt;

  fn shr(self, bits: usize) -> BigInt {
    self.clone() >> bits
  }
}

impl PartialOrd for BigInt {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for BigInt {
  fn cmp(&self, other: &Self) -> Ordering {
    match (self.negative, other.negative) {
      (true, false) => Ordering::Less,
      (false, true) => Ordering::Greater,
      (false, false) => self.cmp_abs(other),
      (true, true) => other.cmp_abs(self),
    }
  }
}

impl<T: Into<BigInt>> Sum<T> for BigInt {
  fn sum<I: Iterator<Item = T>>(iter: I) -> BigInt {
    iter.fold(BigInt::ZERO, |acc, n| acc + n.into())
  }
}

impl<T: Into<BigInt>> Product<T> for BigInt {
  fn product<I: Iterator<Item = T>>(iter: I) -> BigInt {
    iter.fold(BigInt::from(1), |acc, n| acc * n.into())
  }
}
