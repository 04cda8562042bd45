use std::ops::ControlFlow;

use bigint::BigInt;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{
  ast::{BinaryOp, ComparisonOp, Expr, ExprKind, Span, Stmt, StmtKind},
  diag::Diag,
  parser::CalcParser,
};

/// Results wider than this many bits are rejected rather than allocated.
pub const MAX_RESULT_BITS: u64 = 1 << 24;

/// Evaluates calculator programs, keeping variable bindings between runs.
#[derive(Debug, Default)]
pub struct Calc {
  vars: IndexMap<String, BigInt>,
}

impl Calc {
  pub fn new() -> Self {
    Self::default()
  }

  /// Bindings in the order they were first assigned.
  pub fn vars(&self) -> impl Iterator<Item = (&str, &BigInt)> {
    self.vars.iter().map(|(name, value)| (name.as_str(), value))
  }

  /// Parses and executes `src`, passing the value of every expression statement to `emit`.
  ///
  /// Statements before a failing one keep their effects. Execution stops early, without error,
  /// when `emit` breaks.
  pub fn run(
    &mut self,
    src: &str,
    mut emit: impl FnMut(&BigInt) -> ControlFlow<()>,
  ) -> Result<(), Diag> {
    let stmts = CalcParser::parse(src)?;
    for stmt in &stmts {
      if let Some(value) = self.exec(stmt)? {
        if emit(&value).is_break() {
          break;
        }
      }
    }
    Ok(())
  }

  pub fn exec(&mut self, stmt: &Stmt) -> Result<Option<BigInt>, Diag> {
    debug!(start = stmt.span.start, end = stmt.span.end, "exec");
    match &stmt.kind {
      StmtKind::Assign(name, expr) => {
        let value = self.eval(expr)?;
        trace!(%name, %value, "bind");
        self.vars.insert(name.clone(), value);
        Ok(None)
      }
      StmtKind::Expr(expr) => self.eval(expr).map(Some),
    }
  }

  pub fn eval(&self, expr: &Expr) -> Result<BigInt, Diag> {
    Ok(match &expr.kind {
      ExprKind::Int(n) => n.clone(),
      ExprKind::Var(name) => match self.vars.get(name) {
        Some(value) => value.clone(),
        None => Err(Diag::UnknownVar { span: expr.span, name: name.clone() })?,
      },
      ExprKind::Neg(x) => -self.eval(x)?,
      ExprKind::BitNot(x) => !self.eval(x)?,
      ExprKind::Not(x) => truth(self.eval(x)?.is_zero()),
      ExprKind::BinaryOp(op, a, b) => {
        let lhs = self.eval(a)?;
        let rhs = self.eval(b)?;
        self.eval_binary_op(expr.span, *op, lhs, &rhs, b.span)?
      }
      ExprKind::ComparisonOp(op, a, b) => {
        let lhs = self.eval(a)?;
        let rhs = self.eval(b)?;
        truth(match op {
          ComparisonOp::Eq => lhs == rhs,
          ComparisonOp::Ne => lhs != rhs,
          ComparisonOp::Lt => lhs < rhs,
          ComparisonOp::Gt => lhs > rhs,
          ComparisonOp::Le => lhs <= rhs,
          ComparisonOp::Ge => lhs >= rhs,
        })
      }
      ExprKind::Call(name, args) => {
        let args =
          args.iter().map(|arg| Ok((self.eval(arg)?, arg.span))).collect::<Result<Vec<_>, Diag>>()?;
        self.call(expr.span, name, args)?
      }
    })
  }

  fn eval_binary_op(
    &self,
    span: Span,
    op: BinaryOp,
    lhs: BigInt,
    rhs: &BigInt,
    rhs_span: Span,
  ) -> Result<BigInt, Diag> {
    Ok(match op {
      BinaryOp::Add => lhs + rhs,
      BinaryOp::Sub => lhs - rhs,
      BinaryOp::Mul => lhs * rhs,
      BinaryOp::Div => lhs.checked_div(rhs).map_err(|_| Diag::DivisionByZero { span })?,
      BinaryOp::Rem => lhs.checked_rem(rhs).map_err(|_| Diag::DivisionByZero { span })?,
      BinaryOp::BitAnd => lhs & rhs,
      BinaryOp::BitOr => lhs | rhs,
      BinaryOp::BitXor => lhs ^ rhs,
      BinaryOp::Shl => {
        let n = shift_amount(rhs, rhs_span)?;
        if !lhs.is_zero() && lhs.bit_len().saturating_add(n as u64) > MAX_RESULT_BITS {
          Err(out_of_range("shift amount", rhs, rhs_span))?
        }
        lhs << n
      }
      BinaryOp::Shr => lhs >> shift_amount(rhs, rhs_span)?,
    })
  }

  fn call(&self, span: Span, name: &str, args: Vec<(BigInt, Span)>) -> Result<BigInt, Diag> {
    let arity = match name {
      "abs" | "sign" => 1,
      "pow" | "gcd" | "min" | "max" => 2,
      _ => Err(Diag::UnknownFn { span, name: name.to_owned() })?,
    };
    if args.len() != arity {
      Err(Diag::BadArgCount { span, name: name.to_owned(), expected: arity, got: args.len() })?
    }
    let mut args = args.into_iter();
    let mut arg = || args.next().unwrap_or_default();
    Ok(match name {
      "abs" => arg().0.abs(),
      "sign" => arg().0.signum(),
      "pow" => {
        let (base, _) = arg();
        let (exp, exp_span) = arg();
        pow(&base, &exp, exp_span)?
      }
      "gcd" => gcd(arg().0, arg().0),
      "min" => arg().0.min(arg().0),
      "max" => arg().0.max(arg().0),
      _ => unreachable!(),
    })
  }
}

fn truth(b: bool) -> BigInt {
  BigInt::from(b as u32)
}

fn shift_amount(n: &BigInt, span: Span) -> Result<usize, Diag> {
  usize::try_from(n).map_err(|_| out_of_range("shift amount", n, span))
}

fn pow(base: &BigInt, exp: &BigInt, span: Span) -> Result<BigInt, Diag> {
  let n = u64::try_from(exp)
    .ok()
    .and_then(|n| u32::try_from(n).ok())
    .ok_or_else(|| out_of_range("exponent", exp, span))?;
  if base.bit_len() > 1 && base.bit_len().saturating_mul(n as u64) > MAX_RESULT_BITS {
    Err(out_of_range("exponent", exp, span))?
  }
  Ok(base.pow(n))
}

fn gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
  while !b.is_zero() {
    let r = &a % &b;
    a = b;
    b = r;
  }
  a.abs()
}

fn out_of_range(what: &str, value: &BigInt, span: Span) -> Diag {
  Diag::OutOfRange { span, what: format!("{what} `{value}`") }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run(calc: &mut Calc, src: &str) -> Result<Vec<String>, Diag> {
    let mut out = Vec::new();
    calc.run(src, |value| {
      out.push(value.to_string());
      ControlFlow::Continue(())
    })?;
    Ok(out)
  }

  fn eval(src: &str) -> String {
    let out = run(&mut Calc::new(), src).unwrap();
    assert_eq!(out.len(), 1);
    out.into_iter().next().unwrap()
  }

  #[test]
  fn arithmetic() {
    assert_eq!(eval("123456789123456789 * -2"), "-246913578246913578");
    assert_eq!(eval("1000000000 / 3"), "333333333");
    assert_eq!(eval("1000000000 % 3"), "1");
    assert_eq!(eval("-7 / 2"), "-3");
    assert_eq!(eval("-7 % 3"), "-1");
    assert_eq!(eval("0 - 0"), "0");
    assert_eq!(eval("-0"), "0");
    assert_eq!(eval("-1 & 1"), "1");
    assert_eq!(eval("~0"), "-1");
    assert_eq!(eval("1 << 100"), "1267650600228229401496703205376");
    assert_eq!(eval("-5 >> 1"), "-3");
    assert_eq!(eval("-(1 << 32) ^ 18446744069414584320"), "-18446744073709551616");
  }

  #[test]
  fn comparisons_and_logic() {
    assert_eq!(eval("-1 < 0"), "1");
    assert_eq!(eval("2 >= 3"), "0");
    assert_eq!(eval("1 < 2 == 1"), "1");
    assert_eq!(eval("!0"), "1");
    assert_eq!(eval("!-7"), "0");
  }

  #[test]
  fn functions() {
    assert_eq!(eval("pow(2, 128)"), "340282366920938463463374607431768211456");
    assert_eq!(eval("pow(-3, 3)"), "-27");
    assert_eq!(eval("pow(1, 4294967295)"), "1");
    assert_eq!(eval("pow(-1, 4294967295)"), "-1");
    assert_eq!(eval("pow(0, 4294967295)"), "0");
    assert_eq!(eval("gcd(-12, 18)"), "6");
    assert_eq!(eval("gcd(0, 0)"), "0");
    assert_eq!(eval("min(-1, 1) + max(-1, 1)"), "0");
    assert_eq!(eval("abs(-5) * sign(-5)"), "-5");
  }

  #[test]
  fn variables_persist() {
    let mut calc = Calc::new();
    assert_eq!(run(&mut calc, "x = 10; y = x * x").unwrap(), Vec::<String>::new());
    assert_eq!(run(&mut calc, "y - x\nx = 1\nx").unwrap(), ["90", "1"]);
    let names: Vec<_> = calc.vars().map(|(name, _)| name).collect();
    assert_eq!(names, ["x", "y"]);
  }

  #[test]
  fn earlier_statements_take_effect_before_an_error() {
    let mut calc = Calc::new();
    let mut out = Vec::new();
    let err = calc
      .run("a = 1; a; a / 0; a = 2", |v| {
        out.push(v.to_string());
        ControlFlow::Continue(())
      })
      .unwrap_err();
    assert!(matches!(err, Diag::DivisionByZero { span: Span { start: 10, end: 15 } }));
    assert_eq!(out, ["1"]);
    assert_eq!(calc.vars().next().map(|(_, v)| v.to_string()), Some("1".to_owned()));
  }

  #[test]
  fn errors() {
    let err = |src| run(&mut Calc::new(), src).unwrap_err();
    assert!(matches!(err("q"), Diag::UnknownVar { name, .. } if name == "q"));
    assert!(matches!(err("sqrt(4)"), Diag::UnknownFn { name, .. } if name == "sqrt"));
    assert!(matches!(err("abs(1, 2)"), Diag::BadArgCount { expected: 1, got: 2, .. }));
    assert!(matches!(err("5 % 0"), Diag::DivisionByZero { .. }));
    assert!(matches!(err("1 << -1"), Diag::OutOfRange { .. }));
    assert!(matches!(err("1 << 100000000"), Diag::OutOfRange { .. }));
    assert!(matches!(err("pow(2, -1)"), Diag::OutOfRange { .. }));
    assert!(matches!(err("pow(2, 4294967296)"), Diag::OutOfRange { .. }));
    assert!(matches!(err("pow(3, 16777216)"), Diag::OutOfRange { .. }));
    assert!(matches!(err("pow(-3, 8388609)"), Diag::OutOfRange { .. }));
    assert!(matches!(err("pow(1 << 1000, 16778)"), Diag::OutOfRange { .. }));
    assert_eq!(
      err("1 >> 99999999999999999999999").to_string(),
      "shift amount `99999999999999999999999` is out of range"
    );
  }
}
