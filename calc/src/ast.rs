use std::fmt::{self, Display};

use bigint::BigInt;

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
  pub start: usize,
  pub end: usize,
}

#[derive(Debug, Clone)]
pub struct Stmt {
  pub span: Span,
  pub kind: StmtKind,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
  Assign(String, Expr),
  Expr(Expr),
}

#[derive(Debug, Clone)]
pub struct Expr {
  pub span: Span,
  pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
  Int(BigInt),
  Var(String),
  Neg(B<Expr>),
  BitNot(B<Expr>),
  Not(B<Expr>),
  BinaryOp(BinaryOp, B<Expr>, B<Expr>),
  ComparisonOp(ComparisonOp, B<Expr>, B<Expr>),
  Call(String, Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  BitOr,
  BitXor,
  BitAnd,
  Shl,
  Shr,
  Add,
  Sub,
  Mul,
  Div,
  Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
  Eq,
  Ne,
  Lt,
  Gt,
  Le,
  Ge,
}

pub type B<T> = Box<T>;

impl Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      BinaryOp::BitOr => "|",
      BinaryOp::BitXor => "^",
      BinaryOp::BitAnd => "&",
      BinaryOp::Shl => "<<",
      BinaryOp::Shr => ">>",
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Rem => "%",
    })
  }
}
