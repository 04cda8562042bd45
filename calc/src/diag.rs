use bigint_util::lexer::TokenSet;
use thiserror::Error;

use crate::{ast::Span, lexer::Token};

#[derive(Debug, Clone, Error)]
pub enum Diag {
  #[error("lexing error")]
  LexError { span: Span },
  #[error("expected one of {expected:?}; found {}", describe(.found))]
  UnexpectedToken { span: Span, expected: TokenSet<Token>, found: Option<Token> },
  #[error("{err}")]
  InvalidNum { span: Span, err: bigint::Error },
  #[error("only a variable can be assigned to")]
  InvalidAssign { span: Span },
  #[error("cannot find variable `{name}`")]
  UnknownVar { span: Span, name: String },
  #[error("cannot find function `{name}`")]
  UnknownFn { span: Span, name: String },
  #[error("function `{name}` expects {expected} argument{}; was passed {got}", plural(*.expected))]
  BadArgCount { span: Span, name: String, expected: usize, got: usize },
  #[error("attempt to divide by zero")]
  DivisionByZero { span: Span },
  #[error("{what} is out of range")]
  OutOfRange { span: Span, what: String },
}

impl Diag {
  pub fn span(&self) -> Span {
    match self {
      Diag::LexError { span }
      | Diag::UnexpectedToken { span, .. }
      | Diag::InvalidNum { span, .. }
      | Diag::InvalidAssign { span }
      | Diag::UnknownVar { span, .. }
      | Diag::UnknownFn { span, .. }
      | Diag::BadArgCount { span, .. }
      | Diag::DivisionByZero { span }
      | Diag::OutOfRange { span, .. } => *span,
    }
  }

  /// Renders the diagnostic with a `file:line:col` location into `src`.
  pub fn report(&self, file: &str, src: &str) -> String {
    let start = self.span().start.min(src.len());
    let before = &src[..start];
    let line = before.matches('\n').count() + 1;
    let col = before.rfind('\n').map_or(start, |i| start - i - 1) + 1;
    format!("error: {self}\n  --> {file}:{line}:{col}")
  }
}

fn describe(found: &Option<Token>) -> String {
  match found {
    Some(token) => format!("{token:?}"),
    None => "end of input".to_owned(),
  }
}

fn plural(n: usize) -> &'static str {
  if n == 1 {
    ""
  } else {
    "s"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reports_line_and_column() {
    let src = "x = 1\ny = 2 +\n";
    let diag = Diag::UnknownVar { span: Span { start: 10, end: 11 }, name: "z".into() };
    assert_eq!(diag.report("main.calc", src), "error: cannot find variable `z`\n  --> main.calc:2:5");
  }

  #[test]
  fn pluralizes_argument_counts() {
    let diag = Diag::BadArgCount { span: Span::default(), name: "abs".into(), expected: 1, got: 2 };
    assert_eq!(diag.to_string(), "function `abs` expects 1 argument; was passed 2");
  }
}
