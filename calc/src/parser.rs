use std::mem::transmute;

use bigint_util::parser::{Parser, ParserState};

use crate::{
  ast::{BinaryOp, ComparisonOp, Expr, ExprKind, Span, Stmt, StmtKind},
  diag::Diag,
  lexer::Token,
};

pub struct CalcParser<'src> {
  pub(crate) state: ParserState<'src, Token>,
}

impl<'src> Parser<'src> for CalcParser<'src> {
  type Token = Token;
  type Error = Diag;

  fn state(&mut self) -> &mut ParserState<'src, Self::Token> {
    &mut self.state
  }

  fn lex_error(&self) -> Self::Error {
    Diag::LexError { span: self.span() }
  }

  fn unexpected_error(&self) -> Diag {
    Diag::UnexpectedToken {
      span: self.span(),
      expected: self.state.expected,
      found: self.state.token,
    }
  }
}

type Parse<T = ()> = Result<T, Diag>;

impl<'src> CalcParser<'src> {
  pub fn parse(src: &'src str) -> Parse<Vec<Stmt>> {
    let mut parser = CalcParser { state: ParserState::new(src) };
    parser.bump()?;
    let mut stmts = Vec::new();
    loop {
      while parser.eat_separator()? {}
      if parser.state.token.is_none() {
        break;
      }
      stmts.push(parser.parse_stmt()?);
      if parser.state.token.is_some() && !parser.eat_separator()? {
        return parser.unexpected();
      }
    }
    Ok(stmts)
  }

  fn eat_separator(&mut self) -> Parse<bool> {
    Ok(self.eat(Token::Newline)? || self.eat(Token::Semi)?)
  }

  fn parse_stmt(&mut self) -> Parse<Stmt> {
    let span = self.start_span();
    let expr = self.parse_expr()?;
    let kind = if self.eat(Token::Eq)? {
      let ExprKind::Var(name) = expr.kind else {
        return Err(Diag::InvalidAssign { span: expr.span });
      };
      StmtKind::Assign(name, self.parse_expr()?)
    } else {
      StmtKind::Expr(expr)
    };
    Ok(Stmt { span: self.end_span(span), kind })
  }

  pub(crate) fn parse_expr(&mut self) -> Parse<Expr> {
    self.parse_expr_bp(BP::Min)
  }

  fn parse_expr_bp(&mut self, bp: BP) -> Parse<Expr> {
    let span = self.start_span();
    let mut expr = self.parse_expr_prefix()?;
    loop {
      expr = match self.parse_expr_postfix(expr, bp)? {
        Ok(kind) => Expr { span: self.end_span(span), kind },
        Err(expr) => return Ok(expr),
      }
    }
  }

  fn parse_expr_prefix(&mut self) -> Parse<Expr> {
    let span = self.start_span();
    let kind = self._parse_expr_prefix()?;
    let span = self.end_span(span);
    Ok(Expr { span, kind })
  }

  fn _parse_expr_prefix(&mut self) -> Parse<ExprKind> {
    if self.eat(Token::Minus)? {
      return Ok(ExprKind::Neg(Box::new(self.parse_expr_bp(BP::Prefix)?)));
    }
    if self.eat(Token::Tilde)? {
      return Ok(ExprKind::BitNot(Box::new(self.parse_expr_bp(BP::Prefix)?)));
    }
    if self.eat(Token::Bang)? {
      return Ok(ExprKind::Not(Box::new(self.parse_expr_bp(BP::Prefix)?)));
    }
    if self.check(Token::Num) {
      let span = self.span();
      let token = self.expect(Token::Num)?;
      let n = self.parse_int_like(token, |err| Diag::InvalidNum { span, err })?;
      return Ok(ExprKind::Int(n));
    }
    if self.check(Token::Ident) {
      let name = self.expect(Token::Ident)?.to_owned();
      if self.check(Token::OpenParen) {
        let args = self.parse_delimited(PAREN_COMMA, Self::parse_expr)?;
        return Ok(ExprKind::Call(name, args));
      }
      return Ok(ExprKind::Var(name));
    }
    if self.eat(Token::OpenParen)? {
      let expr = self.parse_expr()?;
      self.expect(Token::CloseParen)?;
      return Ok(expr.kind);
    }
    self.unexpected()
  }

  fn parse_expr_postfix(&mut self, lhs: Expr, bp: BP) -> Parse<Result<ExprKind, Expr>> {
    for &(lbp, token, op) in BINARY_OP_TABLE {
      let rbp = lbp.inc(); // left-associative
      if bp.permits(lbp) && self.eat(token)? {
        return Ok(Ok(ExprKind::BinaryOp(op, Box::new(lhs), Box::new(self.parse_expr_bp(rbp)?))));
      }
    }

    if bp.permits(BP::Comparison) {
      for &(token, op) in COMPARISON_OP_TABLE {
        if self.eat(token)? {
          let rhs = self.parse_expr_bp(BP::Comparison.inc())?;
          return Ok(Ok(ExprKind::ComparisonOp(op, Box::new(lhs), Box::new(rhs))));
        }
      }
    }

    Ok(Err(lhs))
  }

  fn start_span(&self) -> usize {
    self.state.lexer.span().start
  }

  fn end_span(&self, span: usize) -> Span {
    Span { start: span, end: self.state.last_token_end }
  }

  fn span(&self) -> Span {
    let span = self.state.lexer.span();
    Span { start: span.start, end: span.end }
  }
}

#[allow(clippy::absolute_paths)]
type Delimiters = bigint_util::parser::Delimiters<Token>;

const PAREN_COMMA: Delimiters = Delimiters {
  open: Some(Token::OpenParen),
  close: Some(Token::CloseParen),
  separator: Some(Token::Comma),
};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
enum BP {
  Min,
  Comparison,
  BitOr,
  BitXor,
  BitAnd,
  BitShift,
  Additive,
  Multiplicative,
  Prefix,
  Max,
}

impl BP {
  const fn inc(self) -> Self {
    if self as u8 == BP::Max as u8 {
      self
    } else {
      unsafe { transmute::<u8, BP>(self as u8 + 1) }
    }
  }

  fn permits(self, other: Self) -> bool {
    other >= self
  }
}

#[rustfmt::skip]
const BINARY_OP_TABLE: &[(BP, Token, BinaryOp)] = &[
  (BP::BitOr,          Token::Or,      BinaryOp::BitOr),
  (BP::BitXor,         Token::Caret,   BinaryOp::BitXor),
  (BP::BitAnd,         Token::And,     BinaryOp::BitAnd),
  (BP::BitShift,       Token::Shl,     BinaryOp::Shl),
  (BP::BitShift,       Token::Shr,     BinaryOp::Shr),
  (BP::Additive,       Token::Plus,    BinaryOp::Add),
  (BP::Additive,       Token::Minus,   BinaryOp::Sub),
  (BP::Multiplicative, Token::Star,    BinaryOp::Mul),
  (BP::Multiplicative, Token::Slash,   BinaryOp::Div),
  (BP::Multiplicative, Token::Percent, BinaryOp::Rem),
];

#[rustfmt::skip]
const COMPARISON_OP_TABLE: &[(Token, ComparisonOp)] = &[
  (Token::EqEq, ComparisonOp::Eq),
  (Token::Ne,   ComparisonOp::Ne),
  (Token::Lt,   ComparisonOp::Lt),
  (Token::Gt,   ComparisonOp::Gt),
  (Token::Le,   ComparisonOp::Le),
  (Token::Ge,   ComparisonOp::Ge),
];
