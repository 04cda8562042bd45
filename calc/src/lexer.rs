use std::mem::transmute;

use bigint_util::lexer::{lex_block_comment, Token as TokenTrait};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[logos(skip r"[ \t\r\f]+")]
#[repr(u8)]
pub enum Token {
  #[token("\n")]
  Newline,
  #[token(";")]
  Semi,
  #[token(",")]
  Comma,
  #[token("(")]
  OpenParen,
  #[token(")")]
  CloseParen,
  #[token("=")]
  Eq,
  #[token("==")]
  EqEq,
  #[token("!=")]
  Ne,
  #[token("<")]
  Lt,
  #[token(">")]
  Gt,
  #[token("<=")]
  Le,
  #[token(">=")]
  Ge,
  #[token("<<")]
  Shl,
  #[token(">>")]
  Shr,
  #[token("+")]
  Plus,
  #[token("-")]
  Minus,
  #[token("*")]
  Star,
  #[token("/")]
  Slash,
  #[token("%")]
  Percent,
  #[token("&")]
  And,
  #[token("|")]
  Or,
  #[token("^")]
  Caret,
  #[token("~")]
  Tilde,
  #[token("!")]
  Bang,

  #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
  Ident,
  #[regex(r"[0-9][0-9A-Za-z_]*")]
  Num,

  #[regex("//[^\n]*", logos::skip)]
  #[token("/*", lex_block_comment)]
  Skip,
}

impl TokenTrait for Token {
  fn into_u8(self) -> u8 {
    self as u8
  }

  unsafe fn from_u8(value: u8) -> Self {
    unsafe { transmute::<u8, Token>(value) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lex(src: &str) -> Vec<Token> {
    Token::lexer(src).map(|t| t.unwrap()).collect()
  }

  #[test]
  fn longest_operator_wins() {
    assert_eq!(lex("<< <= < >> >= > == = !="), [
      Token::Shl,
      Token::Le,
      Token::Lt,
      Token::Shr,
      Token::Ge,
      Token::Gt,
      Token::EqEq,
      Token::Eq,
      Token::Ne,
    ]);
  }

  #[test]
  fn skips_comments() {
    assert_eq!(lex("1 // two\n/* three /* nested */ */ x"), [
      Token::Num,
      Token::Newline,
      Token::Ident,
    ]);
    assert_eq!(lex("a /* unterminated"), [Token::Ident]);
  }

  #[test]
  fn rejects_unknown_characters() {
    assert!(Token::lexer("1 $ 2").any(|t| t.is_err()));
  }
}
