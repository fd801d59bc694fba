use std::fmt;

use crate::fraction::{Fraction, FractionError, Outcome};
use crate::tokenizer::{Operator, Token};

/// One `operand operator operand` line, operands already reduced.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
  pub left: Fraction,
  pub operator: Operator,
  pub right: Fraction,
}

/// Builds a [`Record`] from the tokens produced by
/// [`tokenize`](crate::tokenizer::tokenize). Zero-denominator notices from
/// either operand are returned alongside the record, in operand order.
pub fn parse(tokens: &[Token]) -> Result<(Record, Vec<FractionError>), ParserError> {
  let (left, operator, right) = match tokens {
    [Token::Operand(left), Token::Operator(operator), Token::Operand(right)] => {
      (left, *operator, right)
    }
    _ => return Err(ParserError::UnexpectedTokens(tokens.to_vec())),
  };
  let mut notices = vec![];
  let left = parse_fraction(left)?.collect_into(&mut notices);
  let right = parse_fraction(right)?.collect_into(&mut notices);
  log::debug!("Parsed record {} {} {}", left, operator, right);
  Ok((
    Record {
      left,
      operator,
      right,
    },
    notices,
  ))
}

/// Reads `"<int>/<int>"`, splitting on the first `/`. A token without a slash
/// is a whole number, which is how whole results are printed.
pub fn parse_fraction(token: &str) -> Result<Outcome<Fraction>, ParserError> {
  match token.split_once('/') {
    Some((numerator, denominator)) => {
      Ok(Fraction::new(parse_integer(numerator)?, parse_integer(denominator)?))
    }
    None => Ok(Outcome::clean(Fraction::from_integer(parse_integer(token)?))),
  }
}

fn parse_integer(text: &str) -> Result<i64, ParserError> {
  text
    .parse::<i64>()
    .map_err(|_| ParserError::InvalidInteger(text.to_owned()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParserError {
  InvalidInteger(String),
  UnexpectedTokens(Vec<Token>),
}

impl fmt::Display for ParserError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParserError::InvalidInteger(text) => write!(f, "'{}' is not an integer", text),
      ParserError::UnexpectedTokens(tokens) => write!(f, "Unexpected tokens {:?}", tokens),
    }
  }
}

impl std::error::Error for ParserError {}
