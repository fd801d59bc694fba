use std::fmt;

use crate::fraction::{Fraction, FractionError, Outcome};

/// Splits a record into operand, operator and operand tokens.
///
/// Runs of whitespace separate tokens, so `"1/2   +\t1/3"` is accepted. Anything
/// other than exactly three tokens is rejected, as is a middle token that is
/// not one of `+ - * /`.
pub fn tokenize(line: &str) -> Result<Vec<Token>, TokenizerError> {
  let words: Vec<&str> = line.split_whitespace().collect();
  if words.len() != 3 {
    return Err(TokenizerError::WrongTokenCount(words.len()));
  }
  let operator = read_operator(words[1])?;
  log::debug!("Tokenized '{}' into {} {} {}", line, words[0], operator, words[2]);
  Ok(vec![
    Token::Operand(words[0].to_owned()),
    Token::Operator(operator),
    Token::Operand(words[2].to_owned()),
  ])
}

fn read_operator(word: &str) -> Result<Operator, TokenizerError> {
  let mut chars = word.chars();
  let operator = match (chars.next(), chars.next()) {
    (Some('+'), None) => Operator::Add,
    (Some('-'), None) => Operator::Subtract,
    (Some('*'), None) => Operator::Multiply,
    (Some('/'), None) => Operator::Divide,
    _ => return Err(TokenizerError::UnknownOperator(word.to_owned())),
  };
  Ok(operator)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
  Operand(String),
  Operator(Operator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  Add,
  Subtract,
  Multiply,
  Divide,
}

impl Operator {
  pub fn apply(&self, left: &Fraction, right: &Fraction) -> Result<Outcome<Fraction>, FractionError> {
    match self {
      Operator::Add => left.add(right).map(Outcome::clean),
      Operator::Subtract => left.subtract(right).map(Outcome::clean),
      Operator::Multiply => left.multiply(right).map(Outcome::clean),
      Operator::Divide => left.divide(right),
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Operator::Add => write!(f, "+"),
      Operator::Subtract => write!(f, "-"),
      Operator::Multiply => write!(f, "*"),
      Operator::Divide => write!(f, "/"),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenizerError {
  WrongTokenCount(usize),
  UnknownOperator(String),
}

impl fmt::Display for TokenizerError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TokenizerError::WrongTokenCount(count) => write!(
        f,
        "Expected '<fraction> <operator> <fraction>', found {} tokens",
        count
      ),
      TokenizerError::UnknownOperator(operator) => write!(f, "Unknown operator '{}'", operator),
    }
  }
}

impl std::error::Error for TokenizerError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_record_into_three_tokens() {
    let tokens = tokenize("1/2 + 1/3").unwrap();
    assert_eq!(
      tokens,
      vec![
        Token::Operand("1/2".to_string()),
        Token::Operator(Operator::Add),
        Token::Operand("1/3".to_string()),
      ]
    );
  }

  #[test]
  fn tolerates_runs_of_whitespace() {
    let tokens = tokenize("  3/4\t*   5/6 ").unwrap();
    assert_eq!(tokens[1], Token::Operator(Operator::Multiply));
    assert_eq!(tokens[2], Token::Operand("5/6".to_string()));
  }

  #[test]
  fn reads_every_operator() {
    for (text, operator) in [
      ("+", Operator::Add),
      ("-", Operator::Subtract),
      ("*", Operator::Multiply),
      ("/", Operator::Divide),
    ] {
      let tokens = tokenize(&format!("1/2 {} 1/3", text)).unwrap();
      assert_eq!(tokens[1], Token::Operator(operator));
      assert_eq!(operator.to_string(), text);
    }
  }

  #[test]
  fn rejects_unknown_operator() {
    assert_eq!(
      tokenize("1/2 ? 1/3"),
      Err(TokenizerError::UnknownOperator("?".to_string()))
    );
    assert_eq!(
      tokenize("1/2 ++ 1/3"),
      Err(TokenizerError::UnknownOperator("++".to_string()))
    );
  }

  #[test]
  fn rejects_wrong_token_count() {
    assert_eq!(tokenize("1/2+1/3"), Err(TokenizerError::WrongTokenCount(1)));
    assert_eq!(tokenize("1/2 + 1/3 + 1/4"), Err(TokenizerError::WrongTokenCount(5)));
    assert_eq!(tokenize(""), Err(TokenizerError::WrongTokenCount(0)));
  }

  #[test]
  fn operator_dispatches_to_fraction_operation() {
    let half = Fraction::new(1, 2).value;
    let third = Fraction::new(1, 3).value;
    assert_eq!(Operator::Add.apply(&half, &third).unwrap().value.to_string(), "5/6");
    assert_eq!(Operator::Subtract.apply(&half, &third).unwrap().value.to_string(), "1/6");
    assert_eq!(Operator::Multiply.apply(&half, &third).unwrap().value.to_string(), "1/6");
    assert_eq!(Operator::Divide.apply(&half, &third).unwrap().value.to_string(), "3/2");
  }
}
