use std::fmt;

use crate::{
  fraction::{Fraction, FractionError, Outcome},
  parser::{self, ParserError, Record},
  tokenizer::{self, TokenizerError},
};

/// What one input line produced: at most one result line plus any notices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineOutcome {
  pub output: Option<String>,
  pub result: Option<Fraction>,
  pub notices: Vec<EvaluationError>,
}

impl LineOutcome {
  pub fn is_skipped(&self) -> bool {
    self.output.is_none()
  }
}

/// Evaluates one record line. Empty lines produce nothing. Lines that cannot
/// be evaluated produce no output and a single notice explaining why; lines
/// that can are rendered as `"<left> <op> <right> = <result>"`.
pub fn process_line(line: &str) -> LineOutcome {
  if line.trim().is_empty() {
    return LineOutcome::default();
  }
  let mut notices = vec![];
  let (output, result) = match evaluate_line(line, &mut notices) {
    Ok((output, result)) => (Some(output), Some(result)),
    Err(err) => {
      notices.push(err);
      (None, None)
    }
  };
  for notice in &notices {
    log::debug!("{}: {}", line, notice);
  }
  LineOutcome {
    output,
    result,
    notices,
  }
}

/// Like [`process_line`] for an undecoded line with its terminator. A line
/// that is not UTF-8 is skipped with an [`EvaluationError::InvalidEncoding`]
/// notice.
pub fn process_bytes(raw: &[u8]) -> LineOutcome {
  let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
  let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
  match std::str::from_utf8(raw) {
    Ok(line) => process_line(line),
    Err(_) => {
      let notice = EvaluationError::InvalidEncoding(String::from_utf8_lossy(raw).into_owned());
      log::debug!("{}", notice);
      LineOutcome {
        notices: vec![notice],
        ..LineOutcome::default()
      }
    }
  }
}

fn evaluate_line(
  line: &str,
  notices: &mut Vec<EvaluationError>,
) -> Result<(String, Fraction), EvaluationError> {
  let tokens = tokenizer::tokenize(line)?;
  let (record, operand_notices) = parser::parse(&tokens)?;
  notices.extend(operand_notices.into_iter().map(EvaluationError::from));
  let result = evaluate(&record)?.collect_into(notices);
  let output = format!(
    "{} {} {} = {}",
    record.left, record.operator, record.right, result
  );
  Ok((output, result))
}

/// Applies the record's operator to its operands.
pub fn evaluate(record: &Record) -> Result<Outcome<Fraction>, FractionError> {
  log::debug!(
    "Evaluating {} {} {}",
    record.left,
    record.operator,
    record.right
  );
  record.operator.apply(&record.left, &record.right)
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
  Fraction(FractionError),
  Tokenizer(TokenizerError),
  Parser(ParserError),
  InvalidEncoding(String),
}

impl EvaluationError {
  /// Whether the line still produced a result despite this notice.
  pub fn is_recoverable(&self) -> bool {
    match self {
      EvaluationError::Fraction(err) => err.is_recoverable(),
      EvaluationError::Tokenizer(_)
      | EvaluationError::Parser(_)
      | EvaluationError::InvalidEncoding(_) => false,
    }
  }
}

impl From<FractionError> for EvaluationError {
  fn from(err: FractionError) -> Self {
    EvaluationError::Fraction(err)
  }
}

impl From<TokenizerError> for EvaluationError {
  fn from(err: TokenizerError) -> Self {
    EvaluationError::Tokenizer(err)
  }
}

impl From<ParserError> for EvaluationError {
  fn from(err: ParserError) -> Self {
    EvaluationError::Parser(err)
  }
}

impl fmt::Display for EvaluationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EvaluationError::Fraction(err) => write!(f, "{}", err),
      EvaluationError::Tokenizer(err) => write!(f, "{}", err),
      EvaluationError::Parser(err) => write!(f, "{}", err),
      EvaluationError::InvalidEncoding(line) => write!(f, "Line is not valid UTF-8: '{}'", line),
    }
  }
}

impl std::error::Error for EvaluationError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      EvaluationError::Fraction(err) => Some(err),
      EvaluationError::Tokenizer(err) => Some(err),
      EvaluationError::Parser(err) => Some(err),
      EvaluationError::InvalidEncoding(_) => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn output_of(line: &str) -> Option<String> {
    process_line(line).output
  }

  #[test]
  fn renders_reduced_operands_and_result() {
    assert_eq!(output_of("1/2 + 1/3").as_deref(), Some("1/2 + 1/3 = 5/6"));
    assert_eq!(output_of("2/4 * 2/1").as_deref(), Some("1/2 * 2 = 1"));
    assert_eq!(output_of("3/1 - 1/1").as_deref(), Some("3 - 1 = 2"));
    assert_eq!(output_of("3/4 / 3/8").as_deref(), Some("3/4 / 3/8 = 2"));
  }

  #[test]
  fn carries_result_value() {
    let outcome = process_line("1/2 + 1/3");
    assert_eq!(outcome.result, Some(Fraction::new(5, 6).value));
    assert_eq!(process_line("1/2 ? 1/3").result, None);
  }

  #[test]
  fn empty_line_is_silent() {
    assert_eq!(process_line(""), LineOutcome::default());
    assert_eq!(process_line("   "), LineOutcome::default());
  }

  #[test]
  fn unknown_operator_skips_line_with_notice() {
    let outcome = process_line("1/2 ? 1/3");
    assert!(outcome.is_skipped());
    assert_eq!(
      outcome.notices,
      vec![EvaluationError::Tokenizer(TokenizerError::UnknownOperator(
        "?".to_string()
      ))]
    );
    assert!(!outcome.notices[0].is_recoverable());
  }

  #[test]
  fn operator_is_checked_before_operands() {
    let outcome = process_line("5/0 ? 1/2");
    assert_eq!(
      outcome.notices,
      vec![EvaluationError::Tokenizer(TokenizerError::UnknownOperator(
        "?".to_string()
      ))]
    );
  }

  #[test]
  fn malformed_lines_are_skipped() {
    for line in ["1/2+1/3", "1/2 +", "x/2 + 1/3", "1/2 + 1/3 extra"] {
      let outcome = process_line(line);
      assert!(outcome.is_skipped(), "{line}");
      assert_eq!(outcome.notices.len(), 1, "{line}");
    }
  }

  #[test]
  fn division_by_zero_still_emits_result() {
    let outcome = process_line("3/4 / 0/7");
    assert_eq!(outcome.output.as_deref(), Some("3/4 / 0 = 0"));
    assert_eq!(
      outcome.notices,
      vec![EvaluationError::Fraction(FractionError::DivisionByZero)]
    );
    assert!(outcome.notices[0].is_recoverable());
  }

  #[test]
  fn zero_denominator_operand_is_substituted() {
    let outcome = process_line("5/0 + 1/2");
    assert_eq!(outcome.output.as_deref(), Some("0 + 1/2 = 1/2"));
    assert_eq!(
      outcome.notices,
      vec![EvaluationError::Fraction(FractionError::ZeroDenominator)]
    );
  }

  #[test]
  fn zero_denominator_divisor_reports_both_notices() {
    let outcome = process_line("1/2 / 3/0");
    assert_eq!(outcome.output.as_deref(), Some("1/2 / 0 = 0"));
    assert_eq!(
      outcome.notices,
      vec![
        EvaluationError::Fraction(FractionError::ZeroDenominator),
        EvaluationError::Fraction(FractionError::DivisionByZero),
      ]
    );
  }

  #[test]
  fn overflow_skips_line() {
    let outcome = process_line("9223372036854775807/1 + 1/1");
    assert!(outcome.is_skipped());
    assert_eq!(
      outcome.notices,
      vec![EvaluationError::Fraction(FractionError::Overflow)]
    );
  }

  #[test]
  fn raw_lines_drop_their_terminator() {
    assert_eq!(
      process_bytes(b"1/2 + 1/3\r\n").output.as_deref(),
      Some("1/2 + 1/3 = 5/6")
    );
    assert_eq!(process_bytes(b"\n"), LineOutcome::default());
  }

  #[test]
  fn undecodable_line_is_skipped_with_notice() {
    let outcome = process_bytes(b"\xff\xfe + 1/2\n");
    assert!(outcome.is_skipped());
    assert_eq!(outcome.notices.len(), 1);
    assert!(matches!(
      outcome.notices[0],
      EvaluationError::InvalidEncoding(_)
    ));
    assert!(!outcome.notices[0].is_recoverable());
  }

  #[test]
  fn negative_operands_keep_reduction_sign() {
    assert_eq!(output_of("-1/2 + 1/1").as_deref(), Some("1/-2 + 1 = 1/2"));
    assert_eq!(output_of("1/-2 * -1/1").as_deref(), Some("1/-2 * -1 = 1/2"));
  }
}
