use std::fmt;

use num::rational::Ratio;

use crate::numeric::{gcd, lcm};

/// A rational number kept in lowest terms.
///
/// The denominator is never zero. Reduction divides both parts by their
/// [`gcd`], which does not decide which part carries a negative sign, so
/// `Fraction::new(-1, 2)` is stored (and printed) as `1/-2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
  numerator: i64,
  denominator: i64,
}

impl Fraction {
  pub const ZERO: Fraction = Fraction {
    numerator: 0,
    denominator: 1,
  };
  #[cfg(test)]
  pub const ONE: Fraction = Fraction {
    numerator: 1,
    denominator: 1,
  };

  /// Builds a reduced fraction. A zero denominator yields [`Fraction::ZERO`]
  /// together with a [`FractionError::ZeroDenominator`] notice.
  pub fn new(numerator: i64, denominator: i64) -> Outcome<Fraction> {
    if denominator == 0 {
      return Outcome::noted(Fraction::ZERO, FractionError::ZeroDenominator);
    }
    Outcome::clean(Fraction::reduced(numerator, denominator))
  }

  pub fn from_integer(value: i64) -> Fraction {
    Fraction {
      numerator: value,
      denominator: 1,
    }
  }

  // Callers guarantee `denominator != 0`.
  fn reduced(numerator: i64, denominator: i64) -> Fraction {
    let divisor = gcd(numerator, denominator);
    match (
      numerator.checked_div(divisor),
      denominator.checked_div(divisor),
    ) {
      (Some(numerator), Some(denominator)) => Fraction {
        numerator,
        denominator,
      },
      // only a divisor of -1 can overflow here, and the pair is already coprime
      _ => Fraction {
        numerator,
        denominator,
      },
    }
  }

  #[cfg(test)]
  pub fn numerator(&self) -> i64 {
    self.numerator
  }

  #[cfg(test)]
  pub fn denominator(&self) -> i64 {
    self.denominator
  }

  pub fn is_zero(&self) -> bool {
    self.numerator == 0
  }

  pub fn add(&self, other: &Fraction) -> Result<Fraction, FractionError> {
    self.combine(other, i64::checked_add)
  }

  pub fn subtract(&self, other: &Fraction) -> Result<Fraction, FractionError> {
    self.combine(other, i64::checked_sub)
  }

  pub fn multiply(&self, other: &Fraction) -> Result<Fraction, FractionError> {
    let numerator = self
      .numerator
      .checked_mul(other.numerator)
      .ok_or(FractionError::Overflow)?;
    let denominator = self
      .denominator
      .checked_mul(other.denominator)
      .ok_or(FractionError::Overflow)?;
    Ok(Fraction::reduced(numerator, denominator))
  }

  /// Divides by `other`. Only the divisor's numerator is checked: dividing by
  /// a zero value yields [`Fraction::ZERO`] with a
  /// [`FractionError::DivisionByZero`] notice.
  pub fn divide(&self, other: &Fraction) -> Result<Outcome<Fraction>, FractionError> {
    if other.is_zero() {
      return Ok(Outcome::noted(
        Fraction::ZERO,
        FractionError::DivisionByZero,
      ));
    }
    let numerator = self
      .numerator
      .checked_mul(other.denominator)
      .ok_or(FractionError::Overflow)?;
    let denominator = self
      .denominator
      .checked_mul(other.numerator)
      .ok_or(FractionError::Overflow)?;
    Ok(Outcome::clean(Fraction::reduced(numerator, denominator)))
  }

  // Shared by add and subtract: rescale both numerators to the lcm of the
  // denominators, then merge them with `merge`.
  fn combine(
    &self,
    other: &Fraction,
    merge: fn(i64, i64) -> Option<i64>,
  ) -> Result<Fraction, FractionError> {
    let common = lcm(self.denominator, other.denominator).ok_or(FractionError::Overflow)?;
    let left = scale(self.numerator, common, self.denominator).ok_or(FractionError::Overflow)?;
    let right = scale(other.numerator, common, other.denominator).ok_or(FractionError::Overflow)?;
    let numerator = merge(left, right).ok_or(FractionError::Overflow)?;
    Ok(Fraction::reduced(numerator, common))
  }

  pub fn to_ratio(&self) -> Ratio<i128> {
    Ratio::new(i128::from(self.numerator), i128::from(self.denominator))
  }

  pub fn to_f64(&self) -> f64 {
    let ratio = self.to_ratio();
    *ratio.numer() as f64 / *ratio.denom() as f64
  }

  /// Value equality, ignoring which part carries the sign.
  #[cfg(test)]
  pub fn numerically_eq(&self, other: &Fraction) -> bool {
    self.to_ratio() == other.to_ratio()
  }
}

fn scale(numerator: i64, common: i64, denominator: i64) -> Option<i64> {
  numerator.checked_mul(common.checked_div(denominator)?)
}

impl fmt::Display for Fraction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.denominator == 1 {
      write!(f, "{}", self.numerator)
    } else {
      write!(f, "{}/{}", self.numerator, self.denominator)
    }
  }
}

/// A value paired with the recoverable problem met while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
  pub value: T,
  pub notice: Option<FractionError>,
}

impl<T> Outcome<T> {
  pub fn clean(value: T) -> Self {
    Self {
      value,
      notice: None,
    }
  }

  pub fn noted(value: T, notice: FractionError) -> Self {
    Self {
      value,
      notice: Some(notice),
    }
  }

  /// Splits into the value and its notice, appending the notice to `notices`.
  pub fn collect_into<E: From<FractionError>>(self, notices: &mut Vec<E>) -> T {
    if let Some(notice) = self.notice {
      notices.push(notice.into());
    }
    self.value
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionError {
  ZeroDenominator,
  DivisionByZero,
  Overflow,
}

impl FractionError {
  /// Recoverable errors substitute [`Fraction::ZERO`] and let the line finish.
  pub fn is_recoverable(&self) -> bool {
    match self {
      FractionError::ZeroDenominator | FractionError::DivisionByZero => true,
      FractionError::Overflow => false,
    }
  }
}

impl fmt::Display for FractionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FractionError::ZeroDenominator => write!(f, "Denominator cannot be zero."),
      FractionError::DivisionByZero => write!(f, "Cannot divide by zero."),
      FractionError::Overflow => write!(f, "Result does not fit in a 64-bit integer."),
    }
  }
}

impl std::error::Error for FractionError {}
