use crate::evaluator::LineOutcome;

/// Running tally of a batch, kept by the driver. Line evaluation itself never
/// looks at it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
  lines_read: usize,
  evaluated: usize,
  skipped: usize,
  notices: usize,
}

impl State {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&mut self, outcome: &LineOutcome) {
    self.lines_read += 1;
    if !outcome.is_skipped() {
      self.evaluated += 1;
    } else if !outcome.notices.is_empty() {
      self.skipped += 1;
    }
    self.notices += outcome.notices.len();
  }

  pub fn clear(&mut self) {
    *self = Self::default();
  }

  pub fn lines_read(&self) -> usize {
    self.lines_read
  }

  pub fn evaluated(&self) -> usize {
    self.evaluated
  }

  pub fn skipped(&self) -> usize {
    self.skipped
  }

  pub fn notices(&self) -> usize {
    self.notices
  }
}

impl std::fmt::Display for State {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} lines read, {} evaluated, {} skipped, {} notices",
      self.lines_read, self.evaluated, self.skipped, self.notices
    )
  }
}
