use std::fmt::{self, Display, Formatter};
use std::ops::{Add, AddAssign};

/// Thin wrapper around `usize` that represents a byte position in the
/// expression being differentiated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceOffset(pub usize);

/// A span of source offsets. Spans should be considered half-open
/// intervals, with `start` being included and `end` being excluded.
///
/// Every node of a parsed expression remembers its span, so that the
/// derivative templates can quote operands exactly as the user typed
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  pub start: SourceOffset,
  pub end: SourceOffset,
}

impl Span {
  pub fn new(start: SourceOffset, end: SourceOffset) -> Self {
    Self { start, end }
  }

  /// The smallest span containing both `self` and `other`.
  pub fn merge(self, other: Span) -> Self {
    Self {
      start: self.start.min(other.start),
      end: self.end.max(other.end),
    }
  }

  pub fn len(&self) -> usize {
    self.end.0.saturating_sub(self.start.0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The portion of `source` covered by this span. Out of bounds
  /// spans are truncated to the source.
  pub fn slice<'a>(&self, source: &'a str) -> &'a str {
    let end = self.end.0.min(source.len());
    let start = self.start.0.min(end);
    &source[start..end]
  }
}

impl From<usize> for SourceOffset {
  fn from(i: usize) -> Self {
    SourceOffset(i)
  }
}

impl From<SourceOffset> for usize {
  fn from(i: SourceOffset) -> Self {
    i.0
  }
}

impl Display for SourceOffset {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Add<usize> for SourceOffset {
  type Output = Self;

  fn add(self, rhs: usize) -> Self::Output {
    Self(self.0 + rhs)
  }
}

impl AddAssign<usize> for SourceOffset {
  fn add_assign(&mut self, rhs: usize) {
    self.0 += rhs
  }
}

impl Display for Span {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.start, self.end)
  }
}
