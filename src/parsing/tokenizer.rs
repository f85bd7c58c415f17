use super::source::{SourceOffset, Span};

use regex::{Regex, Captures};
use once_cell::sync::Lazy;

/// A cursor into an input string, which knows its absolute position
/// in the original input.
#[derive(Debug, Clone)]
pub struct TokenizerState<'a> {
  whole_input: &'a str,
  input: &'a str,
  position: SourceOffset,
}

#[derive(Debug, Clone)]
pub struct TokenizerMatch<'a> {
  matched_str: &'a str,
  start: SourceOffset,
  end: SourceOffset,
}

#[derive(Debug)]
pub struct TokenizerCaptures<'a> {
  captures: Captures<'a>,
  start: SourceOffset,
  end: SourceOffset,
}

impl<'a> TokenizerState<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      whole_input: input,
      input,
      position: SourceOffset(0)
    }
  }

  /// The full input, including the parts already consumed.
  pub fn whole_input(&self) -> &'a str {
    self.whole_input
  }

  pub fn peek(&self) -> Option<char> {
    self.input.chars().next()
  }

  /// Seeks to an absolute position in the string. Out of bounds
  /// positions are truncated to the end of the input, and positions
  /// which are not on a character boundary are moved back to the
  /// nearest boundary.
  pub fn seek(&mut self, pos: SourceOffset) {
    let mut pos = pos.0.min(self.whole_input.len());
    while !self.whole_input.is_char_boundary(pos) {
      pos -= 1;
    }
    self.position = SourceOffset(pos);
    self.input = &self.whole_input[pos..];
  }

  /// Advances the position of `self` by `amount` bytes. Returns a
  /// [`TokenizerMatch`] indicating the substring matched by the
  /// skipped portion. Never advances beyond the end of the input.
  ///
  /// `amount` must land on a character boundary. All callers in this
  /// crate derive it from a regex or literal match, which guarantees
  /// that.
  pub fn advance(&mut self, amount: usize) -> TokenizerMatch<'a> {
    let amount = amount.min(self.input.len());

    let match_pos = self.current_pos();
    let (prefix, suffix) = self.input.split_at(amount);
    self.position.0 += amount;
    self.input = suffix;
    TokenizerMatch {
      matched_str: prefix,
      start: match_pos,
      end: match_pos + amount,
    }
  }

  pub fn current_pos(&self) -> SourceOffset {
    self.position
  }

  pub fn read_literal(&mut self, literal: &str) -> Option<TokenizerMatch<'a>> {
    self.input.starts_with(literal).then(|| {
      self.advance(literal.len())
    })
  }

  /// If the current position of the string matches the given regex,
  /// returns the matched string and advances the tokenizer state. If
  /// not, returns `None`.
  ///
  /// The regex MUST be anchored at the start of the input. This
  /// function may panic if that precondition is not satisfied.
  pub fn read_regex(&mut self, regex: &Regex) -> Option<TokenizerMatch<'a>> {
    let m = regex.find(self.input)?;
    assert_eq!(m.start(), 0, "Regex must be anchored at the start of the input");

    Some(self.advance(m.len()))
  }

  pub fn read_regex_with_captures(&mut self, regex: &Regex) -> Option<TokenizerCaptures<'a>> {
    let c = regex.captures(self.input)?;
    let whole = c.get(0)?;
    assert_eq!(whole.start(), 0, "Regex must be anchored at the start of the input");
    let m = self.advance(whole.len());
    Some(TokenizerCaptures {
      captures: c,
      start: m.start(),
      end: m.end(),
    })
  }

  pub fn consume_spaces(&mut self) {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").unwrap());
    self.read_regex(&RE);
  }
}

impl<'h> TokenizerMatch<'h> {
  pub fn as_str(&self) -> &'h str {
    self.matched_str
  }
  pub fn start(&self) -> SourceOffset {
    self.start
  }
  pub fn end(&self) -> SourceOffset {
    self.end
  }
  pub fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

impl<'h> TokenizerCaptures<'h> {
  pub fn get(&self, i: usize) -> Option<&'h str> {
    self.captures.get(i).map(|m| m.as_str())
  }
  pub fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_seek() {
    let mut state = TokenizerState::new("x^2");
    assert_eq!(state.peek(), Some('x'));

    state.seek(SourceOffset(2));
    assert_eq!(state.current_pos(), SourceOffset(2));
    assert_eq!(state.peek(), Some('2'));

    state.seek(SourceOffset(999));
    assert_eq!(state.current_pos(), SourceOffset(3));
    assert_eq!(state.peek(), None);
  }

  #[test]
  fn test_seek_to_char_boundary() {
    // 'θ' is two bytes wide.
    let mut state = TokenizerState::new("θ+1");
    state.seek(SourceOffset(1));
    assert_eq!(state.current_pos(), SourceOffset(0));
    assert_eq!(state.peek(), Some('θ'));
  }

  #[test]
  fn test_advance() {
    let mut state = TokenizerState::new("sin(x)");
    let m = state.advance(3);
    assert_eq!(m.as_str(), "sin");
    assert_eq!(m.span(), Span::new(SourceOffset(0), SourceOffset(3)));
    let m = state.advance(99);
    assert_eq!(m.as_str(), "(x)");
    assert_eq!(m.start(), SourceOffset(3));
    assert_eq!(m.end(), SourceOffset(6));
    let m = state.advance(1);
    assert!(m.is_empty());
    assert_eq!(state.whole_input(), "sin(x)");
  }

  #[test]
  fn test_read_literal() {
    let mut state = TokenizerState::new("\\cdot x");
    assert!(state.read_literal("\\times").is_none());
    assert_eq!(state.current_pos(), SourceOffset(0));
    let m = state.read_literal("\\cdot").unwrap();
    assert_eq!(m.as_str(), "\\cdot");
    assert_eq!(state.current_pos(), SourceOffset(5));
  }

  #[test]
  fn test_read_regex() {
    let re = Regex::new(r"^[0-9]+").unwrap();
    let mut state = TokenizerState::new("25x");
    let m = state.read_regex(&re).unwrap();
    assert_eq!(m.as_str(), "25");
    assert_eq!(state.current_pos(), SourceOffset(2));
    assert!(state.read_regex(&re).is_none());
    assert_eq!(state.current_pos(), SourceOffset(2));
  }

  #[test]
  fn test_read_regex_with_captures() {
    let re = Regex::new(r"^([a-z]+)\(").unwrap();
    let mut state = TokenizerState::new("cos(x)");
    let m = state.read_regex_with_captures(&re).unwrap();
    assert_eq!(m.get(0), Some("cos("));
    assert_eq!(m.get(1), Some("cos"));
    assert_eq!(m.get(2), None);
    assert_eq!(m.span(), Span::new(SourceOffset(0), SourceOffset(4)));

    let mut state = TokenizerState::new("(x)");
    assert!(state.read_regex_with_captures(&re).is_none());
    assert_eq!(state.current_pos(), SourceOffset(0));
  }

  #[test]
  fn test_consume_spaces() {
    let mut state = TokenizerState::new("  x  + 1");
    state.consume_spaces();
    assert_eq!(state.current_pos(), SourceOffset(2));
    // No effect the second time around.
    state.consume_spaces();
    assert_eq!(state.current_pos(), SourceOffset(2));
  }
}
