use super::atom::Atom;
use super::var::Var;
use crate::parsing::operator::OperatorTable;
use crate::parsing::shunting_yard::{Token, TokenData, Bracket};
use crate::parsing::source::SourceOffset;
use crate::parsing::tokenizer::TokenizerState;
use crate::util::regex_opt_with;

use regex::Regex;
use once_cell::sync::Lazy;
use thiserror::Error;

/// Tokenizer for the derivative node's expression language. Produces
/// tokens ready for the shunting yard parser.
#[derive(Clone, Debug)]
pub struct ExprTokenizer<'a> {
  operator_table: &'a OperatorTable,
  operator_regex: Regex,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum TokenizerError {
  #[error("Expected token, but found EOF at {0}")]
  UnexpectedEOF(SourceOffset),
  #[error("Expected token, but found '{0}' at {1}")]
  UnexpectedChar(char, SourceOffset),
  #[error("Invalid number literal '{0}' at {1}")]
  InvalidNumber(String, SourceOffset),
}

impl<'a> ExprTokenizer<'a> {
  pub fn new(operator_table: &'a OperatorTable) -> Self {
    let operator_names = operator_table.iter().map(|op| op.display_name());
    let operator_regex = regex_opt_with(operator_names, |s| format!("^{s}"));
    Self { operator_table, operator_regex }
  }

  pub fn read_tokens(&self, state: &mut TokenizerState<'_>) -> Result<Vec<Token<Atom>>, TokenizerError> {
    let start_pos = state.current_pos();
    let mut tokens = Vec::new();
    loop {
      self.skip_ignorable(state);
      match self.read_one_token(state) {
        Ok(token) => {
          tokens.push(token);
        }
        Err(TokenizerError::UnexpectedEOF(_)) => {
          return Ok(tokens);
        }
        Err(err) => {
          state.seek(start_pos);
          return Err(err);
        }
      }
    }
  }

  pub fn read_one_token(&self, state: &mut TokenizerState<'_>) -> Result<Token<Atom>, TokenizerError> {
    // Operators come before function calls, so that `\cdot(x)` is a
    // product rather than a call to `cdot`.
    if let Some(tok) = self.read_char_token(state) {
      Ok(tok)
    } else if let Some(tok) = self.read_operator(state) {
      Ok(tok)
    } else if let Some(tok) = self.read_function_call_token(state) {
      Ok(tok)
    } else if let Some(res) = self.read_number_literal(state) {
      res
    } else if let Some(tok) = self.read_identifier(state) {
      Ok(tok)
    } else {
      let pos = state.current_pos();
      match state.peek() {
        None => Err(TokenizerError::UnexpectedEOF(pos)),
        Some(ch) => Err(TokenizerError::UnexpectedChar(ch, pos)),
      }
    }
  }

  /// Skips whitespace, as well as the LaTeX bracket sizing commands
  /// `\left` and `\right`, which carry no meaning for us.
  fn skip_ignorable(&self, state: &mut TokenizerState<'_>) {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\(?:left|right)\b").unwrap());
    loop {
      state.consume_spaces();
      if state.read_regex(&RE).is_none() {
        break;
      }
    }
  }

  fn read_char_token(&self, state: &mut TokenizerState<'_>) -> Option<Token<Atom>> {
    #[allow(clippy::manual_map)] // Cleaner in an if-else chain
    if let Some(m) = state.read_literal("(") {
      Some(Token::new(TokenData::OpenBracket(Bracket::Paren), m.span()))
    } else if let Some(m) = state.read_literal(")") {
      Some(Token::new(TokenData::CloseBracket(Bracket::Paren), m.span()))
    } else if let Some(m) = state.read_literal("{") {
      Some(Token::new(TokenData::OpenBracket(Bracket::Brace), m.span()))
    } else if let Some(m) = state.read_literal("}") {
      Some(Token::new(TokenData::CloseBracket(Bracket::Brace), m.span()))
    } else {
      None
    }
  }

  fn read_function_call_token(&self, state: &mut TokenizerState<'_>) -> Option<Token<Atom>> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\?([a-zA-Z][a-zA-Z0-9_]*)([({])").unwrap());
    let m = state.read_regex_with_captures(&RE)?;
    let function_name = m.get(1)?;
    let bracket = if m.get(2) == Some("{") { Bracket::Brace } else { Bracket::Paren };
    Some(Token::new(TokenData::FunctionCallStart(function_name.to_owned(), bracket), m.span()))
  }

  fn read_operator(&self, state: &mut TokenizerState<'_>) -> Option<Token<Atom>> {
    let reset_pos = state.current_pos();
    let m = state.read_regex(&self.operator_regex)?;
    match self.operator_table.get_by_display_name(m.as_str()) {
      Some(operator) => Some(Token::operator(operator.clone(), m.span())),
      None => {
        state.seek(reset_pos);
        None
      }
    }
  }

  fn read_number_literal(&self, state: &mut TokenizerState<'_>) -> Option<Result<Token<Atom>, TokenizerError>> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)").unwrap());
    let m = state.read_regex(&RE)?;
    match m.as_str().parse::<f64>() {
      Ok(n) => Some(Ok(Token::scalar(Atom::Number(n), m.span()))),
      Err(_) => {
        state.seek(m.start());
        Some(Err(TokenizerError::InvalidNumber(m.as_str().to_owned(), m.start())))
      }
    }
  }

  fn read_identifier(&self, state: &mut TokenizerState<'_>) -> Option<Token<Atom>> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\?([a-zA-Z][a-zA-Z0-9_]*)").unwrap());
    let m = state.read_regex_with_captures(&RE)?;
    let var = m.get(1).and_then(Var::new)?;
    Some(Token::scalar(Atom::Var(var), m.span()))
  }
}
