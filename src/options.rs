//! Configuration for differentiation, as supplied by the host.

use crate::error::Error;
use crate::expr::calculus::Notation;
use crate::expr::var::Var;

use serde::{Serialize, Deserialize};

pub const DEFAULT_MAX_DEPTH: usize = 256;
pub const DEFAULT_MAX_INPUT_LEN: usize = 4096;

/// Options controlling [`differentiate_with`](crate::differentiate_with).
///
/// Every field may be omitted from the JSON form, in which case the
/// default is used:
///
/// ```json
/// { "variable": "t", "notation": "latex", "maxDepth": 64 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffOptions {
  variable: Var,
  notation: Notation,
  /// Nodes nested deeper than this are left as formal derivatives.
  max_depth: usize,
  /// Inputs longer than this, in bytes, are not parsed at all.
  max_input_len: usize,
}

impl DiffOptions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Options for differentiating with respect to the variable named
  /// `name`.
  pub fn for_variable(name: &str) -> Result<Self, Error> {
    let variable = Var::try_from(name.to_owned())?;
    Ok(Self::default().with_variable(variable))
  }

  pub fn from_json(json: &str) -> Result<Self, Error> {
    let options = serde_json::from_str(json)?;
    Ok(options)
  }

  pub fn to_json(&self) -> Result<String, Error> {
    let json = serde_json::to_string(self)?;
    Ok(json)
  }

  pub fn with_variable(mut self, variable: Var) -> Self {
    self.variable = variable;
    self
  }

  pub fn set_variable(&mut self, variable: Var) {
    self.variable = variable;
  }

  pub fn with_notation(mut self, notation: Notation) -> Self {
    self.notation = notation;
    self
  }

  pub fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }

  pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
    self.max_input_len = max_input_len;
    self
  }

  pub fn variable(&self) -> &Var {
    &self.variable
  }

  pub fn notation(&self) -> Notation {
    self.notation
  }

  pub fn max_depth(&self) -> usize {
    self.max_depth
  }

  pub fn max_input_len(&self) -> usize {
    self.max_input_len
  }
}

impl Default for DiffOptions {
  fn default() -> Self {
    Self {
      variable: Var::x(),
      notation: Notation::Plain,
      max_depth: DEFAULT_MAX_DEPTH,
      max_input_len: DEFAULT_MAX_INPUT_LEN,
    }
  }
}
