//! Single-variable function definitions, `f(x) = x^2`, as exchanged
//! between nodes.

use crate::expr::var::{Var, TryFromStringError};

use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A function of one variable. The body is kept as text; it is not
/// parsed until something differentiates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
  variable: Var,
  body: String,
}

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum DefinitionError {
  #[error("Empty function definition")]
  Empty,
  #[error("{0}")]
  InvalidVariable(#[from] TryFromStringError),
}

static DEFINITION_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^f\((\w+)\)\s*=\s*(.+)$").unwrap()
});

impl FunctionDefinition {
  pub fn new(variable: Var, body: impl Into<String>) -> Self {
    Self { variable, body: body.into() }
  }

  pub fn variable(&self) -> &Var {
    &self.variable
  }

  pub fn body(&self) -> &str {
    &self.body
  }

  pub fn into_parts(self) -> (Var, String) {
    (self.variable, self.body)
  }
}

impl FromStr for FunctionDefinition {
  type Err = DefinitionError;

  /// Parses `f(<var>) = <body>`. Any other nonblank string is taken to
  /// be the body of a function of `x`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.is_empty() {
      return Err(DefinitionError::Empty);
    }
    match DEFINITION_RE.captures(s) {
      Some(caps) => {
        let variable = Var::try_from(caps[1].to_owned())?;
        Ok(FunctionDefinition::new(variable, caps[2].trim()))
      }
      None => Ok(FunctionDefinition::new(Var::x(), s)),
    }
  }
}

impl Display for FunctionDefinition {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "f({}) = {}", self.variable, self.body)
  }
}
