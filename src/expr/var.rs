use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

use std::error::{Error as StdError};
use std::fmt::{self, Display, Formatter};

/// A variable name.
///
/// A variable's name must begin with an ASCII letter, followed by
/// zero or more ASCII letters, digits, or underscores. These are
/// exactly the identifiers the expression tokenizer produces, so any
/// `Var` can occur in a parsed expression. This structure enforces
/// these constraints.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Var(String);

#[derive(Clone, Debug)]
pub struct TryFromStringError {
  original_string: String,
}

pub static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap()
});

impl Var {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  /// The default differentiation variable, `x`.
  pub fn x() -> Self {
    Var(String::from("x"))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for Var {
  fn default() -> Self {
    Var::x()
  }
}

impl TryFromStringError {
  pub fn original_string(&self) -> &str {
    &self.original_string
  }
}

impl TryFrom<String> for Var {
  type Error = TryFromStringError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self(name))
    } else {
      Err(TryFromStringError { original_string: name })
    }
  }
}

impl From<Var> for String {
  fn from(v: Var) -> Self {
    v.0
  }
}

impl Display for Var {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", &self.0)
  }
}

impl Display for TryFromStringError {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "Invalid variable name '{}'", self.original_string)
  }
}

impl StdError for TryFromStringError {}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_valid_variable_names() {
    Var::new("x").unwrap();
    Var::new("t").unwrap();
    Var::new("theta").unwrap();
    Var::new("x1").unwrap();
    Var::new("x_0").unwrap();
    Var::new("AaAaAa").unwrap();
  }

  #[test]
  fn test_invalid_variable_names() {
    assert_eq!(Var::new(""), None);
    assert_eq!(Var::new("0"), None);
    assert_eq!(Var::new("0a"), None);
    assert_eq!(Var::new("_x"), None);
    assert_eq!(Var::new("a b"), None);
    assert_eq!(Var::new(" "), None);
    assert_eq!(Var::new("x "), None);
    assert_eq!(Var::new("c-d"), None);
    assert_eq!(Var::new("\\theta"), None);
    assert_eq!(Var::new("x'"), None);
  }

  #[test]
  fn test_default_is_x() {
    assert_eq!(Var::default(), Var::new("x").unwrap());
    assert_eq!(Var::x().as_str(), "x");
  }

  #[test]
  fn test_serde_validates() {
    let var: Var = serde_json::from_str("\"t\"").unwrap();
    assert_eq!(var.as_str(), "t");
    assert!(serde_json::from_str::<Var>("\"2t\"").is_err());
    assert_eq!(serde_json::to_string(&var).unwrap(), "\"t\"");
  }

  #[test]
  fn test_error_message() {
    let err = Var::try_from(String::from("9")).unwrap_err();
    assert_eq!(err.original_string(), "9");
    assert_eq!(err.to_string(), "Invalid variable name '9'");
  }
}
