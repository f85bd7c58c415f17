use crate::expr::var::Var;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The textual notation in which derivatives are written.
///
/// Operands taken from the input are always reproduced verbatim; the
/// notation only affects the text the engine itself introduces, such
/// as function derivatives and the formal derivative fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
  /// Plain ASCII math: `cos(x)`, `1/(x)`, `d/dx(f(x))`.
  #[default]
  Plain,
  /// LaTeX, suitable for a math input field: `\cos(x)`,
  /// `\frac{1}{x}`, `\frac{d}{dx}(f(x))`.
  Latex,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown notation '{0}'")]
pub struct ParseNotationError(String);

impl Notation {
  pub fn name(self) -> &'static str {
    match self {
      Notation::Plain => "plain",
      Notation::Latex => "latex",
    }
  }

  /// The unevaluated derivative of `text` with respect to `var`,
  /// used when no rule applies.
  pub fn formal_derivative(self, var: &Var, text: &str) -> String {
    match self {
      Notation::Plain => format!("d/d{var}({text})"),
      Notation::Latex => format!("\\frac{{d}}{{d{var}}}({text})"),
    }
  }
}

impl Display for Notation {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Notation {
  type Err = ParseNotationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "plain" => Ok(Notation::Plain),
      "latex" => Ok(Notation::Latex),
      _ => Err(ParseNotationError(s.to_owned())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_formal_derivative() {
    let t = Var::new("t").unwrap();
    assert_eq!(Notation::Plain.formal_derivative(&Var::x(), "f(x)"), "d/dx(f(x))");
    assert_eq!(Notation::Latex.formal_derivative(&Var::x(), "f(x)"), "\\frac{d}{dx}(f(x))");
    assert_eq!(Notation::Plain.formal_derivative(&t, "2^t"), "d/dt(2^t)");
  }

  #[test]
  fn test_from_str() {
    assert_eq!("plain".parse::<Notation>(), Ok(Notation::Plain));
    assert_eq!("latex".parse::<Notation>(), Ok(Notation::Latex));
    assert_eq!("LaTeX".parse::<Notation>(), Err(ParseNotationError("LaTeX".to_owned())));
  }

  #[test]
  fn test_serde() {
    assert_eq!(serde_json::to_string(&Notation::Latex).unwrap(), "\"latex\"");
    assert_eq!(serde_json::from_str::<Notation>("\"plain\"").unwrap(), Notation::Plain);
    assert_eq!(Notation::default(), Notation::Plain);
  }
}
