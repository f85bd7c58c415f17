use super::var::Var;

use std::fmt::{self, Display, Formatter};

/// The leaves of an expression: numeric literals and identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
  Number(f64),
  Var(Var),
}

impl From<Var> for Atom {
  fn from(v: Var) -> Self {
    Self::Var(v)
  }
}

impl From<f64> for Atom {
  fn from(n: f64) -> Self {
    Self::Number(n)
  }
}

impl Display for Atom {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Atom::Number(n) => write!(f, "{n}"),
      Atom::Var(v) => write!(f, "{v}"),
    }
  }
}
