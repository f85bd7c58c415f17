//! Derivatives of the elementary functions the engine recognizes.

use super::notation::Notation;

use phf::phf_map;

/// Text to wrap around a function's argument to produce its
/// derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivativeTemplate {
  prefix: &'static str,
  suffix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownFunction {
  plain: DerivativeTemplate,
  latex: DerivativeTemplate,
}

static KNOWN_FUNCTIONS: phf::Map<&'static str, KnownFunction> = phf_map! {
  "sin" => KnownFunction::new(DerivativeTemplate::new("cos(", ")"), DerivativeTemplate::new("\\cos(", ")")),
  "cos" => KnownFunction::new(DerivativeTemplate::new("-sin(", ")"), DerivativeTemplate::new("-\\sin(", ")")),
  "tan" => KnownFunction::new(DerivativeTemplate::new("sec^2(", ")"), DerivativeTemplate::new("\\sec^2(", ")")),
  "exp" => KnownFunction::new(DerivativeTemplate::new("exp(", ")"), DerivativeTemplate::new("\\exp(", ")")),
  "ln" => KnownFunction::new(DerivativeTemplate::new("1/(", ")"), DerivativeTemplate::new("\\frac{1}{", "}")),
  "log" => KnownFunction::new(DerivativeTemplate::new("1/(", ")"), DerivativeTemplate::new("\\frac{1}{", "}")),
  "sqrt" => KnownFunction::new(DerivativeTemplate::new("1/(2 * sqrt(", "))"), DerivativeTemplate::new("\\frac{1}{2\\sqrt{", "}}")),
};

impl DerivativeTemplate {
  pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
    Self { prefix, suffix }
  }

  pub fn apply(&self, argument: &str) -> String {
    format!("{}{}{}", self.prefix, argument, self.suffix)
  }
}

impl KnownFunction {
  pub const fn new(plain: DerivativeTemplate, latex: DerivativeTemplate) -> Self {
    Self { plain, latex }
  }

  pub fn template(&self, notation: Notation) -> DerivativeTemplate {
    match notation {
      Notation::Plain => self.plain,
      Notation::Latex => self.latex,
    }
  }

  /// The derivative of this function evaluated at `argument`, without
  /// the chain rule factor.
  pub fn derivative_at(&self, argument: &str, notation: Notation) -> String {
    self.template(notation).apply(argument)
  }
}

/// Looks up a function by name, as written after any leading
/// backslash (`\sin` is `sin`).
pub fn known_function(name: &str) -> Option<&'static KnownFunction> {
  KNOWN_FUNCTIONS.get(name)
}

pub fn known_function_names() -> impl Iterator<Item = &'static str> {
  KNOWN_FUNCTIONS.keys().copied()
}

#[cfg(test)]
mod tests {
  use super::*;

  use itertools::Itertools;

  #[test]
  fn test_plain_derivatives() {
    let at_u = |name| known_function(name).unwrap().derivative_at("u", Notation::Plain);
    assert_eq!(at_u("sin"), "cos(u)");
    assert_eq!(at_u("cos"), "-sin(u)");
    assert_eq!(at_u("tan"), "sec^2(u)");
    assert_eq!(at_u("exp"), "exp(u)");
    assert_eq!(at_u("ln"), "1/(u)");
    assert_eq!(at_u("log"), "1/(u)");
    assert_eq!(at_u("sqrt"), "1/(2 * sqrt(u))");
  }

  #[test]
  fn test_latex_derivatives() {
    let at_u = |name| known_function(name).unwrap().derivative_at("u", Notation::Latex);
    assert_eq!(at_u("sin"), "\\cos(u)");
    assert_eq!(at_u("cos"), "-\\sin(u)");
    assert_eq!(at_u("tan"), "\\sec^2(u)");
    assert_eq!(at_u("exp"), "\\exp(u)");
    assert_eq!(at_u("ln"), "\\frac{1}{u}");
    assert_eq!(at_u("sqrt"), "\\frac{1}{2\\sqrt{u}}");
  }

  #[test]
  fn test_argument_is_not_rescanned() {
    let sin = known_function("sin").unwrap();
    assert_eq!(sin.derivative_at("{u}", Notation::Plain), "cos({u})");
  }

  #[test]
  fn test_unknown_function() {
    assert!(known_function("sinh").is_none());
    assert!(known_function("f").is_none());
    assert!(known_function("Sin").is_none());
  }

  #[test]
  fn test_known_function_names() {
    let names = known_function_names().sorted().collect::<Vec<_>>();
    assert_eq!(names, vec!["cos", "exp", "ln", "log", "sin", "sqrt", "tan"]);
  }
}
