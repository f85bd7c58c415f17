//! The derivative node: the state behind a host widget which shows
//! `d/d<var> <expr> = <result>` and passes the result downstream.

use crate::definition::FunctionDefinition;
use crate::error::Error;
use crate::expr::calculus::differentiate;
use crate::expr::var::Var;
use crate::options::DiffOptions;

use log::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivativeNode {
  expression: String,
  options: DiffOptions,
}

impl DerivativeNode {
  /// A node differentiating nothing with respect to `x`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_options(options: DiffOptions) -> Self {
    Self { expression: String::new(), options }
  }

  pub fn variable(&self) -> &Var {
    self.options.variable()
  }

  pub fn expression(&self) -> &str {
    &self.expression
  }

  pub fn options(&self) -> &DiffOptions {
    &self.options
  }

  /// The upstream node sent `value`, normally a definition such as
  /// `f(t) = t^2`. A blank value clears the node. If `value` is
  /// invalid, the node is left unchanged.
  pub fn input_change(&mut self, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
      debug!("Derivative node input cleared");
      self.set(Var::x(), String::new());
      return Ok(());
    }
    let (variable, body) = value.parse::<FunctionDefinition>()?.into_parts();
    debug!("Derivative node received f({variable}) = {body}");
    self.set(variable, body);
    Ok(())
  }

  /// The user edited the variable and expression prompts. A blank
  /// variable means `x`.
  pub fn edit(&mut self, variable: &str, expression: &str) -> Result<(), Error> {
    let variable = variable.trim();
    let variable = if variable.is_empty() {
      Var::x()
    } else {
      Var::try_from(variable.to_owned())?
    };
    self.set(variable, expression.to_owned());
    Ok(())
  }

  /// The derivative of the current expression, or `None` if there is
  /// no expression.
  pub fn result(&self) -> Option<String> {
    if self.expression.trim().is_empty() {
      None
    } else {
      Some(differentiate(&self.expression, &self.options))
    }
  }

  /// The definition to send downstream, `f(<var>) = <derivative>`.
  pub fn output(&self) -> Option<FunctionDefinition> {
    let derivative = self.result()?;
    Some(FunctionDefinition::new(self.variable().clone(), derivative))
  }

  fn set(&mut self, variable: Var, expression: String) {
    self.options.set_variable(variable);
    self.expression = expression;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::calculus::Notation;

  #[test]
  fn test_new_node_is_empty() {
    let node = DerivativeNode::new();
    assert_eq!(node.variable(), &Var::x());
    assert_eq!(node.expression(), "");
    assert_eq!(node.result(), None);
    assert_eq!(node.output(), None);
  }

  #[test]
  fn test_input_change_with_definition() {
    let mut node = DerivativeNode::new();
    node.input_change("f(t) = t^2").unwrap();
    assert_eq!(node.variable().as_str(), "t");
    assert_eq!(node.expression(), "t^2");
    assert_eq!(node.result().as_deref(), Some("2t"));
    assert_eq!(node.output().unwrap().to_string(), "f(t) = 2t");
  }

  #[test]
  fn test_input_change_with_bare_expression() {
    let mut node = DerivativeNode::new();
    node.input_change("f(t) = t^2").unwrap();
    node.input_change("x^3").unwrap();
    assert_eq!(node.variable(), &Var::x());
    assert_eq!(node.output().unwrap().to_string(), "f(x) = 3x^{2}");
  }

  #[test]
  fn test_input_change_clears() {
    let mut node = DerivativeNode::new();
    node.input_change("f(t) = t^2").unwrap();
    node.input_change("").unwrap();
    assert_eq!(node.variable(), &Var::x());
    assert_eq!(node.result(), None);
    assert_eq!(node.output(), None);
  }

  #[test]
  fn test_invalid_input_leaves_node_unchanged() {
    let mut node = DerivativeNode::new();
    node.input_change("f(t) = t^2").unwrap();
    let err = node.input_change("f(9) = 1").unwrap_err();
    assert!(matches!(err, Error::Definition(_)));
    assert_eq!(node.expression(), "t^2");
  }

  #[test]
  fn test_edit() {
    let mut node = DerivativeNode::new();
    node.edit("", "x * sin(x)").unwrap();
    assert_eq!(node.variable(), &Var::x());
    assert_eq!(node.result().as_deref(), Some("(1) * (sin(x)) + (x) * (cos(x) * (1))"));

    node.edit(" y ", "5y").unwrap();
    assert_eq!(node.result().as_deref(), Some("5"));

    assert!(matches!(node.edit("1y", "y"), Err(Error::InvalidVariable(_))));
  }

  #[test]
  fn test_blank_expression_has_no_output() {
    let mut node = DerivativeNode::new();
    node.edit("x", "   ").unwrap();
    assert_eq!(node.output(), None);
  }

  #[test]
  fn test_options_are_kept() {
    let options = DiffOptions::default().with_notation(Notation::Latex);
    let mut node = DerivativeNode::with_options(options);
    node.input_change("f(t) = f(t)").unwrap();
    assert_eq!(node.result().as_deref(), Some("\\frac{d}{dt}(f(t))"));
    assert_eq!(node.options().notation(), Notation::Latex);
  }
}
