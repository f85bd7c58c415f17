use super::functions::known_function;
use super::notation::Notation;
use crate::expr::{Expr, ExprKind, BinaryOp};
use crate::expr::atom::Atom;
use crate::expr::parser::parse_expression;
use crate::expr::var::Var;
use crate::options::DiffOptions;

use log::{debug, trace, warn};
use thiserror::Error;

/// Rule dispatcher for symbolic differentiation. Operands are copied
/// into the result as they were written in `source`, so the engine
/// must be used with expressions parsed from that same string.
#[derive(Debug, Clone)]
pub struct DerivativeEngine<'a> {
  source: &'a str,
  target_variable: &'a Var,
  notation: Notation,
  max_depth: usize,
}

/// Reasons a single node could not be differentiated by any rule.
/// These never escape the engine; the node is written as a formal
/// derivative instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DifferentiationError {
  #[error("Derivative of function '{0}' is not known")]
  UnknownDerivative(String),
  #[error("Exponent depends on the variable")]
  VariableExponent,
  #[error("Expression is nested more than {0} levels deep")]
  TooDeep(usize),
  #[error("No differentiation rule applies")]
  NoRule,
}

impl<'a> DerivativeEngine<'a> {
  pub fn new(source: &'a str, target_variable: &'a Var, notation: Notation, max_depth: usize) -> Self {
    Self { source, target_variable, notation, max_depth }
  }

  pub fn target_variable(&self) -> &Var {
    self.target_variable
  }

  pub fn notation(&self) -> Notation {
    self.notation
  }

  /// Differentiates `expr`. Subexpressions no rule handles appear in
  /// the result as formal derivatives.
  pub fn differentiate(&self, expr: &Expr) -> String {
    self.differentiate_at(expr, 1)
  }

  fn differentiate_at(&self, expr: &Expr, depth: usize) -> String {
    let result = if depth > self.max_depth {
      Err(DifferentiationError::TooDeep(self.max_depth))
    } else {
      self.apply_rules(expr, depth)
    };
    result.unwrap_or_else(|err| {
      if let DifferentiationError::TooDeep(_) = err {
        warn!("Differentiation depth bound exceeded at '{}'", self.text(expr));
      } else {
        trace!("Formal derivative of '{}': {}", self.text(expr), err);
      }
      self.fallback(self.text(expr))
    })
  }

  fn apply_rules(&self, expr: &Expr, depth: usize) -> Result<String, DifferentiationError> {
    let var = self.target_variable;
    let d = |e: &Expr| self.differentiate_at(e, depth + 1);

    match expr.kind() {
      ExprKind::Binary(op @ (BinaryOp::Add | BinaryOp::Sub), left, right) => {
        trace!("Sum rule: {}", self.text(expr));
        return Ok(format!("{} {} {}", d(left), op.symbol(), d(right)));
      }
      ExprKind::Binary(BinaryOp::Mul, left, right) => {
        trace!("Product rule: {}", self.text(expr));
        return Ok(format!("({}) * ({}) + ({}) * ({})", d(left), self.text(right), self.text(left), d(right)));
      }
      ExprKind::Binary(BinaryOp::Div, left, right) => {
        trace!("Quotient rule: {}", self.text(expr));
        let (l, r) = (self.text(left), self.text(right));
        return Ok(format!("(({}) * ({r}) - ({l}) * ({})) / ({r})^2", d(left), d(right)));
      }
      ExprKind::Binary(BinaryOp::Pow, base, exponent) => {
        if let Some(result) = self.power_rule(base, exponent, depth) {
          return Ok(result);
        }
      }
      ExprKind::Group(_, inner) => {
        trace!("Grouping: {}", self.text(expr));
        return Ok(d(inner));
      }
      ExprKind::Call(function, argument) => {
        if let Some(known) = known_function(function) {
          trace!("Chain rule: {}", self.text(expr));
          let outer = known.derivative_at(self.text(argument), self.notation);
          return Ok(format!("{} * ({})", outer, d(argument)));
        }
      }
      _ => {}
    }

    if expr.is_var(var) {
      return Ok(String::from("1"));
    }
    if !expr.mentions(var) {
      return Ok(String::from("0"));
    }

    // A negated operand which mentions the variable has no rule of its
    // own; only the power rule reaches inside it.
    match expr.kind() {
      ExprKind::Juxtaposition(coefficient, term) if term.is_var(var) => {
        match coefficient.kind() {
          ExprKind::Atom(Atom::Number(_)) => Ok(self.text(coefficient).to_owned()),
          _ => Err(DifferentiationError::NoRule),
        }
      }
      ExprKind::Call(function, _) => Err(DifferentiationError::UnknownDerivative(function.to_owned())),
      ExprKind::Binary(BinaryOp::Pow, _, _) => Err(DifferentiationError::VariableExponent),
      _ => Err(DifferentiationError::NoRule),
    }
  }

  /// The power rule, for exponents which do not depend on the
  /// variable. Returns `None` otherwise.
  fn power_rule(&self, base: &Expr, exponent: &Expr, depth: usize) -> Option<String> {
    let var = self.target_variable;
    if exponent.mentions(var) {
      return None;
    }
    if base.is_var(var) {
      if let Some(n) = exponent.as_constant_number() {
        trace!("Power rule: {var}^{n}");
        return Some(monomial_derivative(var, n));
      }
    }
    let e = self.text(exponent);
    let b = self.text(base);
    trace!("General power rule: {b}^{e}");
    let db = self.differentiate_at(base, depth + 1);
    Some(format!("{e} * ({b})^{{{e} - 1}} * ({db})"))
  }

  fn text(&self, expr: &Expr) -> &'a str {
    expr.text(self.source)
  }

  fn fallback(&self, text: &str) -> String {
    self.notation.formal_derivative(self.target_variable, text)
  }
}

/// The derivative of `var^n`.
fn monomial_derivative(var: &Var, n: f64) -> String {
  if n == 1.0 {
    String::from("1")
  } else if n == 2.0 {
    format!("2{var}")
  } else {
    format!("{n}{var}^{{{}}}", n - 1.0)
  }
}

/// Differentiates the expression written in `input` according to
/// `options`. Never fails: input which cannot be parsed, or which
/// exceeds the configured bounds, comes back as a formal derivative.
/// Blank input yields the empty string.
pub fn differentiate(input: &str, options: &DiffOptions) -> String {
  let input = input.trim();
  if input.is_empty() {
    return String::new();
  }
  let var = options.variable();
  let notation = options.notation();
  if input.len() > options.max_input_len() {
    warn!("Input of {} bytes exceeds the limit of {}", input.len(), options.max_input_len());
    return notation.formal_derivative(var, input);
  }
  match parse_expression(input) {
    Ok(expr) => {
      let engine = DerivativeEngine::new(input, var, notation, options.max_depth());
      engine.differentiate(&expr)
    }
    Err(err) => {
      debug!("Could not parse '{input}': {err}");
      notation.formal_derivative(var, input)
    }
  }
}
