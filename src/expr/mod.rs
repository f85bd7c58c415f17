//! Expressions, as typed into the derivative node, and the machinery
//! for parsing and differentiating them.

pub mod atom;
pub mod calculus;
pub mod parser;
pub mod tokenizer;
pub mod var;

use atom::Atom;
use var::Var;
use crate::parsing::shunting_yard::Bracket;
use crate::parsing::source::Span;

/// The binary operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Pow,
}

/// A parsed expression. Every node remembers the span of source text
/// it was parsed from; see [`Expr::text`].
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
  kind: ExprKind,
  span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
  Atom(Atom),
  /// Prefix negation, `-a`.
  Neg(Box<Expr>),
  Binary(BinaryOp, Box<Expr>, Box<Expr>),
  /// Two operands written next to each other with no operator, as in
  /// `5x`.
  Juxtaposition(Box<Expr>, Box<Expr>),
  /// An expression in parentheses or braces.
  Group(Bracket, Box<Expr>),
  /// A named single-argument function, `sin(a)` or `\sqrt{a}`.
  Call(String, Box<Expr>),
}

impl BinaryOp {
  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Pow => "^",
    }
  }

  /// Looks up a binary operator by the function name of the
  /// corresponding parser operator.
  pub fn from_function_name(name: &str) -> Option<Self> {
    match name {
      "+" => Some(BinaryOp::Add),
      "-" => Some(BinaryOp::Sub),
      "*" => Some(BinaryOp::Mul),
      "/" => Some(BinaryOp::Div),
      "^" => Some(BinaryOp::Pow),
      _ => None,
    }
  }
}

impl Expr {
  pub fn new(kind: ExprKind, span: Span) -> Self {
    Self { kind, span }
  }

  pub fn kind(&self) -> &ExprKind {
    &self.kind
  }

  pub fn span(&self) -> Span {
    self.span
  }

  /// The source text of this expression, with surrounding whitespace
  /// removed. `source` must be the string this expression was parsed
  /// from.
  pub fn text<'a>(&self, source: &'a str) -> &'a str {
    self.span.slice(source).trim()
  }

  /// Whether this expression is exactly the variable `var`.
  pub fn is_var(&self, var: &Var) -> bool {
    matches!(&self.kind, ExprKind::Atom(Atom::Var(v)) if v == var)
  }

  /// Whether `var` occurs anywhere in this expression. An identifier
  /// or function name counts as an occurrence if it contains the
  /// variable's name, so `xy` and `max(2)` both mention `x`.
  pub fn mentions(&self, var: &Var) -> bool {
    match &self.kind {
      ExprKind::Atom(Atom::Number(_)) => false,
      ExprKind::Atom(Atom::Var(v)) => v.as_str().contains(var.as_str()),
      ExprKind::Call(f, e) => f.contains(var.as_str()) || e.mentions(var),
      ExprKind::Neg(e) | ExprKind::Group(_, e) => e.mentions(var),
      ExprKind::Binary(_, l, r) | ExprKind::Juxtaposition(l, r) => l.mentions(var) || r.mentions(var),
    }
  }

  /// If this expression is a plain numeric literal, possibly grouped
  /// or negated (`3`, `{3}`, `-2`, `(-0.5)`), returns its value.
  pub fn as_constant_number(&self) -> Option<f64> {
    match &self.kind {
      ExprKind::Atom(Atom::Number(n)) => Some(*n),
      ExprKind::Group(_, e) => e.as_constant_number(),
      ExprKind::Neg(e) => e.as_constant_number().map(|n| -n),
      _ => None,
    }
  }

  /// The height of the expression tree. A leaf has depth 1.
  pub fn depth(&self) -> usize {
    let child_depth = match &self.kind {
      ExprKind::Atom(_) => 0,
      ExprKind::Neg(e) | ExprKind::Group(_, e) | ExprKind::Call(_, e) => e.depth(),
      ExprKind::Binary(_, l, r) | ExprKind::Juxtaposition(l, r) => l.depth().max(r.depth()),
    };
    child_depth + 1
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::parser::parse_expression;

  use approx::assert_abs_diff_eq;

  fn x() -> Var {
    Var::x()
  }

  #[test]
  fn test_text_trims_source() {
    let source = "  x * sin( x )  ";
    let expr = parse_expression(source).unwrap();
    let ExprKind::Binary(BinaryOp::Mul, left, right) = expr.kind() else {
      panic!("expected product, got {:?}", expr);
    };
    assert_eq!(left.text(source), "x");
    assert_eq!(right.text(source), "sin( x )");
    assert_eq!(expr.text(source), "x * sin( x )");
  }

  #[test]
  fn test_is_var() {
    assert!(parse_expression("x").unwrap().is_var(&x()));
    assert!(!parse_expression("y").unwrap().is_var(&x()));
    assert!(!parse_expression("(x)").unwrap().is_var(&x()));
    assert!(!parse_expression("xy").unwrap().is_var(&x()));
  }

  #[test]
  fn test_mentions() {
    assert!(parse_expression("x").unwrap().mentions(&x()));
    assert!(parse_expression("3 + sin(2x)").unwrap().mentions(&x()));
    assert!(parse_expression("xy").unwrap().mentions(&x()));
    assert!(!parse_expression("y^2 + 3").unwrap().mentions(&x()));
    assert!(parse_expression("exp(2)").unwrap().mentions(&x()));
    assert!(parse_expression("x(2)").unwrap().mentions(&x()));
    assert!(!parse_expression("f(2)").unwrap().mentions(&x()));
  }

  #[test]
  fn test_as_constant_number() {
    assert_abs_diff_eq!(parse_expression("3").unwrap().as_constant_number().unwrap(), 3.0);
    assert_abs_diff_eq!(parse_expression("{3}").unwrap().as_constant_number().unwrap(), 3.0);
    assert_abs_diff_eq!(parse_expression("-2").unwrap().as_constant_number().unwrap(), -2.0);
    assert_abs_diff_eq!(parse_expression("(-0.5)").unwrap().as_constant_number().unwrap(), -0.5);
    assert_eq!(parse_expression("2y").unwrap().as_constant_number(), None);
    assert_eq!(parse_expression("1 + 1").unwrap().as_constant_number(), None);
  }

  #[test]
  fn test_depth() {
    assert_eq!(parse_expression("x").unwrap().depth(), 1);
    assert_eq!(parse_expression("x + 1").unwrap().depth(), 2);
    assert_eq!(parse_expression("sin((x))").unwrap().depth(), 3);
  }

  #[test]
  fn test_binary_op_lookup() {
    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Pow] {
      assert_eq!(BinaryOp::from_function_name(op.symbol()), Some(op));
    }
    assert_eq!(BinaryOp::from_function_name("juxtapose"), None);
  }
}
