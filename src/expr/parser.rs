//! Parser for the derivative node's expression language.

use super::{Expr, ExprKind, BinaryOp};
use super::atom::Atom;
use super::tokenizer::{ExprTokenizer, TokenizerError};
use crate::parsing::operator::{Operator, OperatorTable, JUXTAPOSITION};
use crate::parsing::shunting_yard::{self, ShuntingYardDriver, ShuntingYardError, Bracket};
use crate::parsing::source::Span;
use crate::parsing::tokenizer::TokenizerState;

use once_cell::sync::Lazy;
use thiserror::Error;

static DIFFERENTIATION_OPERATORS: Lazy<OperatorTable> =
  Lazy::new(OperatorTable::differentiation_operators);

static DEFAULT_PARSER: Lazy<ExprParser<'static>> = Lazy::new(ExprParser::default);

#[derive(Clone, Debug)]
pub struct ExprParser<'a> {
  tokenizer: ExprTokenizer<'a>,
  operator_table: &'a OperatorTable,
}

#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ExprShuntingYardDriver {}

/// Errors produced by [`ExprShuntingYardDriver`] for operators it
/// has no interpretation for.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DriverError {
  #[error("Unknown infix operator '{0}'")]
  UnknownInfixOperator(String),
  #[error("Unknown prefix operator '{0}'")]
  UnknownPrefixOperator(String),
}

#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
  #[error("{0}")]
  TokenizerError(#[from] TokenizerError),
  #[error("{0}")]
  ShuntingYardError(#[from] ShuntingYardError<Atom, DriverError>),
}

impl<'a> ExprParser<'a> {
  pub fn new(operator_table: &'a OperatorTable) -> Self {
    Self {
      tokenizer: ExprTokenizer::new(operator_table),
      operator_table,
    }
  }

  pub fn tokenizer(&self) -> &ExprTokenizer<'a> {
    &self.tokenizer
  }

  pub fn parse(&self, input: &str) -> Result<Expr, ParseError> {
    let mut state = TokenizerState::new(input);
    let tokens = self.tokenizer.read_tokens(&mut state)?;
    let mut driver = ExprShuntingYardDriver::new();
    let expr = shunting_yard::parse(&mut driver, tokens, self.operator_table.juxtaposition())?;
    Ok(expr)
  }
}

impl Default for ExprParser<'static> {
  fn default() -> Self {
    ExprParser::new(&DIFFERENTIATION_OPERATORS)
  }
}

impl ExprShuntingYardDriver {
  pub fn new() -> Self {
    Self {}
  }
}

impl ShuntingYardDriver<Atom> for ExprShuntingYardDriver {
  type Output = Expr;
  type Error = DriverError;

  fn compile_scalar(&mut self, scalar: Atom, span: Span) -> Result<Expr, DriverError> {
    Ok(Expr::new(ExprKind::Atom(scalar), span))
  }

  fn compile_infix_op(&mut self, left: Expr, oper: &Operator, right: Expr, span: Span) -> Result<Expr, DriverError> {
    let kind = if oper.function_name() == JUXTAPOSITION {
      ExprKind::Juxtaposition(Box::new(left), Box::new(right))
    } else {
      let op = BinaryOp::from_function_name(oper.function_name())
        .ok_or_else(|| DriverError::UnknownInfixOperator(oper.display_name().to_owned()))?;
      ExprKind::Binary(op, Box::new(left), Box::new(right))
    };
    Ok(Expr::new(kind, span))
  }

  fn compile_prefix_op(&mut self, oper: &Operator, right: Expr, span: Span) -> Result<Expr, DriverError> {
    if oper.function_name() == "-" {
      Ok(Expr::new(ExprKind::Neg(Box::new(right)), span))
    } else {
      Err(DriverError::UnknownPrefixOperator(oper.display_name().to_owned()))
    }
  }

  fn compile_group(&mut self, bracket: Bracket, inner: Expr, span: Span) -> Result<Expr, DriverError> {
    Ok(Expr::new(ExprKind::Group(bracket, Box::new(inner)), span))
  }

  fn compile_call(&mut self, function: String, _bracket: Bracket, argument: Expr, span: Span) -> Result<Expr, DriverError> {
    Ok(Expr::new(ExprKind::Call(function, Box::new(argument)), span))
  }
}

/// Parses `input` with the standard differentiation operators.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
  DEFAULT_PARSER.parse(input)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::var::Var;

  /// Renders the tree structure of an expression, for compact
  /// assertions.
  fn shape(expr: &Expr) -> String {
    match expr.kind() {
      ExprKind::Atom(a) => a.to_string(),
      ExprKind::Neg(e) => format!("(neg {})", shape(e)),
      ExprKind::Binary(op, l, r) => format!("({} {} {})", op.symbol(), shape(l), shape(r)),
      ExprKind::Juxtaposition(l, r) => format!("(juxt {} {})", shape(l), shape(r)),
      ExprKind::Group(b, e) => format!("{}{}{}", b.open_str(), shape(e), b.close_str()),
      ExprKind::Call(f, e) => format!("({} {})", f, shape(e)),
    }
  }

  fn parse_shape(input: &str) -> String {
    shape(&parse_expression(input).unwrap())
  }

  #[test]
  fn test_sums_associate_left() {
    assert_eq!(parse_shape("a - b + c"), "(+ (- a b) c)");
  }

  #[test]
  fn test_products_bind_looser_than_quotients() {
    assert_eq!(parse_shape("a * b / c"), "(* a (/ b c))");
    assert_eq!(parse_shape("a / b * c"), "(* (/ a b) c)");
    assert_eq!(parse_shape("a / b / c"), "(/ (/ a b) c)");
  }

  #[test]
  fn test_power_binds_right() {
    assert_eq!(parse_shape("x^2^3"), "(^ x (^ 2 3))");
    assert_eq!(parse_shape("x^{3}"), "(^ x {3})");
  }

  #[test]
  fn test_negation() {
    assert_eq!(parse_shape("-x"), "(neg x)");
    assert_eq!(parse_shape("-x^2"), "(^ (neg x) 2)");
    assert_eq!(parse_shape("-x * y"), "(* (neg x) y)");
    assert_eq!(parse_shape("x^-2"), "(^ x (neg 2))");
    assert_eq!(parse_shape("x - -y"), "(- x (neg y))");
  }

  #[test]
  fn test_juxtaposition() {
    assert_eq!(parse_shape("5x"), "(juxt 5 x)");
    assert_eq!(parse_shape("2x^2"), "(^ (juxt 2 x) 2)");
    assert_eq!(parse_shape("x^2y"), "(^ x (juxt 2 y))");
    assert_eq!(parse_shape("3x^2 + 2x"), "(+ (^ (juxt 3 x) 2) (juxt 2 x))");
    assert_eq!(parse_shape("-2x"), "(juxt (neg 2) x)");
    assert_eq!(parse_shape("2x / 3"), "(/ (juxt 2 x) 3)");
    assert_eq!(parse_shape("2(x + 1)"), "(juxt 2 ((+ x 1)))");
  }

  #[test]
  fn test_function_calls() {
    assert_eq!(parse_shape("sin(x^2)"), "(sin (^ x 2))");
    assert_eq!(parse_shape("\\sqrt{x}"), "(sqrt x)");
    assert_eq!(parse_shape("ln(sin(x))"), "(ln (sin x))");
  }

  #[test]
  fn test_latex_product() {
    assert_eq!(parse_shape("x \\cdot y"), "(* x y)");
    assert_eq!(parse_shape("\\left(x\\right) \\times 2"), "(* (x) 2)");
  }

  #[test]
  fn test_spans() {
    let source = "3 + sin(x^2)";
    let expr = parse_expression(source).unwrap();
    assert_eq!(expr.text(source), source);
    let ExprKind::Binary(BinaryOp::Add, _, right) = expr.kind() else {
      panic!("expected sum");
    };
    assert_eq!(right.text(source), "sin(x^2)");
    let ExprKind::Call(name, arg) = right.kind() else {
      panic!("expected call");
    };
    assert_eq!(name, "sin");
    assert_eq!(arg.text(source), "x^2");
  }

  #[test]
  fn test_identifiers_are_vars() {
    let expr = parse_expression("theta").unwrap();
    assert!(expr.is_var(&Var::new("theta").unwrap()));
  }

  #[test]
  fn test_parse_errors() {
    assert!(matches!(parse_expression(""), Err(ParseError::ShuntingYardError(ShuntingYardError::UnexpectedEOF))));
    assert!(matches!(parse_expression("x +"), Err(ParseError::ShuntingYardError(ShuntingYardError::UnexpectedEOF))));
    assert!(matches!(parse_expression("(x"), Err(ParseError::ShuntingYardError(ShuntingYardError::UnclosedBracket(..)))));
    assert!(matches!(parse_expression("x)"), Err(ParseError::ShuntingYardError(ShuntingYardError::UnmatchedBracket(..)))));
    assert!(matches!(parse_expression("x # y"), Err(ParseError::TokenizerError(_))));
    assert!(matches!(parse_expression("* x"), Err(ParseError::ShuntingYardError(ShuntingYardError::UnexpectedToken(_)))));
  }

  #[test]
  fn test_error_messages() {
    let err = parse_expression("x # y").unwrap_err();
    assert_eq!(err.to_string(), "Expected token, but found '#' at 2");
    let err = parse_expression("(x").unwrap_err();
    assert_eq!(err.to_string(), "unclosed '(' at position 0-1");
  }
}
