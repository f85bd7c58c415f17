//! Symbolic differentiation of single-variable expressions, written
//! in plain or LaTeX-flavoured math notation.
//!
//! The main entry point is [`differentiate`]. Derivatives are produced
//! by pattern-driven rewriting; operands are copied verbatim from the
//! input, and anything the engine does not understand is written as a
//! formal derivative, `d/dx(...)`. Differentiation never fails.

pub mod definition;
pub mod error;
pub mod expr;
pub mod node;
pub mod options;
pub mod parsing;
pub mod util;

pub use error::Error;
pub use expr::calculus::Notation;
pub use expr::var::Var;
pub use definition::FunctionDefinition;
pub use node::DerivativeNode;
pub use options::DiffOptions;

use expr::Expr;

/// Differentiates `expr` with respect to the variable named
/// `variable`, in plain notation. A blank variable name means `x`. An
/// invalid variable name yields the formal derivative of the whole
/// input.
pub fn differentiate(expr: &str, variable: &str) -> String {
  let variable = match variable.trim() {
    "" => "x",
    variable => variable,
  };
  match DiffOptions::for_variable(variable) {
    Ok(options) => differentiate_with(expr, &options),
    Err(err) => {
      log::debug!("{err}");
      let expr = expr.trim();
      if expr.is_empty() {
        String::new()
      } else {
        format!("d/d{variable}({expr})")
      }
    }
  }
}

/// Differentiates `expr` under `options`, which choose the variable,
/// the notation of the output and the bounds on input size and depth.
pub fn differentiate_with(expr: &str, options: &DiffOptions) -> String {
  crate::expr::calculus::differentiate(expr, options)
}

/// Parses `input` into an expression tree, checking it against the
/// default input length limit.
pub fn parse_expression(input: &str) -> Result<Expr, Error> {
  let limit = options::DEFAULT_MAX_INPUT_LEN;
  if input.len() > limit {
    return Err(Error::InputTooLong { len: input.len(), limit });
  }
  let expr = crate::expr::parser::parse_expression(input)?;
  Ok(expr)
}
