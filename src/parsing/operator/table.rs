use super::Operator;
use super::fixity::{Fixity, Precedence, Associativity};

use std::collections::HashMap;

/// Function name given to the implicit operator between two adjacent
/// operands, as in `5x`.
pub const JUXTAPOSITION: &str = "juxtapose";

/// A table of operators, indexed by their display name, together with
/// the (optional) implicit juxtaposition operator.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
  by_display_name: HashMap<String, Operator>,
  juxtaposition: Option<Operator>,
}

impl OperatorTable {
  pub fn new() -> OperatorTable {
    OperatorTable::default()
  }

  pub fn with_capacity(capacity: usize) -> OperatorTable {
    OperatorTable {
      by_display_name: HashMap::with_capacity(capacity),
      juxtaposition: None,
    }
  }

  pub fn get_by_display_name(&self, name: &str) -> Option<&Operator> {
    self.by_display_name.get(name)
  }

  pub fn insert(&mut self, op: Operator) {
    self.by_display_name.insert(op.display_name().to_owned(), op);
  }

  pub fn juxtaposition(&self) -> Option<&Operator> {
    self.juxtaposition.as_ref()
  }

  pub fn set_juxtaposition(&mut self, op: Option<Operator>) {
    self.juxtaposition = op;
  }

  /// The operators understood by the differentiator.
  ///
  /// Sums bind loosest, then products, then quotients, so that
  /// `a * b / c` is a product whose right operand is a quotient.
  /// Exponentiation binds tighter than those, and implicit
  /// juxtaposition and prefix negation bind tightest, so the base of
  /// a power is everything before the `^`: `2x^2` is `(2x)^2` and
  /// `-x^2` is `(-x)^2`. Negation binds tighter than juxtaposition,
  /// so `-2x` is `(-2)x`.
  pub fn differentiation_operators() -> OperatorTable {
    let product = Fixity::new().with_infix(Associativity::LEFT, Precedence::new(185));
    let mut table: OperatorTable = vec![
      Operator::new("+", Fixity::new().with_infix(Associativity::LEFT, Precedence::new(180))),
      Operator::new("-", Fixity::new()
        .with_prefix(Precedence::new(210))
        .with_infix(Associativity::LEFT, Precedence::new(180))),
      Operator::new("*", product),
      Operator::new("\\cdot", product).with_function_name("*"),
      Operator::new("\\times", product).with_function_name("*"),
      Operator::new("/", Fixity::new().with_infix(Associativity::LEFT, Precedence::new(190))),
      Operator::new("^", Fixity::new().with_infix(Associativity::RIGHT, Precedence::new(200))),
    ].into_iter().collect();
    table.set_juxtaposition(Some(
      Operator::new("", Fixity::new().with_infix(Associativity::LEFT, Precedence::new(205)))
        .with_function_name(JUXTAPOSITION),
    ));
    table
  }

  pub fn iter(&self) -> impl Iterator<Item = &Operator> {
    self.by_display_name.values()
  }
}

impl FromIterator<Operator> for OperatorTable {
  fn from_iter<I>(iter: I) -> Self
  where I : IntoIterator<Item = Operator> {
    let iter = iter.into_iter();
    let (len_bound, _) = iter.size_hint();
    let mut table = OperatorTable::with_capacity(len_bound);
    for op in iter {
      table.insert(op);
    }
    table
  }
}
