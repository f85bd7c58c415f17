mod fixity;
mod table;

pub use fixity::{Fixity, FixityTypes, EmptyFixity, InfixProperties, Precedence, Associativity};
pub use table::{OperatorTable, JUXTAPOSITION};

/// An operator has a display name, as it appears in the input, and a
/// function name, which identifies what it means. Several display
/// names may share a function name (`*` and `\cdot`, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
  display_name: String,
  function_name: String,
  fixity: Fixity,
}

impl Operator {
  /// Constructs a new operator whose function name is the same as
  /// its display name.
  pub fn new(name: impl Into<String>, fixity: Fixity) -> Self {
    let name = name.into();
    Operator {
      function_name: name.clone(),
      display_name: name,
      fixity,
    }
  }

  pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
    self.function_name = name.into();
    self
  }

  /// The name of the operator, as written by the user.
  pub fn display_name(&self) -> &str {
    &self.display_name
  }

  pub fn function_name(&self) -> &str {
    &self.function_name
  }

  pub fn fixity(&self) -> &Fixity {
    &self.fixity
  }
}
