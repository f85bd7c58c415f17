//! Fixity declarations for operators.

use bitflags::bitflags;

/// An operator can be infix, prefix, or both. An operator will always
/// be at least one of the two.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct Fixity {
  as_prefix: Option<Precedence>,
  as_infix: Option<InfixProperties>,
}

/// Unlike prefix operators, infix operators have both associativity
/// and precedence.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct InfixProperties {
  assoc: Associativity,
  prec: Precedence,
}

/// The precedence of an operator. Higher values bind more tightly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence(u64);

/// The associativity of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Associativity {
  left_assoc: bool,
  right_assoc: bool,
}

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  pub struct FixityTypes: u8 {
    const PREFIX = 0b0001;
    const INFIX  = 0b0010;
  }
}

/// The type of an "empty" fixity structure. This is an intermediate
/// type which is only used while building a [`Fixity`], and it
/// guarantees that a `Fixity` always has at least one fixity type.
#[derive(Debug)]
pub struct EmptyFixity {
  data: Fixity,
}

impl Fixity {
  // allow: EmptyFixity is conceptually a Fixity, just with some
  // typechecks. It's intended to be used in a fluent builder style.
  #[allow(clippy::new_ret_no_self)]
  pub fn new() -> EmptyFixity {
    EmptyFixity {
      data: Fixity {
        as_prefix: None,
        as_infix: None,
      },
    }
  }

  pub fn with_prefix(mut self, p: Precedence) -> Fixity {
    self.as_prefix = Some(p);
    self
  }

  pub fn with_infix(mut self, a: Associativity, p: Precedence) -> Fixity {
    self.as_infix = Some(InfixProperties { assoc: a, prec: p });
    self
  }

  pub fn as_prefix(&self) -> Option<Precedence> {
    self.as_prefix
  }

  pub fn as_infix(&self) -> Option<InfixProperties> {
    self.as_infix
  }

  pub fn is_prefix(&self) -> bool {
    self.as_prefix.is_some()
  }

  pub fn is_infix(&self) -> bool {
    self.as_infix.is_some()
  }

  pub fn fixity_types(&self) -> FixityTypes {
    let mut t = FixityTypes::empty();
    if self.as_prefix.is_some() {
      t |= FixityTypes::PREFIX;
    }
    if self.as_infix.is_some() {
      t |= FixityTypes::INFIX;
    }
    t
  }
}

impl EmptyFixity {
  pub fn with_prefix(self, p: Precedence) -> Fixity {
    self.data.with_prefix(p)
  }

  pub fn with_infix(self, a: Associativity, p: Precedence) -> Fixity {
    self.data.with_infix(a, p)
  }
}

impl InfixProperties {
  pub fn associativity(&self) -> Associativity {
    self.assoc
  }

  pub fn precedence(&self) -> Precedence {
    self.prec
  }

  /// Whether an already-parsed operator with precedence `stack_prec`
  /// must be reduced before this operator is pushed.
  pub fn yields_to(&self, stack_prec: Precedence) -> bool {
    stack_prec > self.prec || (stack_prec == self.prec && self.assoc.is_left_assoc())
  }
}

impl Precedence {
  /// Internally, we store an operator's precedence as ten times the
  /// input value, which leaves room between any two user-facing
  /// values.
  ///
  /// Use [`from_raw`](Precedence::from_raw) to bypass the
  /// multiplication and construct a `Precedence` value directly.
  pub fn new(n: u64) -> Precedence {
    Precedence(n * 10)
  }

  pub fn from_raw(n: u64) -> Precedence {
    Precedence(n)
  }
}

impl Associativity {
  /// Indicates an operator which associates to the left.
  pub const LEFT: Associativity = Associativity {
    left_assoc: true,
    right_assoc: false,
  };
  /// Indicates an operator which associate to the right.
  pub const RIGHT: Associativity = Associativity {
    left_assoc: false,
    right_assoc: true,
  };
  pub const fn is_left_assoc(self) -> bool {
    self.left_assoc
  }
  pub const fn is_right_assoc(self) -> bool {
    self.right_assoc
  }
}
