//! Symbolic differentiation of parsed expressions.

mod derivative;
mod functions;
mod notation;

pub use derivative::{DerivativeEngine, DifferentiationError, differentiate};
pub use functions::{KnownFunction, DerivativeTemplate, known_function, known_function_names};
pub use notation::{Notation, ParseNotationError};
