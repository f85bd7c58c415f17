use crate::definition::DefinitionError;
use crate::expr::parser::ParseError;
use crate::expr::var::TryFromStringError;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Parse(#[from] ParseError),
  #[error("Input of {len} bytes exceeds the limit of {limit}")]
  InputTooLong { len: usize, limit: usize },
  #[error("Invalid configuration: {0}")]
  Config(#[from] serde_json::Error),
  #[error("{0}")]
  InvalidVariable(#[from] TryFromStringError),
  #[error("{0}")]
  Definition(#[from] DefinitionError),
}
