pub mod config;
pub mod decimal;
pub mod utils;
pub mod vector;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorError {
    #[error("Invalid Argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("Domain Error: {0}")]
    DomainError(String),
    #[error("Dimension Mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Config Error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Malformed constructor input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("the coordinates must be nonempty")]
    Empty,
    #[error("the coordinates must be an iterable")]
    NotIterable,
    #[error("cannot parse {input:?} as a decimal: {reason}")]
    ParseDecimal { input: String, reason: String },
}

pub type Result<T> = std::result::Result<T, VectorError>;

// Re-export main types for convenience
pub use bigdecimal::BigDecimal;
pub use config::{DecimalContext, DEFAULT_PRECISION, MIN_PRECISION};
pub use decimal::IntoDecimal;
pub use vector::Vector;
