//! Error taxonomy for the estimator.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// Rate statistics that cannot describe a probability distribution.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A raw key whose fields do not form a legal base/out state.
    #[error("Ill-formed state key {key:#010b}: {reason}")]
    IllFormedState { key: u8, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, EstimateError>;
