//! Domain error types.
//!
//! `FareError` covers the write path, `QueryError` the best-route query.

use std::io;

use super::LocationCode;

/// Errors from adding a fare.
#[derive(Debug, thiserror::Error)]
pub enum FareError {
    /// Location code format or cost range violation. Not retryable.
    #[error("invalid fare format")]
    InvalidFare,

    /// The (boarding, destination) pair is already stored.
    ///
    /// The fare is considered satisfied; callers may treat this as success.
    #[error("fare already stored")]
    FareAlreadyExists,

    /// The durable log append failed. The route table write was rolled back.
    #[error("could not persist fare: {0}")]
    Persistence(#[from] io::Error),
}

impl FareError {
    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FareError::Persistence(_))
    }

    /// Whether the caller's intent is already met despite the error.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, FareError::FareAlreadyExists)
    }
}

/// Errors from a best-route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A query endpoint is not a well-formed location code.
    #[error("invalid location code: {0:?}")]
    InvalidLocationCode(String),

    /// A well-formed code that no stored fare mentions.
    #[error("location {0} is not registered")]
    LocationNotRegistered(LocationCode),

    /// Search finished without reaching the destination.
    #[error("no route from {from} to {to}")]
    RouteNotFound { from: LocationCode, to: LocationCode },
}
