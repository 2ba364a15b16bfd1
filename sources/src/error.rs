//! Error taxonomy for the fetch path, allow us to differentiate between errors.
//!
//! Both classes are cycle-fatal: the caller aborts the current render cycle, surfaces
//! the error and retries on the next scheduled tick.  Nothing here is recoverable by
//! substituting synthetic data.
//!

use thiserror::Error;

pub use sepwatch_formats::DataContractError;

/// Network-level failures: the answer never made it to us in an usable shape.
///
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Network(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP status {0}")]
    Status(u16),
}

/// What a `Fetchable` returns when things go wrong.
///
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Contract(#[from] DataContractError),
}
