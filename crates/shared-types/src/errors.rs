//! # Error Types
//!
//! Errors surfaced by the ledger host interface.

use thiserror::Error;

/// Errors that can occur when talking to the ledger host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The host could not serve the request.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// A composite key part was empty or contained a reserved code point.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The invoking identity carries no organization attribute.
    #[error("Caller identity has no organization")]
    MissingIdentity,
}
