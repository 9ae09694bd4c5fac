//! Store error type.

use thiserror::Error;

/// Failure inside the libSQL store.
///
/// The engine wraps this as `PairingError::Persistence`; callers only see the
/// message, never the variant.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A stored value could not be read back (e.g. a malformed timestamp).
    #[error("unreadable row: {0}")]
    Query(String),

    #[error("schema setup failed: {0}")]
    Migration(String),

    /// A lookup by id matched nothing.
    #[error("no matching row")]
    NoResult,

    /// A guarded write touched no row, or a row violates a ledger invariant
    /// (double sponsorship, self-pairing, a pairing gone before undo).
    #[error("inconsistent sponsorship state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    LibSql(#[from] libsql::Error),
}
