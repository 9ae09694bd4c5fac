//! Error types for parrain-engine.

use std::path::PathBuf;

use parrain_core::errors::ErrorKind;
use parrain_db::error::DatabaseError;

/// Errors from draw, undo, import, and export.
#[derive(Debug, thiserror::Error)]
pub enum PairingError {
    /// The import feed is malformed.
    #[error("invalid feed: {0}")]
    Validation(String),

    /// The import feed could not be parsed as CSV.
    #[error("unreadable feed: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("feed not found at {}", .0.display())]
    FeedMissing(PathBuf),

    #[error("no pairings recorded")]
    EmptyLedger,

    #[error("no mentee left to sponsor")]
    NoEligibleMentee,

    #[error("no mentor available in cohort {cohort}")]
    NoEligibleMentor { cohort: String },

    /// Sponsorship rules do not cover a cohort found in the store.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("database error: {0}")]
    Persistence(#[from] DatabaseError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl PairingError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Csv(_) => ErrorKind::Validation,
            Self::FeedMissing(_)
            | Self::EmptyLedger
            | Self::NoEligibleMentee
            | Self::NoEligibleMentor { .. } => ErrorKind::NotFound,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Persistence(_) | Self::Io(_) => ErrorKind::Persistence,
        }
    }
}
