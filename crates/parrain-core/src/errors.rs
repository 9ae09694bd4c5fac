//! Caller-facing error taxonomy.
//!
//! Crate-specific errors (`DatabaseError`, `PairingError`, `ConfigError`) carry
//! the detail; `ErrorKind` is the discriminant exposed to callers so the HTTP
//! layer and the CLI can react without matching on every variant.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Broad class of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The bulk-import feed is malformed (missing columns, unreadable rows).
    Validation,
    /// Missing feed, empty ledger, or no eligible mentee/mentor.
    NotFound,
    /// The sponsorship rules are inconsistent with the stored data.
    Configuration,
    /// Store I/O failed; the enclosing transaction was rolled back.
    Persistence,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Configuration => "configuration",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

