use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::StudentSummary;

/// A mentor/mentee assignment ("binôme"), as stored in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Pairing {
    pub id: String,
    pub mentee_id: String,
    pub mentor_id: String,
    pub created_at: DateTime<Utc>,
}

/// A pairing joined with both students' display data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PairingDetail {
    pub id: String,
    pub mentee: StudentSummary,
    pub mentor: StudentSummary,
    pub created_at: DateTime<Utc>,
}
