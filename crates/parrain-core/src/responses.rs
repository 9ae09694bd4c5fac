//! Response types returned as JSON by `parrain` commands and the HTTP server.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{PairingDetail, StudentSummary};

/// Response from `parrain stats` / `GET /api/stats`.
///
/// `available_parrains` is the raw size of the mentor pool; mentors who
/// already have mentees are still counted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SponsorshipStats {
    #[serde(rename = "remaining_filleuls")]
    pub remaining_mentees: u64,
    #[serde(rename = "available_parrains")]
    pub available_mentors: u64,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: u64,
    pub skipped_unknown_cohort: u64,
    pub skipped_incomplete: u64,
}

/// Outcome of `reset_sponsorship`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResetReport {
    pub pairings_removed: u64,
    pub students_reset: u64,
}

/// Response from `parrain undo` / `POST /api/undo`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UndoResponse {
    pub message: String,
    pub reverted: PairingDetail,
}

/// Bare acknowledgement, e.g. from `POST /api/reset`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Response from `parrain import` / `POST /api/import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportResponse {
    pub message: String,
    pub status: String,
    #[serde(flatten)]
    pub report: ImportReport,
}

impl ImportResponse {
    #[must_use]
    pub fn success(report: ImportReport) -> Self {
        Self {
            message: format!("Successfully imported {} students.", report.imported),
            status: "success".to_string(),
            report,
        }
    }
}

/// Response from `parrain reset` / `POST /api/reset`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResetResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: ResetReport,
}

/// One side of a drawn pair, keyed the way the front-end reads it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PairMember {
    pub nom: String,
    pub prenom: String,
    pub promotion: String,
}

impl From<&StudentSummary> for PairMember {
    fn from(student: &StudentSummary) -> Self {
        Self {
            nom: student.last_name.clone(),
            prenom: student.first_name.clone(),
            promotion: student.cohort.to_string(),
        }
    }
}

/// Response from `parrain draw` / `GET /api/draw`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DrawResponse {
    pub filleul: PairMember,
    pub parrain: PairMember,
}

impl From<&PairingDetail> for DrawResponse {
    fn from(detail: &PairingDetail) -> Self {
        Self {
            filleul: PairMember::from(&detail.mentee),
            parrain: PairMember::from(&detail.mentor),
        }
    }
}
