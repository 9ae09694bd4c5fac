use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cohort::CohortCode;

/// A student with their sponsorship state.
///
/// `sponsored` is true iff a pairing references this student as mentee;
/// `mentee_count` is the number of pairings referencing them as mentor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub registration_code: Option<String>,
    pub cohort: CohortCode,
    pub sponsored: bool,
    pub mentee_count: u32,
}

impl Student {
    #[must_use]
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id.clone(),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            cohort: self.cohort.clone(),
        }
    }
}

/// Display data for one side of a pairing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub cohort: CohortCode,
}

/// One row of the bulk-import feed, before its cohort code is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentRecord {
    pub last_name: String,
    pub first_name: String,
    pub registration_code: Option<String>,
    pub cohort: String,
}
