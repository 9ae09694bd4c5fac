use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cohort::CohortCode;

/// An academic cohort ("promotion"). Immutable once seeded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Cohort {
    pub id: String,
    pub code: CohortCode,
}
