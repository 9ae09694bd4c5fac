//! Cohort codes ("promotions").

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::registry::RegistryError;

/// Short code identifying an academic cohort, e.g. `"B1"` or `"M2"`.
///
/// Codes are compared verbatim after trimming surrounding whitespace.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct CohortCode(pub(crate) String);

impl CohortCode {
    /// Build a code from user or feed input.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BlankCode` if the input is empty after trimming.
    pub fn new(code: impl AsRef<str>) -> Result<Self, RegistryError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RegistryError::BlankCode);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CohortCode {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for CohortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CohortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
