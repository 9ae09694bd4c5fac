//! Cohorts and sponsorship rules.

use parrain_core::registry::{CANONICAL_COHORTS, CANONICAL_RULES};
use parrain_core::{CohortCode, CohortRegistry, SponsorshipRule};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_cohorts() -> Vec<String> {
    CANONICAL_COHORTS.iter().map(ToString::to_string).collect()
}

fn default_rules() -> Vec<RuleConfig> {
    CANONICAL_RULES
        .iter()
        .map(|(mentor, mentee)| RuleConfig {
            mentor: (*mentor).to_string(),
            mentee: (*mentee).to_string(),
        })
        .collect()
}

/// `[[sponsorship.rules]]` entry: students of `mentor` sponsor students of `mentee`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuleConfig {
    pub mentor: String,
    pub mentee: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SponsorshipConfig {
    #[serde(default = "default_cohorts")]
    pub cohorts: Vec<String>,

    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

impl Default for SponsorshipConfig {
    fn default() -> Self {
        Self {
            cohorts: default_cohorts(),
            rules: default_rules(),
        }
    }
}

impl SponsorshipConfig {
    /// Validate the section and build the cohort registry from it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if no cohorts are listed and
    /// `ConfigError::Registry` if the rules are inconsistent.
    pub fn registry(&self) -> Result<CohortRegistry, ConfigError> {
        if self.cohorts.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "sponsorship.cohorts".into(),
            });
        }

        let cohorts = self
            .cohorts
            .iter()
            .map(CohortCode::new)
            .collect::<Result<Vec<_>, _>>()?;
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                Ok(SponsorshipRule {
                    mentor: CohortCode::new(&rule.mentor)?,
                    mentee: CohortCode::new(&rule.mentee)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(CohortRegistry::new(cohorts, rules)?)
    }
}
