//! Cohort registry and sponsorship rules.
//!
//! The registry holds the fixed set of cohort codes and the mapping from a
//! mentor cohort to the cohort it sponsors. The canonical configuration is a
//! linear chain where each cohort sponsors the one directly below it:
//!
//! ```text
//! M2 → M1 → B3 → B2 → B1
//! ```
//!
//! Arbitrary mappings are accepted as long as every mentee cohort has at most
//! one sponsor, so `sponsor_of` stays a function.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cohort::CohortCode;

/// Cohort codes in the canonical configuration, youngest first.
pub const CANONICAL_COHORTS: [&str; 5] = ["B1", "B2", "B3", "M1", "M2"];

/// Canonical `(mentor, mentee)` pairs.
pub const CANONICAL_RULES: [(&str, &str); 4] =
    [("B2", "B1"), ("B3", "B2"), ("M1", "B3"), ("M2", "M1")];

/// Errors raised while building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("cohort code must not be blank")]
    BlankCode,

    #[error("cohort '{0}' is registered twice")]
    DuplicateCohort(String),

    #[error("sponsorship rule references unknown {role} cohort '{code}'")]
    UnknownCohort { code: String, role: &'static str },

    #[error("cohort '{0}' cannot sponsor itself")]
    SelfSponsorship(String),

    #[error("cohort '{mentee}' has two sponsors: '{first}' and '{second}'")]
    MultipleSponsors {
        mentee: String,
        first: String,
        second: String,
    },
}

/// One sponsorship rule: students of `mentor` sponsor students of `mentee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SponsorshipRule {
    pub mentor: CohortCode,
    pub mentee: CohortCode,
}

/// Read-only view of the cohorts and the sponsorship hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortRegistry {
    cohorts: Vec<CohortCode>,
    rules: Vec<SponsorshipRule>,
}

impl CohortRegistry {
    /// Build a registry from cohort codes and rules.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if a cohort is duplicated, a rule references an
    /// unregistered cohort, a cohort sponsors itself, or a mentee cohort is
    /// given more than one sponsor.
    pub fn new(
        cohorts: Vec<CohortCode>,
        rules: Vec<SponsorshipRule>,
    ) -> Result<Self, RegistryError> {
        for (idx, code) in cohorts.iter().enumerate() {
            if cohorts[..idx].contains(code) {
                return Err(RegistryError::DuplicateCohort(code.to_string()));
            }
        }

        for (idx, rule) in rules.iter().enumerate() {
            if !cohorts.contains(&rule.mentor) {
                return Err(RegistryError::UnknownCohort {
                    code: rule.mentor.to_string(),
                    role: "mentor",
                });
            }
            if !cohorts.contains(&rule.mentee) {
                return Err(RegistryError::UnknownCohort {
                    code: rule.mentee.to_string(),
                    role: "mentee",
                });
            }
            if rule.mentor == rule.mentee {
                return Err(RegistryError::SelfSponsorship(rule.mentor.to_string()));
            }
            if let Some(earlier) = rules[..idx].iter().find(|r| r.mentee == rule.mentee) {
                if earlier.mentor != rule.mentor {
                    return Err(RegistryError::MultipleSponsors {
                        mentee: rule.mentee.to_string(),
                        first: earlier.mentor.to_string(),
                        second: rule.mentor.to_string(),
                    });
                }
            }
        }

        let mut deduped: Vec<SponsorshipRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            if !deduped.contains(&rule) {
                deduped.push(rule);
            }
        }

        Ok(Self {
            cohorts,
            rules: deduped,
        })
    }

    /// The canonical B1..M2 chain.
    #[must_use]
    pub fn canonical() -> Self {
        let cohorts = CANONICAL_COHORTS
            .iter()
            .map(|code| CohortCode((*code).to_string()))
            .collect();
        let rules = CANONICAL_RULES
            .iter()
            .map(|(mentor, mentee)| SponsorshipRule {
                mentor: CohortCode((*mentor).to_string()),
                mentee: CohortCode((*mentee).to_string()),
            })
            .collect();
        Self { cohorts, rules }
    }

    /// All registered cohorts, in registration order.
    #[must_use]
    pub fn cohorts(&self) -> &[CohortCode] {
        &self.cohorts
    }

    #[must_use]
    pub fn rules(&self) -> &[SponsorshipRule] {
        &self.rules
    }

    /// The cohort whose students sponsor `mentee`, if any.
    #[must_use]
    pub fn sponsor_of(&self, mentee: &str) -> Option<&CohortCode> {
        self.rules
            .iter()
            .find(|rule| rule.mentee.as_str() == mentee)
            .map(|rule| &rule.mentor)
    }

    /// The cohort sponsored by `mentor`, if any.
    ///
    /// When a mentor cohort sponsors several cohorts this returns the first
    /// rule's target; use [`Self::mentees_of`] to see all of them.
    #[must_use]
    pub fn sponsored_by(&self, mentor: &str) -> Option<&CohortCode> {
        self.rules
            .iter()
            .find(|rule| rule.mentor.as_str() == mentor)
            .map(|rule| &rule.mentee)
    }

    pub fn mentees_of<'a, 'm>(
        &'a self,
        mentor: &'m str,
    ) -> impl Iterator<Item = &'a CohortCode> + use<'a, 'm> {
        self.rules
            .iter()
            .filter(move |rule| rule.mentor.as_str() == mentor)
            .map(|rule| &rule.mentee)
    }

    /// Cohorts that are the target of some rule, in registration order.
    #[must_use]
    pub fn mentee_cohorts(&self) -> Vec<CohortCode> {
        self.cohorts
            .iter()
            .filter(|code| self.rules.iter().any(|rule| &rule.mentee == *code))
            .cloned()
            .collect()
    }

    /// Cohorts that sponsor some other cohort, in registration order.
    #[must_use]
    pub fn mentor_cohorts(&self) -> Vec<CohortCode> {
        self.cohorts
            .iter()
            .filter(|code| self.rules.iter().any(|rule| &rule.mentor == *code))
            .cloned()
            .collect()
    }
}

impl Default for CohortRegistry {
    fn default() -> Self {
        Self::canonical()
    }
}
