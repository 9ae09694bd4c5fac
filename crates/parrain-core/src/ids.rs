//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{12 hex chars}`, e.g. `"stu-a3f8b2c1d4e5"`.

pub const PREFIX_COHORT: &str = "coh";
pub const PREFIX_STUDENT: &str = "stu";
pub const PREFIX_PAIRING: &str = "bin";

/// Every prefix in use, for tests and diagnostics.
pub const ALL_PREFIXES: [&str; 3] = [PREFIX_COHORT, PREFIX_STUDENT, PREFIX_PAIRING];
