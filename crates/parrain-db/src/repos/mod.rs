//! Repository modules for cohorts, students, and the pairing ledger.
//!
//! Each module exposes connection-level functions (usable inside a caller's
//! transaction) and adds convenience methods to `ParrainService`.

pub mod cohort;
pub mod pairing;
pub mod student;
