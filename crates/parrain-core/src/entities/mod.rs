//! Entity structs for all Parrainage domain objects.
//!
//! Each entity maps to a table in the libSQL database. Relations are carried as
//! identifiers; the denormalized display views (`StudentSummary`,
//! `PairingDetail`) are assembled by store queries.

mod cohort;
mod pairing;
mod student;

pub use cohort::Cohort;
pub use pairing::{Pairing, PairingDetail};
pub use student::{Student, StudentRecord, StudentSummary};
