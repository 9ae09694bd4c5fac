//! # parrain-core
//!
//! Core types, cohort registry, and error kinds for Parrainage.
//!
//! This crate provides the foundational types shared across all Parrainage crates:
//! - Entity structs for cohorts, students, and pairings
//! - The cohort registry holding the sponsorship rules (which cohort sponsors which)
//! - ID prefix constants
//! - The caller-facing error taxonomy (`ErrorKind`)
//! - Response types returned by the CLI and the HTTP server

pub mod cohort;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod registry;
pub mod responses;

pub use cohort::CohortCode;
pub use registry::{CohortRegistry, RegistryError, SponsorshipRule};
