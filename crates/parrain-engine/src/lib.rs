//! # parrain-engine
//!
//! Sponsorship operations on top of the Parrainage store.
//!
//! - `engine`: random mentee/mentor draw under the two-tier mentor policy, and undo
//! - `feed`: CSV bulk-import feed (`nom`, `prenom`, `promotion`, optional `matricule`)
//! - `report`: remaining-mentee and mentor-pool counts
//! - `export`: the pairing ledger as delimited CSV

pub mod engine;
pub mod error;
pub mod export;
pub mod feed;
pub mod report;
mod selection;

pub use engine::{PairingEngine, undo_last};
pub use error::PairingError;
