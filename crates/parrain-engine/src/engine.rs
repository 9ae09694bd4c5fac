//! Draw and undo.
//!
//! A draw picks one unsponsored mentee uniformly at random across every
//! mentee-eligible cohort, resolves the cohort that sponsors it, and picks a
//! mentor there with [`select_mentor`](crate::selection::select_mentor). The
//! three writes it causes (ledger row, mentee flag, mentor count) share one
//! `IMMEDIATE` transaction with the reads that chose them.

use chrono::Utc;
use parrain_core::CohortRegistry;
use parrain_core::entities::PairingDetail;
use parrain_db::helpers::settle;
use parrain_db::repos::{pairing, student};
use parrain_db::service::ParrainService;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::error::PairingError;
use crate::selection::select_mentor;

/// Draws pairings against a fixed registry with an injected random source.
pub struct PairingEngine<R: RngCore = StdRng> {
    registry: CohortRegistry,
    rng: R,
}

impl PairingEngine<StdRng> {
    /// Build an engine backed by `StdRng`.
    ///
    /// With a seed, the sequence of draws is reproducible for a given store
    /// state; without one the generator is seeded from the OS.
    #[must_use]
    pub fn from_seed(registry: CohortRegistry, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(registry, rng)
    }
}

impl<R: Rng> PairingEngine<R> {
    pub const fn new(registry: CohortRegistry, rng: R) -> Self {
        Self { registry, rng }
    }

    #[must_use]
    pub const fn registry(&self) -> &CohortRegistry {
        &self.registry
    }

    /// Pair one random unsponsored mentee with a mentor from the sponsoring cohort.
    ///
    /// # Errors
    ///
    /// - `NoEligibleMentee` when every mentee-eligible student is sponsored
    /// - `NoEligibleMentor` when the sponsoring cohort has no students
    /// - `Configuration` when the mentee's cohort has no sponsor rule
    /// - `Persistence` on store failure; nothing is written in that case
    pub async fn draw(&mut self, svc: &ParrainService) -> Result<PairingDetail, PairingError> {
        let tx = svc.db().begin_write().await?;
        let result = self.draw_in(&tx).await;
        let detail = settle(tx, result).await?;

        tracing::info!(
            pairing = %detail.id,
            mentee = %detail.mentee.id,
            mentor = %detail.mentor.id,
            cohort = %detail.mentee.cohort,
            "drew pairing"
        );
        Ok(detail)
    }

    async fn draw_in(&mut self, conn: &libsql::Connection) -> Result<PairingDetail, PairingError> {
        let mentee_cohorts = self.registry.mentee_cohorts();
        let mentees = student::list_unsponsored_in(conn, &mentee_cohorts).await?;
        let mentee = mentees
            .choose(&mut self.rng)
            .ok_or(PairingError::NoEligibleMentee)?;

        let mentor_cohort = self
            .registry
            .sponsor_of(mentee.cohort.as_str())
            .cloned()
            .ok_or_else(|| {
                PairingError::Configuration(format!(
                    "cohort {} has no sponsoring cohort",
                    mentee.cohort
                ))
            })?;

        let candidates = student::list_in(conn, std::slice::from_ref(&mentor_cohort)).await?;
        tracing::debug!(
            mentees = mentees.len(),
            mentors = candidates.len(),
            cohort = %mentor_cohort,
            "selecting mentor"
        );
        let mentor = select_mentor(&candidates, &mut self.rng).ok_or_else(|| {
            PairingError::NoEligibleMentor {
                cohort: mentor_cohort.to_string(),
            }
        })?;

        let recorded = pairing::record(conn, &mentee.id, &mentor.id, Utc::now()).await?;
        Ok(PairingDetail {
            id: recorded.id,
            mentee: mentee.summary(),
            mentor: mentor.summary(),
            created_at: recorded.created_at,
        })
    }
}

/// Reverse the most recent pairing.
///
/// Repeated calls walk the ledger backwards one pairing at a time.
///
/// # Errors
///
/// Returns `EmptyLedger` when there is nothing to undo, or `Persistence` if
/// the store fails (the transaction is rolled back).
pub async fn undo_last(svc: &ParrainService) -> Result<PairingDetail, PairingError> {
    let tx = svc.db().begin_write().await?;
    let result = undo_in(&tx).await;
    let detail = settle(tx, result).await?;

    tracing::info!(
        pairing = %detail.id,
        mentee = %detail.mentee.id,
        mentor = %detail.mentor.id,
        "undid pairing"
    );
    Ok(detail)
}

async fn undo_in(conn: &libsql::Connection) -> Result<PairingDetail, PairingError> {
    let latest = pairing::latest(conn)
        .await?
        .ok_or(PairingError::EmptyLedger)?;
    let detail = pairing::detail(conn, &latest.id).await?;

    if !pairing::revert(conn, &latest).await? {
        tracing::warn!(
            mentor = %latest.mentor_id,
            "mentor had no mentees recorded; count left at zero"
        );
    }
    Ok(detail)
}
