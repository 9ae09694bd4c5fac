//! Sponsorship progress counts.

use parrain_core::CohortRegistry;
use parrain_core::responses::SponsorshipStats;
use parrain_db::service::ParrainService;

use crate::error::PairingError;

/// Count unsponsored mentees and the raw mentor pool.
///
/// Mentors who already have mentees stay in `available_mentors`; tier 2 of
/// the draw can still pick them.
///
/// # Errors
///
/// Returns `Persistence` if a count query fails.
pub async fn stats(
    svc: &ParrainService,
    registry: &CohortRegistry,
) -> Result<SponsorshipStats, PairingError> {
    let remaining_mentees = svc
        .count_unsponsored_in(&registry.mentee_cohorts())
        .await?;
    let available_mentors = svc.count_students_in(&registry.mentor_cohorts()).await?;
    Ok(SponsorshipStats {
        remaining_mentees,
        available_mentors,
    })
}

#[cfg(test)]
mod tests {
    use parrain_core::entities::StudentRecord;
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(last: &str, cohort: &str) -> StudentRecord {
        StudentRecord {
            last_name: last.into(),
            first_name: "x".into(),
            registration_code: None,
            cohort: cohort.into(),
        }
    }

    #[tokio::test]
    async fn counts_overlapping_cohorts_on_both_sides() {
        let registry = CohortRegistry::canonical();
        let svc = ParrainService::new_local(":memory:").await.unwrap();
        svc.seed_cohorts(registry.cohorts()).await.unwrap();
        svc.bulk_replace(&[
            row("a", "B1"),
            row("b", "B1"),
            row("c", "B2"),
            row("d", "M2"),
        ])
        .await
        .unwrap();

        let counts = stats(&svc, &registry).await.unwrap();
        // B2 students are both mentees (of B3) and mentors (of B1).
        assert_eq!(
            counts,
            SponsorshipStats {
                remaining_mentees: 3,
                available_mentors: 2,
            }
        );
    }

    #[tokio::test]
    async fn empty_store_counts_zero() {
        let svc = ParrainService::new_local(":memory:").await.unwrap();
        let counts = stats(&svc, &CohortRegistry::canonical()).await.unwrap();
        assert_eq!(counts.remaining_mentees, 0);
        assert_eq!(counts.available_mentors, 0);
    }
}
