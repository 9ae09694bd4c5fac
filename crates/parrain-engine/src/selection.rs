//! Pure selection policy, kept apart from the store so it can be tested with
//! fixed candidate lists.

use parrain_core::entities::Student;
use rand::Rng;
use rand::seq::SliceRandom;

/// Pick a mentor from one cohort's students.
///
/// Tier 1 is every candidate with no mentee yet; only when it is empty does
/// the draw fall back to the whole cohort (tier 2).
pub(crate) fn select_mentor<'a, R>(candidates: &'a [Student], rng: &mut R) -> Option<&'a Student>
where
    R: Rng + ?Sized,
{
    let fresh: Vec<&Student> = candidates.iter().filter(|s| s.mentee_count == 0).collect();
    if let Some(mentor) = fresh.choose(rng) {
        return Some(*mentor);
    }
    candidates.choose(rng)
}
