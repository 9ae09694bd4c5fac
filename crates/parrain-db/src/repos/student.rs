//! Student repository: bulk load/clear, sponsorship flags, cohort queries.

use parrain_core::CohortCode;
use parrain_core::entities::{Student, StudentRecord};
use parrain_core::ids::PREFIX_STUDENT;
use parrain_core::responses::{ImportReport, ResetReport};

use crate::error::DatabaseError;
use crate::helpers::{
    generate_id, get_count, get_flag, get_opt_string, placeholders, read_count, settle,
};
use crate::repos::cohort;
use crate::service::ParrainService;

const SELECT_COLS: &str = "s.id, s.last_name, s.first_name, s.registration_code, c.code, \
                           s.sponsored, s.mentee_count";

const FROM_JOINED: &str = "FROM students s JOIN cohorts c ON c.id = s.cohort_id";

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    let code: String = row.get(4)?;
    Ok(Student {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        registration_code: get_opt_string(row, 3)?,
        cohort: CohortCode::new(&code)
            .map_err(|e| DatabaseError::InvalidState(format!("student cohort: {e}")))?,
        sponsored: get_flag(row, 5)?,
        mentee_count: get_count(row, 6)?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Student>, DatabaseError> {
    let mut students = Vec::new();
    while let Some(row) = rows.next().await? {
        students.push(row_to_student(&row)?);
    }
    Ok(students)
}

fn code_params(cohorts: &[CohortCode]) -> Vec<libsql::Value> {
    cohorts.iter().map(|c| c.as_str().into()).collect()
}

pub async fn get(conn: &libsql::Connection, id: &str) -> Result<Student, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} {FROM_JOINED} WHERE s.id = ?1"),
            [id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_student(&row)
}

pub async fn list_all(conn: &libsql::Connection) -> Result<Vec<Student>, DatabaseError> {
    let rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} {FROM_JOINED} ORDER BY s.rowid"),
            (),
        )
        .await?;
    collect(rows).await
}

/// All students in the given cohorts, in insertion order.
pub async fn list_in(
    conn: &libsql::Connection,
    cohorts: &[CohortCode],
) -> Result<Vec<Student>, DatabaseError> {
    if cohorts.is_empty() {
        return Ok(Vec::new());
    }
    let rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} {FROM_JOINED} WHERE c.code IN ({}) ORDER BY s.rowid",
                placeholders(1, cohorts.len())
            ),
            libsql::params_from_iter(code_params(cohorts)),
        )
        .await?;
    collect(rows).await
}

/// Students in the given cohorts that have no mentor yet, in insertion order.
pub async fn list_unsponsored_in(
    conn: &libsql::Connection,
    cohorts: &[CohortCode],
) -> Result<Vec<Student>, DatabaseError> {
    if cohorts.is_empty() {
        return Ok(Vec::new());
    }
    let rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} {FROM_JOINED} \
                 WHERE c.code IN ({}) AND s.sponsored = 0 ORDER BY s.rowid",
                placeholders(1, cohorts.len())
            ),
            libsql::params_from_iter(code_params(cohorts)),
        )
        .await?;
    collect(rows).await
}

pub async fn count_in(
    conn: &libsql::Connection,
    cohorts: &[CohortCode],
) -> Result<u64, DatabaseError> {
    if cohorts.is_empty() {
        return Ok(0);
    }
    let rows = conn
        .query(
            &format!(
                "SELECT COUNT(*) {FROM_JOINED} WHERE c.code IN ({})",
                placeholders(1, cohorts.len())
            ),
            libsql::params_from_iter(code_params(cohorts)),
        )
        .await?;
    read_count(rows).await
}

pub async fn count_unsponsored_in(
    conn: &libsql::Connection,
    cohorts: &[CohortCode],
) -> Result<u64, DatabaseError> {
    if cohorts.is_empty() {
        return Ok(0);
    }
    let rows = conn
        .query(
            &format!(
                "SELECT COUNT(*) {FROM_JOINED} WHERE c.code IN ({}) AND s.sponsored = 0",
                placeholders(1, cohorts.len())
            ),
            libsql::params_from_iter(code_params(cohorts)),
        )
        .await?;
    read_count(rows).await
}

/// Flag a mentee as sponsored. Fails if they already were.
pub async fn mark_sponsored(conn: &libsql::Connection, id: &str) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE students SET sponsored = 1 WHERE id = ?1 AND sponsored = 0",
            [id],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::InvalidState(format!(
            "student {id} is missing or already sponsored"
        )));
    }
    Ok(())
}

pub async fn mark_unsponsored(conn: &libsql::Connection, id: &str) -> Result<(), DatabaseError> {
    conn.execute("UPDATE students SET sponsored = 0 WHERE id = ?1", [id])
        .await?;
    Ok(())
}

pub async fn increment_mentee_count(
    conn: &libsql::Connection,
    id: &str,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE students SET mentee_count = mentee_count + 1 WHERE id = ?1",
            [id],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::InvalidState(format!("mentor {id} not found")));
    }
    Ok(())
}

/// Decrement a mentor's count, floored at zero.
///
/// Returns `false` when the count was already zero and nothing changed.
pub async fn decrement_mentee_count(
    conn: &libsql::Connection,
    id: &str,
) -> Result<bool, DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE students SET mentee_count = mentee_count - 1
             WHERE id = ?1 AND mentee_count > 0",
            [id],
        )
        .await?;
    Ok(changed > 0)
}

async fn insert(
    conn: &libsql::Connection,
    record: &StudentRecord,
    cohort_id: &str,
) -> Result<(), DatabaseError> {
    let id = generate_id(conn, PREFIX_STUDENT).await?;
    conn.execute(
        "INSERT INTO students (id, last_name, first_name, registration_code, cohort_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            id.as_str(),
            record.last_name.as_str(),
            record.first_name.as_str(),
            record.registration_code.as_deref(),
            cohort_id
        ],
    )
    .await?;
    Ok(())
}

/// Replace every student (and every pairing) with `records`.
///
/// Rows whose cohort code is not seeded are skipped, as are rows with a blank
/// name; both are counted in the report.
pub async fn replace_all(
    conn: &libsql::Connection,
    records: &[StudentRecord],
) -> Result<ImportReport, DatabaseError> {
    conn.execute("DELETE FROM pairings", ()).await?;
    conn.execute("DELETE FROM students", ()).await?;

    let cohort_ids = cohort::ids_by_code(conn).await?;
    let mut report = ImportReport::default();

    for record in records {
        if record.last_name.trim().is_empty() || record.first_name.trim().is_empty() {
            report.skipped_incomplete += 1;
            continue;
        }
        let Some(cohort_id) = cohort_ids.get(record.cohort.trim()) else {
            tracing::debug!(cohort = %record.cohort, "skipping student with unknown cohort");
            report.skipped_unknown_cohort += 1;
            continue;
        };
        insert(conn, record, cohort_id).await?;
        report.imported += 1;
    }

    Ok(report)
}

/// Clear the ledger and every student's sponsorship state.
pub async fn reset_all(conn: &libsql::Connection) -> Result<ResetReport, DatabaseError> {
    let pairings_removed = conn.execute("DELETE FROM pairings", ()).await?;
    let students_reset = conn
        .execute("UPDATE students SET sponsored = 0, mentee_count = 0", ())
        .await?;
    Ok(ResetReport {
        pairings_removed,
        students_reset,
    })
}

impl ParrainService {
    /// Atomically discard all students and pairings, then load `records`.
    pub async fn bulk_replace(
        &self,
        records: &[StudentRecord],
    ) -> Result<ImportReport, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = replace_all(&tx, records).await;
        let report = settle(tx, result).await?;
        tracing::info!(
            imported = report.imported,
            skipped_unknown_cohort = report.skipped_unknown_cohort,
            skipped_incomplete = report.skipped_incomplete,
            "replaced student roster"
        );
        Ok(report)
    }

    /// Clear all pairings and reset every student to unsponsored with no mentees.
    pub async fn reset_sponsorship(&self) -> Result<ResetReport, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = reset_all(&tx).await;
        let report = settle(tx, result).await?;
        tracing::info!(
            pairings_removed = report.pairings_removed,
            students_reset = report.students_reset,
            "reset sponsorship"
        );
        Ok(report)
    }

    pub async fn get_student(&self, id: &str) -> Result<Student, DatabaseError> {
        get(self.db().conn(), id).await
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        list_all(self.db().conn()).await
    }

    pub async fn list_students_in(
        &self,
        cohorts: &[CohortCode],
    ) -> Result<Vec<Student>, DatabaseError> {
        list_in(self.db().conn(), cohorts).await
    }

    pub async fn list_unsponsored_in(
        &self,
        cohorts: &[CohortCode],
    ) -> Result<Vec<Student>, DatabaseError> {
        list_unsponsored_in(self.db().conn(), cohorts).await
    }

    pub async fn count_students_in(&self, cohorts: &[CohortCode]) -> Result<u64, DatabaseError> {
        count_in(self.db().conn(), cohorts).await
    }

    pub async fn count_unsponsored_in(
        &self,
        cohorts: &[CohortCode],
    ) -> Result<u64, DatabaseError> {
        count_unsponsored_in(self.db().conn(), cohorts).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PREFIX_STUDENT;
    use crate::test_support::helpers::{codes, record, seeded_service};

    #[tokio::test]
    async fn bulk_replace_skips_unknown_cohorts() {
        let svc = seeded_service(&["B1", "B2"]).await;
        let report = svc
            .bulk_replace(&[
                record("Martin", "Léa", "B1"),
                record("Durand", "Hugo", "B2"),
                record("Petit", "Noé", "L3"),
            ])
            .await
            .unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped_unknown_cohort, 1);
        assert_eq!(svc.list_students().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bulk_replace_discards_previous_roster() {
        let svc = seeded_service(&["B1"]).await;
        svc.bulk_replace(&[record("Martin", "Léa", "B1")]).await.unwrap();
        svc.bulk_replace(&[record("Durand", "Hugo", "B1")]).await.unwrap();

        let students = svc.list_students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].last_name, "Durand");
        assert!(!students[0].sponsored);
        assert_eq!(students[0].mentee_count, 0);
    }

    #[tokio::test]
    async fn bulk_replace_skips_blank_names() {
        let svc = seeded_service(&["B1"]).await;
        let report = svc
            .bulk_replace(&[record("", "Léa", "B1"), record("Durand", "  ", "B1")])
            .await
            .unwrap();
        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped_incomplete, 2);
    }

    #[tokio::test]
    async fn duplicate_registration_code_rolls_back_whole_import() {
        let svc = seeded_service(&["B1"]).await;
        svc.bulk_replace(&[record("Martin", "Léa", "B1")]).await.unwrap();

        let mut first = record("Durand", "Hugo", "B1");
        first.registration_code = Some("E123".into());
        let mut second = record("Petit", "Noé", "B1");
        second.registration_code = Some("E123".into());

        assert!(svc.bulk_replace(&[first, second]).await.is_err());

        let students = svc.list_students().await.unwrap();
        assert_eq!(students.len(), 1, "previous roster must survive");
        assert_eq!(students[0].last_name, "Martin");
    }

    #[tokio::test]
    async fn cohort_queries_filter_by_code_and_flag() {
        let svc = seeded_service(&["B1", "B2", "B3"]).await;
        svc.bulk_replace(&[
            record("A", "a", "B1"),
            record("B", "b", "B1"),
            record("C", "c", "B2"),
            record("D", "d", "B3"),
        ])
        .await
        .unwrap();

        let b1 = svc.list_students_in(&codes(&["B1"])).await.unwrap();
        let first_id = b1[0].id.clone();
        super::mark_sponsored(svc.db().conn(), &first_id).await.unwrap();

        assert_eq!(svc.count_students_in(&codes(&["B1", "B2"])).await.unwrap(), 3);
        assert_eq!(svc.count_unsponsored_in(&codes(&["B1"])).await.unwrap(), 1);
        let unsponsored = svc.list_unsponsored_in(&codes(&["B1", "B3"])).await.unwrap();
        let names: Vec<_> = unsponsored.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, vec!["B", "D"]);
        assert!(svc.list_students_in(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mark_sponsored_twice_fails() {
        let svc = seeded_service(&["B1"]).await;
        svc.bulk_replace(&[record("Martin", "Léa", "B1")]).await.unwrap();
        let id = svc.list_students().await.unwrap()[0].id.clone();

        super::mark_sponsored(svc.db().conn(), &id).await.unwrap();
        assert!(super::mark_sponsored(svc.db().conn(), &id).await.is_err());
    }

    #[tokio::test]
    async fn decrement_is_floored_at_zero() {
        let svc = seeded_service(&["B1"]).await;
        svc.bulk_replace(&[record("Martin", "Léa", "B1")]).await.unwrap();
        let id = svc.list_students().await.unwrap()[0].id.clone();

        assert!(!super::decrement_mentee_count(svc.db().conn(), &id).await.unwrap());
        assert_eq!(svc.get_student(&id).await.unwrap().mentee_count, 0);
    }

    #[tokio::test]
    async fn student_ids_are_unique_and_prefixed() {
        let svc = seeded_service(&["B1"]).await;
        svc.bulk_replace(&[record("Martin", "Léa", "B1"), record("Martin", "Léa", "B1")])
            .await
            .unwrap();

        let ids: Vec<String> = svc
            .list_students()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert!(ids.iter().all(|id| id.starts_with(&format!("{PREFIX_STUDENT}-"))));
    }
}
