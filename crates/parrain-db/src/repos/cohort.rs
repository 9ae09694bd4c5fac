//! Cohort repository. Cohorts are seeded from the registry and never deleted.

use std::collections::HashMap;

use parrain_core::CohortCode;
use parrain_core::entities::Cohort;
use parrain_core::ids::PREFIX_COHORT;

use crate::error::DatabaseError;
use crate::helpers::generate_id;
use crate::service::ParrainService;

fn row_to_cohort(row: &libsql::Row) -> Result<Cohort, DatabaseError> {
    let code: String = row.get(1)?;
    Ok(Cohort {
        id: row.get(0)?,
        code: CohortCode::new(&code)
            .map_err(|e| DatabaseError::InvalidState(format!("cohort row: {e}")))?,
    })
}

/// Insert any missing cohort codes. Returns the number of new rows.
pub async fn seed(conn: &libsql::Connection, codes: &[CohortCode]) -> Result<u64, DatabaseError> {
    let mut inserted = 0;
    for code in codes {
        let id = generate_id(conn, PREFIX_COHORT).await?;
        inserted += conn
            .execute(
                "INSERT OR IGNORE INTO cohorts (id, code) VALUES (?1, ?2)",
                [id.as_str(), code.as_str()],
            )
            .await?;
    }
    Ok(inserted)
}

pub async fn list(conn: &libsql::Connection) -> Result<Vec<Cohort>, DatabaseError> {
    let mut rows = conn
        .query("SELECT id, code FROM cohorts ORDER BY rowid", ())
        .await?;
    let mut cohorts = Vec::new();
    while let Some(row) = rows.next().await? {
        cohorts.push(row_to_cohort(&row)?);
    }
    Ok(cohorts)
}

/// Map of cohort code to cohort id, for resolving feed rows.
pub async fn ids_by_code(
    conn: &libsql::Connection,
) -> Result<HashMap<String, String>, DatabaseError> {
    Ok(list(conn)
        .await?
        .into_iter()
        .map(|cohort| (cohort.code.to_string(), cohort.id))
        .collect())
}

impl ParrainService {
    pub async fn seed_cohorts(&self, codes: &[CohortCode]) -> Result<u64, DatabaseError> {
        let inserted = seed(self.db().conn(), codes).await?;
        if inserted > 0 {
            tracing::info!(inserted, "seeded cohorts");
        }
        Ok(inserted)
    }

    pub async fn list_cohorts(&self) -> Result<Vec<Cohort>, DatabaseError> {
        list(self.db().conn()).await
    }
}
