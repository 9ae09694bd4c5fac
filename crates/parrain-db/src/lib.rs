//! # parrain-db
//!
//! libSQL store for Parrainage state.
//!
//! Holds the three relational tables behind the system: cohorts, students
//! (with their sponsorship flags), and the pairing ledger. Rows reference
//! each other by identifier only; joins happen in the repo queries.
//!
//! Mutating operations run inside `IMMEDIATE` transactions so that concurrent
//! writers serialize, and the `pairings.mentee_id` UNIQUE constraint enforces
//! the one-pairing-per-mentee invariant even under races.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};

/// Central database handle for all Parrainage state operations.
pub struct ParrainDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ParrainDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let parrain_db = Self { db, conn };
        parrain_db.run_migrations().await?;
        tracing::debug!(path, "opened parrainage database");
        Ok(parrain_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Start a write transaction.
    ///
    /// `IMMEDIATE` takes the write lock up front, so a second writer waits
    /// instead of failing at commit time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn begin_write(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Generate a prefixed ID. Returns e.g. `"bin-a3f8b2c1d4e5"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        helpers::generate_id(&self.conn, prefix).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parrain_core::ids::ALL_PREFIXES;
    use std::collections::HashSet;

    /// Helper to create an in-memory database for testing.
    async fn test_db() -> ParrainDb {
        ParrainDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        for table in &["cohorts", "students", "pairings"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        for prefix in ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            let (head, hex) = id.split_once('-').unwrap();
            assert_eq!(head, prefix);
            assert_eq!(hex.len(), 12);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..200 {
            assert!(ids.insert(db.generate_id("stu").await.unwrap()));
        }
    }

    #[tokio::test]
    async fn negative_mentee_count_is_rejected() {
        let db = test_db().await;
        db.conn()
            .execute("INSERT INTO cohorts (id, code) VALUES ('coh-1', 'B1')", ())
            .await
            .unwrap();
        let result = db
            .conn()
            .execute(
                "INSERT INTO students (id, last_name, first_name, cohort_id, mentee_count)
                 VALUES ('stu-1', 'Martin', 'Léa', 'coh-1', -1)",
                (),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rolled_back_transaction_leaves_no_trace() {
        let db = test_db().await;
        let tx = db.begin_write().await.unwrap();
        tx.execute("INSERT INTO cohorts (id, code) VALUES ('coh-1', 'B1')", ())
            .await
            .unwrap();
        let outcome: Result<(), DatabaseError> =
            helpers::settle(tx, Err(DatabaseError::InvalidState("boom".into()))).await;
        assert!(outcome.is_err());

        let rows = db
            .conn()
            .query("SELECT COUNT(*) FROM cohorts", ())
            .await
            .unwrap();
        assert_eq!(helpers::read_count(rows).await.unwrap(), 0);
    }
}
