//! Service layer wrapping the store.
//!
//! `ParrainService` is the explicit store handle passed into every engine and
//! reporting operation. Repo methods are implemented as `impl ParrainService`
//! blocks in `repos/`; the transaction-scoped building blocks they use are
//! free functions taking a `libsql::Connection` so that they compose inside a
//! caller's transaction.

use crate::ParrainDb;
use crate::error::DatabaseError;

pub struct ParrainService {
    db: ParrainDb,
}

impl ParrainService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ParrainDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ParrainDb {
        &self.db
    }
}
