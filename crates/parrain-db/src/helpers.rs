//! Row parsing and statement helpers shared by the repos.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic, the timestamp format, and
//! the transaction settle step.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Format a timestamp for storage.
///
/// Fixed-width RFC 3339 with microseconds so that lexical order on the TEXT
/// column matches chronological order.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column stored as 0/1.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_flag(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a non-negative INTEGER column as `u32`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored value is negative or too large.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw)
        .map_err(|_| DatabaseError::InvalidState(format!("count column {idx} holds {raw}")))
}

/// Read a `COUNT(*)` result from the first row.
///
/// # Errors
///
/// Returns `DatabaseError::NoResult` if the query produced no row.
pub async fn read_count(mut rows: libsql::Rows) -> Result<u64, DatabaseError> {
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let raw = row.get::<i64>(0)?;
    u64::try_from(raw).map_err(|_| DatabaseError::InvalidState(format!("negative count {raw}")))
}

/// Build `?1, ?2, ...` for an `IN (...)` list starting at placeholder `start`.
#[must_use]
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generate a prefixed ID via libSQL. Returns e.g. `"stu-a3f8b2c1d4e5"`.
///
/// Uses `randomblob(6)` in SQL to produce 12 hex chars, then prepends the prefix.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id(conn: &libsql::Connection, prefix: &str) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(6)))"),
            (),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

/// Commit `tx` if `result` is `Ok`, roll it back otherwise.
///
/// A failed commit is reported in place of the successful result; a failed
/// rollback is logged and the original error is kept.
///
/// # Errors
///
/// Returns the original error, or the commit failure converted into `E`.
pub async fn settle<T, E>(tx: libsql::Transaction, result: Result<T, E>) -> Result<T, E>
where
    E: From<DatabaseError>,
{
    match result {
        Ok(value) => {
            tx.commit().await.map_err(|e| E::from(DatabaseError::from(e)))?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(%rollback_error, "transaction rollback failed");
            }
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_sort_lexically() {
        let earlier = parse_datetime("2026-10-19T08:00:00.000009Z").unwrap();
        let later = parse_datetime("2026-10-19T08:00:00.1Z").unwrap();
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
        assert_eq!(format_timestamp(&later), "2026-10-19T08:00:00.100000Z");
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-02-09T14:30:00+00:00");
    }

    #[test]
    fn placeholder_list() {
        assert_eq!(placeholders(1, 3), "?1, ?2, ?3");
        assert_eq!(placeholders(4, 1), "?4");
        assert_eq!(placeholders(1, 0), "");
    }
}
