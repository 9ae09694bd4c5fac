//! Pairing ledger repository.
//!
//! Pairings are append-only except for `revert` (undo) and the bulk clears
//! done by import and reset. Every ledger write also updates the two students
//! it touches, so callers are expected to run these inside one transaction.

use chrono::{DateTime, Utc};
use parrain_core::CohortCode;
use parrain_core::entities::{Pairing, PairingDetail, StudentSummary};
use parrain_core::ids::PREFIX_PAIRING;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, generate_id, parse_datetime, read_count};
use crate::repos::student;
use crate::service::ParrainService;

const DETAIL_QUERY: &str = "SELECT p.id, p.created_at,
        e.id, e.last_name, e.first_name, ec.code,
        m.id, m.last_name, m.first_name, mc.code
    FROM pairings p
    JOIN students e ON e.id = p.mentee_id
    JOIN cohorts ec ON ec.id = e.cohort_id
    JOIN students m ON m.id = p.mentor_id
    JOIN cohorts mc ON mc.id = m.cohort_id";

fn row_to_pairing(row: &libsql::Row) -> Result<Pairing, DatabaseError> {
    let created_at: String = row.get(3)?;
    Ok(Pairing {
        id: row.get(0)?,
        mentee_id: row.get(1)?,
        mentor_id: row.get(2)?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn summary_at(row: &libsql::Row, start: i32) -> Result<StudentSummary, DatabaseError> {
    let code: String = row.get(start + 3)?;
    Ok(StudentSummary {
        id: row.get(start)?,
        last_name: row.get(start + 1)?,
        first_name: row.get(start + 2)?,
        cohort: CohortCode::new(&code)
            .map_err(|e| DatabaseError::InvalidState(format!("pairing cohort: {e}")))?,
    })
}

fn row_to_detail(row: &libsql::Row) -> Result<PairingDetail, DatabaseError> {
    let created_at: String = row.get(1)?;
    Ok(PairingDetail {
        id: row.get(0)?,
        created_at: parse_datetime(&created_at)?,
        mentee: summary_at(row, 2)?,
        mentor: summary_at(row, 6)?,
    })
}

/// Append a pairing and update both students.
///
/// Fails with `InvalidState` if the mentee is already sponsored; the
/// `mentee_id` UNIQUE constraint backs this up at the schema level.
pub async fn record(
    conn: &libsql::Connection,
    mentee_id: &str,
    mentor_id: &str,
    created_at: DateTime<Utc>,
) -> Result<Pairing, DatabaseError> {
    if mentee_id == mentor_id {
        return Err(DatabaseError::InvalidState(format!(
            "student {mentee_id} cannot sponsor themselves"
        )));
    }
    student::mark_sponsored(conn, mentee_id).await?;
    student::increment_mentee_count(conn, mentor_id).await?;

    let id = generate_id(conn, PREFIX_PAIRING).await?;
    let stamp = format_timestamp(&created_at);
    conn.execute(
        "INSERT INTO pairings (id, mentee_id, mentor_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        [id.as_str(), mentee_id, mentor_id, stamp.as_str()],
    )
    .await?;

    Ok(Pairing {
        id,
        mentee_id: mentee_id.to_string(),
        mentor_id: mentor_id.to_string(),
        created_at: parse_datetime(&stamp)?,
    })
}

/// Most recently created pairing, ties broken by insertion order.
pub async fn latest(conn: &libsql::Connection) -> Result<Option<Pairing>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, mentee_id, mentor_id, created_at FROM pairings
             ORDER BY created_at DESC, rowid DESC LIMIT 1",
            (),
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_pairing(&row)?)),
        None => Ok(None),
    }
}

/// Delete a pairing and restore both students.
///
/// Returns `false` if the mentor's count was already zero, in which case it
/// is left at zero.
pub async fn revert(conn: &libsql::Connection, pairing: &Pairing) -> Result<bool, DatabaseError> {
    let deleted = conn
        .execute("DELETE FROM pairings WHERE id = ?1", [pairing.id.as_str()])
        .await?;
    if deleted == 0 {
        return Err(DatabaseError::InvalidState(format!(
            "pairing {} vanished before it could be reverted",
            pairing.id
        )));
    }
    student::mark_unsponsored(conn, &pairing.mentee_id).await?;
    student::decrement_mentee_count(conn, &pairing.mentor_id).await
}

pub async fn detail(conn: &libsql::Connection, id: &str) -> Result<PairingDetail, DatabaseError> {
    let mut rows = conn
        .query(&format!("{DETAIL_QUERY} WHERE p.id = ?1"), [id])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    row_to_detail(&row)
}

/// Every pairing with display data, oldest first.
pub async fn list_details(conn: &libsql::Connection) -> Result<Vec<PairingDetail>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("{DETAIL_QUERY} ORDER BY p.created_at, p.rowid"),
            (),
        )
        .await?;
    let mut details = Vec::new();
    while let Some(row) = rows.next().await? {
        details.push(row_to_detail(&row)?);
    }
    Ok(details)
}

pub async fn count(conn: &libsql::Connection) -> Result<u64, DatabaseError> {
    let rows = conn.query("SELECT COUNT(*) FROM pairings", ()).await?;
    read_count(rows).await
}

impl ParrainService {
    pub async fn latest_pairing(&self) -> Result<Option<Pairing>, DatabaseError> {
        latest(self.db().conn()).await
    }

    pub async fn pairing_detail(&self, id: &str) -> Result<PairingDetail, DatabaseError> {
        detail(self.db().conn(), id).await
    }

    pub async fn list_pairings(&self) -> Result<Vec<PairingDetail>, DatabaseError> {
        list_details(self.db().conn()).await
    }

    pub async fn count_pairings(&self) -> Result<u64, DatabaseError> {
        count(self.db().conn()).await
    }
}
