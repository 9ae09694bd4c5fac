//! Bulk-import feed.
//!
//! The feed is a CSV file with a header row naming at least `nom`, `prenom`
//! and `promotion`; `matricule` is optional. Column order is free and extra
//! columns are ignored. Header names are trimmed, cell values are kept
//! verbatim.

use std::path::Path;

use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::StreamExt;
use parrain_core::entities::StudentRecord;
use parrain_core::responses::ImportReport;
use parrain_db::service::ParrainService;
use tokio::io::AsyncRead;

use crate::error::PairingError;

const COL_LAST_NAME: &str = "nom";
const COL_FIRST_NAME: &str = "prenom";
const COL_COHORT: &str = "promotion";
const COL_REGISTRATION: &str = "matricule";

struct Columns {
    last_name: usize,
    first_name: usize,
    cohort: usize,
    registration: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, PairingError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let required = [COL_LAST_NAME, COL_FIRST_NAME, COL_COHORT];
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|&name| position(name).is_none())
            .collect();

        match (
            position(COL_LAST_NAME),
            position(COL_FIRST_NAME),
            position(COL_COHORT),
        ) {
            (Some(last_name), Some(first_name), Some(cohort)) => Ok(Self {
                last_name,
                first_name,
                cohort,
                registration: position(COL_REGISTRATION),
            }),
            _ => Err(PairingError::Validation(format!(
                "feed must contain the columns {required:?}; missing {missing:?}"
            ))),
        }
    }

    fn record(&self, row: &StringRecord) -> StudentRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        StudentRecord {
            last_name: cell(self.last_name),
            first_name: cell(self.first_name),
            registration_code: self
                .registration
                .and_then(|idx| row.get(idx))
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string),
            cohort: cell(self.cohort),
        }
    }
}

/// Parse feed rows from any async reader.
///
/// Short rows are accepted; their missing cells read as empty and are later
/// counted as incomplete.
///
/// # Errors
///
/// Returns `Validation` if a required column is missing, or `Csv` if the
/// content cannot be parsed.
pub async fn parse_feed<R>(reader: R, delimiter: u8) -> Result<Vec<StudentRecord>, PairingError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut csv = AsyncReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::Headers)
        .flexible(true)
        .create_reader(reader);

    let columns = Columns::locate(csv.headers().await?)?;

    let mut rows = csv.records();
    let mut records = Vec::new();
    while let Some(row) = rows.next().await {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push(columns.record(&row));
    }
    Ok(records)
}

/// Read the feed file at `path`.
///
/// # Errors
///
/// Returns `FeedMissing` if the file does not exist, plus the errors of
/// [`parse_feed`].
pub async fn read_feed(path: &Path, delimiter: u8) -> Result<Vec<StudentRecord>, PairingError> {
    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PairingError::FeedMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let records = parse_feed(file, delimiter).await?;
    tracing::debug!(rows = records.len(), path = %path.display(), "read import feed");
    Ok(records)
}

/// Replace the whole roster with the feed at `path`.
///
/// The feed is read and validated before anything is touched, so a missing
/// or malformed feed leaves the store as it was.
///
/// # Errors
///
/// See [`read_feed`]; store failures surface as `Persistence`.
pub async fn import(
    svc: &ParrainService,
    path: &Path,
    delimiter: u8,
) -> Result<ImportReport, PairingError> {
    let records = read_feed(path, delimiter).await?;
    Ok(svc.bulk_replace(&records).await?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn parse(text: &str) -> Result<Vec<StudentRecord>, PairingError> {
        parse_feed(text.as_bytes(), b',').await
    }

    #[tokio::test]
    async fn columns_in_any_order() {
        let records = parse("promotion, prenom ,nom,ville\nB1,Léa,Martin,Lyon\n")
            .await
            .unwrap();
        assert_eq!(
            records,
            vec![StudentRecord {
                last_name: "Martin".into(),
                first_name: "Léa".into(),
                registration_code: None,
                cohort: "B1".into(),
            }]
        );
    }

    #[tokio::test]
    async fn optional_registration_code() {
        let records = parse("nom,prenom,promotion,matricule\nMartin,Léa,B1,E42\nDurand,Hugo,B2,\n")
            .await
            .unwrap();
        assert_eq!(records[0].registration_code.as_deref(), Some("E42"));
        assert_eq!(records[1].registration_code, None);
    }

    #[tokio::test]
    async fn missing_required_column_is_validation_error() {
        let err = parse("nom,promotion\nMartin,B1\n").await.unwrap_err();
        assert!(matches!(err, PairingError::Validation(ref msg) if msg.contains("prenom")));
    }

    #[tokio::test]
    async fn short_rows_and_blank_lines() {
        let records = parse("nom,prenom,promotion\nMartin\n,,\nDurand,Hugo,B2\n")
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name, "");
        assert_eq!(records[1].cohort, "B2");
    }

    #[tokio::test]
    async fn semicolon_delimiter() {
        let records = parse_feed("nom;prenom;promotion\nMartin;Léa;M1\n".as_bytes(), b';')
            .await
            .unwrap();
        assert_eq!(records[0].cohort, "M1");
    }

    #[tokio::test]
    async fn missing_file_is_feed_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_feed(&dir.path().join("students.csv"), b',')
            .await
            .unwrap_err();
        assert!(matches!(err, PairingError::FeedMissing(_)));
    }
}
