//! Ledger export as delimited CSV.

use std::path::Path;

use csv_async::AsyncWriterBuilder;
use parrain_core::entities::PairingDetail;
use parrain_db::service::ParrainService;

use crate::error::PairingError;

/// Column titles of the export file, in order.
pub const EXPORT_HEADER: [&str; 7] = [
    "Nom Parrain",
    "Prénom Parrain",
    "Promotion Parrain",
    "Nom Filleul",
    "Prénom Filleul",
    "Promotion Filleul",
    "Date",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exported pairing, mentor first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub mentor_last_name: String,
    pub mentor_first_name: String,
    pub mentor_cohort: String,
    pub mentee_last_name: String,
    pub mentee_first_name: String,
    pub mentee_cohort: String,
    pub created_at: String,
}

impl From<PairingDetail> for ExportRow {
    fn from(detail: PairingDetail) -> Self {
        Self {
            mentor_last_name: detail.mentor.last_name,
            mentor_first_name: detail.mentor.first_name,
            mentor_cohort: detail.mentor.cohort.to_string(),
            mentee_last_name: detail.mentee.last_name,
            mentee_first_name: detail.mentee.first_name,
            mentee_cohort: detail.mentee.cohort.to_string(),
            created_at: detail.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

impl ExportRow {
    fn fields(&self) -> [&str; 7] {
        [
            self.mentor_last_name.as_str(),
            self.mentor_first_name.as_str(),
            self.mentor_cohort.as_str(),
            self.mentee_last_name.as_str(),
            self.mentee_first_name.as_str(),
            self.mentee_cohort.as_str(),
            self.created_at.as_str(),
        ]
    }
}

/// Every pairing, oldest first.
///
/// # Errors
///
/// Returns `EmptyLedger` when no pairing exists.
pub async fn export_rows(svc: &ParrainService) -> Result<Vec<ExportRow>, PairingError> {
    let details = svc.list_pairings().await?;
    if details.is_empty() {
        return Err(PairingError::EmptyLedger);
    }
    Ok(details.into_iter().map(ExportRow::from).collect())
}

/// Serialize rows with a header line.
///
/// # Errors
///
/// Returns `Csv` or `Io` if the in-memory writer fails.
pub async fn to_csv(rows: &[ExportRow], delimiter: u8) -> Result<Vec<u8>, PairingError> {
    let mut writer = AsyncWriterBuilder::new()
        .delimiter(delimiter)
        .create_writer(Vec::new());
    writer.write_record(EXPORT_HEADER).await?;
    for row in rows {
        writer.write_record(row.fields()).await?;
    }
    writer
        .into_inner()
        .await
        .map_err(|e| PairingError::Io(std::io::Error::other(e.to_string())))
}

/// Export the ledger to `path`. Returns the number of rows written.
///
/// # Errors
///
/// Returns `EmptyLedger` when no pairing exists, or `Io` if the file cannot
/// be written.
pub async fn write_file(
    svc: &ParrainService,
    path: &Path,
    delimiter: u8,
) -> Result<usize, PairingError> {
    let rows = export_rows(svc).await?;
    let bytes = to_csv(&rows, delimiter).await?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    tracing::info!(rows = rows.len(), path = %path.display(), "exported pairings");
    Ok(rows.len())
}
