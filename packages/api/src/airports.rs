//! Airport reference data
//!
//! The airports file is a CSV with at least the `AirportID` and `AirportName`
//! columns. It is re-read on every call and any bad row fails the whole load.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ID_COLUMN: &str = "AirportID";
pub const NAME_COLUMN: &str = "AirportName";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read airports file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed airports csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column {0}")]
    MissingColumn(&'static str),
    #[error("invalid AirportID {value:?} on line {line}")]
    InvalidId { line: u64, value: String },
    #[error("row on line {line} has no {column} field")]
    MissingField { line: u64, column: &'static str },
}

#[derive(Debug, Clone)]
pub struct AirportRepository {
    path: PathBuf,
}

impl AirportRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All airports, sorted by name.
    pub async fn list_all(&self) -> Result<Vec<Airport>, LoadError> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_airports(&bytes)
    }
}

pub fn parse_airports(bytes: &[u8]) -> Result<Vec<Airport>, LoadError> {
    // Rows may carry trailing extra fields; short rows are caught per field.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let id_idx = column_index(&headers, ID_COLUMN)?;
    let name_idx = column_index(&headers, NAME_COLUMN)?;

    let mut airports = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |idx: usize, column: &'static str| {
            record
                .get(idx)
                .ok_or(LoadError::MissingField { line, column })
        };

        let raw_id = field(id_idx, ID_COLUMN)?;
        let id = raw_id
            .trim()
            .parse::<i64>()
            .map_err(|_| LoadError::InvalidId {
                line,
                value: raw_id.to_string(),
            })?;

        airports.push(Airport {
            id,
            name: field(name_idx, NAME_COLUMN)?.to_string(),
        });
    }

    // Stable, so airports sharing a name keep file order.
    airports.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(airports)
}

fn column_index(headers: &csv::StringRecord, column: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or(LoadError::MissingColumn(column))
}
