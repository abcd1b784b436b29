//! CSV decoding for the upload path.
//!
//! An uploaded payload becomes a [`Dataset`]: a destination table name
//! derived from the file name, the header row as column names, and every
//! data row as text values. The storage layer consumes the dataset whole.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file content is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV header row has no usable column names")]
    EmptyHeader,
    #[error("cannot derive a table name from file name '{0}'")]
    BadTableName(String),
}

/// Parsed form of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Destination table name, derived from the file name
    pub table: String,
    /// Column names from the header row, in file order
    pub columns: Vec<String>,
    /// Data rows; every row has exactly `columns.len()` fields
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Decode an uploaded payload as UTF-8 CSV.
    ///
    /// Ragged rows (field count differing from the header) are rejected,
    /// as is content with no header row. A file with a header but no data
    /// rows is valid and produces an empty table.
    pub fn parse(file_name: &str, content: &[u8]) -> Result<Self, IngestError> {
        let table = table_name(file_name)?;
        let text = std::str::from_utf8(content)?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(false)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(IngestError::EmptyHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Dataset {
            table,
            columns,
            rows,
        })
    }
}

/// Derive the destination table name: everything before the first `.`.
///
/// `readings.csv` becomes `readings`, `a.b.csv` becomes `a`, and a name
/// with no dot is used as-is.
pub fn table_name(file_name: &str) -> Result<String, IngestError> {
    let stem = file_name.split('.').next().unwrap_or("");
    if stem.is_empty() {
        return Err(IngestError::BadTableName(file_name.to_string()));
    }
    Ok(stem.to_string())
}
