//! `TablePreviewer` for comma-separated files.

use std::collections::BTreeMap;

use crate::domain::TablePreview;
use crate::domain::ports::{TablePreviewError, TablePreviewer};

/// Reads the header row and the first few records with the `csv` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTablePreviewer;

impl TablePreviewer for CsvTablePreviewer {
    fn preview(&self, bytes: &[u8], max_rows: usize) -> Result<TablePreview, TablePreviewError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);
        let columns: Vec<String> = reader
            .headers()
            .map_err(|err| TablePreviewError::malformed(err.to_string()))?
            .iter()
            .map(str::to_owned)
            .collect();
        if columns.iter().all(String::is_empty) {
            return Err(TablePreviewError::malformed("missing header row"));
        }

        let mut rows = Vec::with_capacity(max_rows);
        for record in reader.records().take(max_rows) {
            let record = record.map_err(|err| TablePreviewError::malformed(err.to_string()))?;
            let row: BTreeMap<String, String> = columns
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_owned))
                .collect();
            rows.push(row);
        }
        Ok(TablePreview { columns, rows })
    }
}
