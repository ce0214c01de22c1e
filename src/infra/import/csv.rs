use tracing::debug;

use crate::domain::entities::grid::{Cell, CellGrid, Workbook};
use crate::domain::errors::NormalizeError;
use crate::usecase::ports::grid_source::GridSource;

pub const CSV_SHEET_NAME: &str = "csv";

/// Plain CSV exports. Every line is a grid row, the preamble included, so
/// the reader treats no line as a header and tolerates ragged rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvGridSource;

impl GridSource for CsvGridSource {
    fn decode(&self, bytes: &[u8]) -> Result<Workbook, NormalizeError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(|err| {
                NormalizeError::DecodeFailure(format!("failed to parse csv row {row_idx}: {err}"))
            })?;
            rows.push(record.iter().map(Cell::from).collect());
        }

        let grid = CellGrid::new(rows);
        debug!(rows = grid.len(), columns = grid.width(), "decoded csv");
        Ok(Workbook::single(CSV_SHEET_NAME, grid))
    }
}
