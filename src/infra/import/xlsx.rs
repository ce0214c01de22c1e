use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::entities::grid::{Cell, CellGrid, Row, Sheet, Workbook};
use crate::domain::errors::NormalizeError;
use crate::usecase::ports::grid_source::GridSource;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const LEAP_BUG_SERIAL: f64 = 60.0;

/// Reads xlsx, xlsm, xls and ods uploads from memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineGridSource;

impl GridSource for CalamineGridSource {
    fn decode(&self, bytes: &[u8]) -> Result<Workbook, NormalizeError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|err| NormalizeError::DecodeFailure(err.to_string()))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name).map_err(|err| {
                NormalizeError::DecodeFailure(format!("failed to read sheet {name}: {err}"))
            })?;
            let grid = range_to_grid(&range);
            debug!(sheet = %name, rows = grid.len(), columns = grid.width(), "decoded sheet");
            sheets.push(Sheet { name, grid });
        }
        Ok(Workbook::new(sheets))
    }
}

/// Anchors the used range at A1 so row and column positions match the sheet.
fn range_to_grid(range: &Range<Data>) -> CellGrid {
    let Some((start_row, start_col)) = range.start() else {
        return CellGrid::default();
    };
    let (height, width) = range.get_size();
    let full_width = start_col as usize + width;

    let mut rows: Vec<Row> = vec![vec![Cell::Empty; full_width]; start_row as usize];
    rows.extend(range.rows().map(|r| {
        let mut row = vec![Cell::Empty; start_col as usize];
        row.extend(r.iter().map(cell_from_data));
        row
    }));
    debug_assert_eq!(rows.len(), start_row as usize + height);
    CellGrid::new(rows)
}

pub fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::String(v) => Cell::from(v.as_str()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(v) => Cell::Bool(*v),
        Data::DateTime(v) => excel_serial_to_datetime(v.as_f64())
            .map(Cell::Date)
            .unwrap_or(Cell::Number(v.as_f64())),
        Data::DateTimeIso(v) => NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S")
            .map(Cell::Date)
            .unwrap_or_else(|_| Cell::Text(v.clone())),
        Data::DurationIso(v) => Cell::Text(v.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Days since 1899-12-30, the 1900 date system's effective epoch.
///
/// The 1900 system counts a 29 February 1900 that never existed (serial 60),
/// so day serials before 61 are shifted forward a day. Serial 60 itself lands
/// on 1 March 1900. Time-only values (below 1) are left alone.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let serial = if (1.0..LEAP_BUG_SERIAL + 1.0).contains(&serial) {
        serial + 1.0
    } else {
        serial
    };
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
}
