use tracing::debug;

use crate::domain::entities::grid::CellGrid;
use crate::domain::entities::table::{cell_at, Table};
use crate::domain::errors::NormalizeError;

/// Skips `preamble_rows`, promotes the next row to column labels and keeps
/// everything below it as data. `None` when the grid has no header row.
pub fn promote_header(grid: &CellGrid, preamble_rows: usize) -> Option<Table> {
    let mut rows = grid.rows().iter().skip(preamble_rows);
    let header = rows.next()?;
    let mut columns: Vec<String> = header.iter().map(|cell| cell.to_text()).collect();
    let width = columns.len().max(grid.width());
    columns.resize(width, String::new());

    let data = rows
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, Default::default());
            row
        })
        .collect::<Vec<_>>();

    debug!(preamble_rows, columns = width, rows = data.len(), "promoted header row");
    Some(Table::new(columns, data))
}

/// Drops rows whose `key_column` cell is missing. The column must exist.
pub fn require_key(table: &mut Table, key_column: &str) -> Result<(), NormalizeError> {
    let key_idx = table.column_index(key_column).ok_or_else(|| {
        NormalizeError::malformed(format!("expected column '{key_column}' not found in header"))
    })?;

    let before = table.rows.len();
    table.retain_rows(|row| !cell_at(row, key_idx).is_missing());
    debug!(key_column, dropped = before - table.rows.len(), "dropped rows without key");
    Ok(())
}

/// Drops banner rows whose `col_idx` cell, read as text, starts with `marker`.
pub fn drop_marked_rows(table: &mut Table, col_idx: usize, marker: &str) -> usize {
    let before = table.rows.len();
    table.retain_rows(|row| !cell_at(row, col_idx).to_text().starts_with(marker));
    let dropped = before - table.rows.len();
    debug!(marker, dropped, "dropped marker rows");
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::grid::Cell;

    fn row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from(*v)).collect()
    }

    #[test]
    fn header_follows_preamble() {
        let grid = CellGrid::new(vec![
            row(&["Report"]),
            row(&["generated today"]),
            row(&["Date", "Card no."]),
            row(&["2024-01-01", "111"]),
        ]);

        let table = promote_header(&grid, 2).expect("header should exist");

        assert_eq!(table.columns, vec!["Date", "Card no."]);
        assert_eq!(table.rows, vec![row(&["2024-01-01", "111"])]);
    }

    #[test]
    fn short_grid_has_no_header() {
        let grid = CellGrid::new(vec![row(&["a"]), row(&["b"])]);

        assert!(promote_header(&grid, 2).is_none());
        assert!(promote_header(&grid, 1).is_some_and(|t| t.rows.is_empty()));
    }

    #[test]
    fn ragged_rows_are_padded_to_grid_width() {
        let grid = CellGrid::new(vec![row(&["A"]), row(&["1", "2", "3"])]);

        let table = promote_header(&grid, 0).expect("header should exist");

        assert_eq!(table.columns, vec!["A", "", ""]);
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn rows_without_key_are_dropped() {
        let mut table = Table::new(
            vec!["Date".to_string(), "Card no.".to_string()],
            vec![row(&["d1", "111"]), row(&["d2", ""]), row(&["d3", "333"])],
        );

        require_key(&mut table, "Card no.").expect("key column exists");

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], Cell::text("d3"));
    }

    #[test]
    fn missing_key_column_is_malformed() {
        let mut table = Table::new(vec!["Date".to_string()], vec![row(&["d1"])]);

        let err = require_key(&mut table, "Card no.").expect_err("key column is absent");

        assert!(matches!(err, NormalizeError::MalformedInput(_)));
    }

    #[test]
    fn banner_rows_are_dropped() {
        let mut table = Table::new(
            vec!["Date".to_string()],
            vec![row(&["Department: Fleet"]), row(&["2024-01-01"]), row(&[""])],
        );

        let dropped = drop_marked_rows(&mut table, 0, "Department:");

        assert_eq!(dropped, 1);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], Cell::text("2024-01-01"));
    }
}
