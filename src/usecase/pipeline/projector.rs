use crate::domain::entities::grid::Cell;
use crate::domain::entities::table::{cell_at, Table};
use crate::domain::errors::NormalizeError;

/// Keeps the columns at `selectors`, in selector order. A position may be
/// listed twice when one source column feeds two fields.
pub fn project_positions(table: &Table, selectors: &[usize]) -> Result<Table, NormalizeError> {
    if let Some(missing) = selectors.iter().find(|idx| **idx >= table.width()) {
        return Err(NormalizeError::malformed(format!(
            "column position {missing} requested but the header has {} columns",
            table.width()
        )));
    }

    let columns = selectors
        .iter()
        .map(|idx| table.columns[*idx].clone())
        .collect();
    let rows = table
        .rows
        .iter()
        .map(|row| selectors.iter().map(|idx| cell_at(row, *idx).clone()).collect())
        .collect();

    Ok(Table::new(columns, rows))
}

/// Looks up each header name; `None` where the table lacks that column.
pub fn locate_names(table: &Table, names: &[&str]) -> Vec<Option<usize>> {
    names.iter().map(|name| table.column_index(name)).collect()
}

/// Like [`project_positions`], but a `None` position yields a missing cell.
pub fn project_optional(table: &Table, positions: &[Option<usize>]) -> Vec<Vec<Cell>> {
    table
        .rows
        .iter()
        .map(|row| {
            positions
                .iter()
                .map(|idx| idx.map(|idx| cell_at(row, idx).clone()).unwrap_or_default())
                .collect()
        })
        .collect()
}
