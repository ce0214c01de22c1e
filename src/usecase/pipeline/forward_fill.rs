//! Fuel grade recovery for statements that only print the grade on the row
//! where it changes.
//!
//! Those "introducer" rows carry the grade in the plate column and shift the
//! card column, so reconciliation happens in two independent steps:
//! [`category_sequence`] recovers a grade for every row, and
//! [`repair_introducer_rows`] puts plausible values back into the two shifted
//! cells.

use crate::domain::entities::grid::Cell;
use crate::domain::entities::table::{cell_at, Table};

fn is_category(cell: &Cell, categories: &[&str]) -> bool {
    cell.as_str()
        .map(|value| categories.contains(&value))
        .unwrap_or(false)
}

/// Grade per row, carried forward from the last introducer row. Rows before
/// the first introducer stay `None`.
pub fn category_sequence(
    table: &Table,
    col_idx: usize,
    categories: &[&str],
) -> Vec<Option<String>> {
    let mut current: Option<String> = None;
    table
        .rows
        .iter()
        .map(|row| {
            let cell = cell_at(row, col_idx);
            if is_category(cell, categories) {
                current = cell.as_str().map(str::to_string);
            }
            current.clone()
        })
        .collect()
}

/// Overwrites the category cell and its right neighbour on introducer rows
/// with the previous row's (already repaired) values. The first row has no
/// predecessor and takes the header labels of those two columns instead.
/// Returns the indices of the repaired rows, in order.
pub fn repair_introducer_rows(
    table: &mut Table,
    col_idx: usize,
    categories: &[&str],
) -> Vec<usize> {
    let next_idx = col_idx + 1;
    let header_pair = (header_cell(table, col_idx), header_cell(table, next_idx));

    let mut repaired = Vec::new();
    for row_idx in 0..table.rows.len() {
        if !is_category(cell_at(&table.rows[row_idx], col_idx), categories) {
            continue;
        }
        let (category, neighbour) = if row_idx == 0 {
            header_pair.clone()
        } else {
            let previous = &table.rows[row_idx - 1];
            (
                cell_at(previous, col_idx).clone(),
                cell_at(previous, next_idx).clone(),
            )
        };

        let row = &mut table.rows[row_idx];
        if row.len() <= next_idx {
            row.resize(next_idx + 1, Cell::Empty);
        }
        row[col_idx] = category;
        row[next_idx] = neighbour;
        repaired.push(row_idx);
    }
    repaired
}

fn header_cell(table: &Table, idx: usize) -> Cell {
    table
        .columns
        .get(idx)
        .map(|label| Cell::from(label.as_str()))
        .unwrap_or_default()
}
