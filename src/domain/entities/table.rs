use crate::domain::entities::grid::{Cell, Row};

/// A grid whose header row has been promoted to column labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns.iter().position(|label| label.trim() == wanted)
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

pub fn cell_at(row: &[Cell], idx: usize) -> &Cell {
    static EMPTY: Cell = Cell::Empty;
    row.get(idx).unwrap_or(&EMPTY)
}
