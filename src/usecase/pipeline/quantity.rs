use tracing::warn;

use crate::domain::entities::grid::Cell;
use crate::domain::errors::NormalizeError;

#[derive(Debug, Clone, PartialEq)]
pub struct MergedQuantity {
    pub amount: f64,
    /// Both source columns carried a value; they are summed anyway.
    pub overlapping: bool,
}

fn read_quantity(cell: &Cell, row_idx: usize, label: &str) -> Result<Option<f64>, NormalizeError> {
    cell.as_number().map_err(|value| {
        NormalizeError::malformed(format!(
            "row {row_idx}: quantity column '{label}' holds non-numeric value '{value}'"
        ))
    })
}

/// Sums two per-grade quantity cells, treating missing as zero.
pub fn merge_quantity(
    row_idx: usize,
    (first, first_label): (&Cell, &str),
    (second, second_label): (&Cell, &str),
) -> Result<MergedQuantity, NormalizeError> {
    let a = read_quantity(first, row_idx, first_label)?;
    let b = read_quantity(second, row_idx, second_label)?;
    let overlapping = a.is_some() && b.is_some();
    if overlapping {
        warn!(
            row_idx,
            first = a.unwrap_or_default(),
            second = b.unwrap_or_default(),
            "both quantity columns populated; summing"
        );
    }
    Ok(MergedQuantity {
        amount: a.unwrap_or(0.0) + b.unwrap_or(0.0),
        overlapping,
    })
}
