use tracing::{debug, warn};

use crate::domain::entities::grid::{Cell, Sheet, Workbook};
use crate::domain::entities::record::{CanonicalField, CanonicalRecord, NormalizedBatch};
use crate::domain::entities::vendor::NamedLayout;
use crate::domain::errors::NormalizeError;
use crate::usecase::pipeline::header::promote_header;
use crate::usecase::pipeline::projector::{locate_names, project_optional};
use crate::usecase::pipeline::sanitize::clean_number_plate;

/// Exports with stable column names: columns are matched by header label, so
/// their order in the sheet does not matter. Multi-sheet layouts concatenate
/// every sheet in workbook order.
pub fn normalize_named(
    layout: &NamedLayout,
    source_tag: &str,
    workbook: &Workbook,
) -> Result<NormalizedBatch, NormalizeError> {
    let sheets: Vec<&Sheet> = if layout.all_sheets {
        workbook.sheets.iter().collect()
    } else {
        workbook.first_sheet().into_iter().collect()
    };
    if sheets.is_empty() {
        return Err(NormalizeError::malformed("workbook has no sheets"));
    }

    let names: Vec<&str> = layout.columns.iter().map(|(name, _)| *name).collect();
    let mut found = vec![false; names.len()];
    let mut projected: Vec<(&str, Vec<Vec<Cell>>)> = Vec::new();

    for sheet in sheets {
        let Some(table) = promote_header(&sheet.grid, layout.preamble_rows) else {
            warn!(sheet = %sheet.name, "sheet has no header row; skipped");
            continue;
        };
        let positions = locate_names(&table, &names);
        for (seen, position) in found.iter_mut().zip(&positions) {
            *seen |= position.is_some();
        }
        let rows: Vec<Vec<Cell>> = project_optional(&table, &positions)
            .into_iter()
            .filter(|row| !row.iter().all(Cell::is_missing))
            .collect();
        debug!(sheet = %sheet.name, rows = rows.len(), "selected named columns");
        projected.push((sheet.name.as_str(), rows));
    }

    if projected.is_empty() {
        return Ok(NormalizedBatch::default());
    }
    let missing: Vec<&str> = names
        .iter()
        .zip(&found)
        .filter(|(_, seen)| !**seen)
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(NormalizeError::malformed(format!(
            "expected columns not found in header: {}",
            missing.join(", ")
        )));
    }

    let mut batch = NormalizedBatch::default();
    for (sheet_name, rows) in projected {
        batch.sheet_rows.push((sheet_name.to_string(), rows.len()));
        for row in rows {
            let record = build_record(layout, source_tag, row, batch.records.len())?;
            batch.push(sheet_name, record);
        }
    }
    Ok(batch)
}

fn build_record(
    layout: &NamedLayout,
    source_tag: &str,
    row: Vec<Cell>,
    row_idx: usize,
) -> Result<CanonicalRecord, NormalizeError> {
    let mut record = CanonicalRecord {
        source: source_tag.to_string(),
        ..Default::default()
    };
    for ((name, field), cell) in layout.columns.iter().zip(row) {
        match field {
            CanonicalField::Date => record.date = cell,
            CanonicalField::FuelType => record.fuel_type = cell.as_text(),
            CanonicalField::Amount => {
                record.amount = cell.as_number().map_err(|value| {
                    NormalizeError::malformed(format!(
                        "row {row_idx}: column '{name}' holds non-numeric value '{value}'"
                    ))
                })?;
            }
            CanonicalField::Price => record.price = cell,
            CanonicalField::NumberPlate => record.number_plate = clean_number_plate(&cell),
            CanonicalField::CardNumber => record.card_number = cell,
            CanonicalField::StationName => record.station_name = cell,
            CanonicalField::InvoiceNumber => record.invoice_number = cell.as_text(),
            CanonicalField::PriceWithoutTax => record.price_without_tax = cell,
            CanonicalField::PriceWithTax => record.price_with_tax = cell,
            CanonicalField::Source => {}
        }
    }
    Ok(record)
}
