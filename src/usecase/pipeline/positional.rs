use tracing::debug;

use crate::domain::entities::grid::{Cell, Workbook};
use crate::domain::entities::record::{CanonicalRecord, NormalizedBatch};
use crate::domain::entities::table::cell_at;
use crate::domain::entities::vendor::{cols, PositionalLayout};
use crate::domain::errors::NormalizeError;
use crate::usecase::pipeline::forward_fill::{category_sequence, repair_introducer_rows};
use crate::usecase::pipeline::header::{drop_marked_rows, promote_header, require_key};
use crate::usecase::pipeline::projector::project_positions;
use crate::usecase::pipeline::quantity::merge_quantity;
use crate::usecase::pipeline::sanitize::clean_number_plate;

/// Statement export shared by the vendors whose sheets differ only in
/// preamble depth: fixed column positions, banner rows, and a fuel grade that
/// is printed once per block.
pub fn normalize_statement(
    layout: &PositionalLayout,
    source_tag: &str,
    workbook: &Workbook,
) -> Result<NormalizedBatch, NormalizeError> {
    let sheet = workbook
        .first_sheet()
        .ok_or_else(|| NormalizeError::malformed("workbook has no sheets"))?;

    let Some(mut table) = promote_header(&sheet.grid, layout.preamble_rows) else {
        debug!(rows = sheet.grid.len(), "grid shorter than preamble; nothing to normalize");
        return Ok(NormalizedBatch::default());
    };
    require_key(&mut table, layout.key_column)?;

    let mut table = project_positions(&table, &layout.selectors)?;
    for row in &mut table.rows {
        if !row[cols::DATE].is_missing() {
            row[cols::DATE] = Cell::Text(row[cols::DATE].to_text());
        }
    }
    drop_marked_rows(&mut table, cols::DATE, layout.section_marker);

    let categories = category_sequence(&table, layout.category_column, layout.categories);
    let repaired = repair_introducer_rows(&mut table, layout.category_column, layout.categories);
    debug!(repaired = repaired.len(), "repaired introducer rows");

    // An introducer in the first body row was rewritten with the header labels,
    // which leaves the statement's own column-label row. Nothing else is consumed.
    let label_row = repaired.first().copied().filter(|idx| *idx == 0);

    let amount_labels = (
        table.columns[cols::AMOUNT_DIESEL].clone(),
        table.columns[cols::AMOUNT_NGV].clone(),
    );
    let remaining = table
        .rows
        .into_iter()
        .zip(categories)
        .enumerate()
        .filter(|(_, (row, _))| {
            !cell_at(row, cols::DATE)
                .to_text()
                .starts_with(layout.label_row_marker)
        });

    let mut batch = NormalizedBatch::default();
    for (table_idx, (row, fuel_type)) in remaining {
        if label_row == Some(table_idx) {
            debug!(
                labels = ?row.iter().map(Cell::to_text).collect::<Vec<_>>(),
                "consumed statement label row"
            );
            continue;
        }

        let row_idx = batch.records.len();
        let merged = merge_quantity(
            row_idx,
            (&row[cols::AMOUNT_DIESEL], &amount_labels.0),
            (&row[cols::AMOUNT_NGV], &amount_labels.1),
        )?;
        if merged.overlapping {
            batch.quantity_overlaps.push(row_idx);
        }
        if repaired.binary_search(&table_idx).is_ok() {
            batch.introducer_rows.push(row_idx);
        }

        batch.push(
            &sheet.name,
            CanonicalRecord {
                date: row[cols::DATE].clone(),
                fuel_type,
                amount: Some(merged.amount),
                price: row[cols::PRICE].clone(),
                number_plate: clean_number_plate(&row[cols::NUMBER_PLATE]),
                card_number: row[cols::CARD_NUMBER].clone(),
                station_name: row[cols::STATION_NAME].clone(),
                invoice_number: row[cols::INVOICE_NUMBER].as_text(),
                price_without_tax: row[cols::PRICE_WITHOUT_TAX].clone(),
                price_with_tax: row[cols::PRICE_WITH_TAX].clone(),
                source: source_tag.to_string(),
            },
        );
    }

    batch
        .sheet_rows
        .push((sheet.name.clone(), batch.records.len()));
    Ok(batch)
}
