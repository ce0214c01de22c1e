use std::sync::Arc;

use tracing::info;

use crate::domain::entities::grid::Workbook;
use crate::domain::entities::record::{CanonicalRecord, NormalizedBatch};
use crate::domain::entities::vendor::{validate_layouts, Vendor, VendorLayout};
use crate::domain::errors::{LayoutError, NormalizeError};
use crate::usecase::pipeline::named::normalize_named;
use crate::usecase::pipeline::positional::normalize_statement;
use crate::usecase::ports::grid_source::GridSource;

/// Runs the pipeline registered for `vendor` over an already decoded workbook.
pub fn normalize_vendor(
    vendor: Vendor,
    workbook: &Workbook,
) -> Result<NormalizedBatch, NormalizeError> {
    let batch = match vendor.layout() {
        VendorLayout::Positional(layout) => {
            normalize_statement(&layout, vendor.source_tag(), workbook)?
        }
        VendorLayout::Named(layout) => normalize_named(&layout, vendor.source_tag(), workbook)?,
    };
    info!(
        %vendor,
        records = batch.records.len(),
        quantity_overlaps = batch.quantity_overlaps.len(),
        "normalized workbook"
    );
    Ok(batch)
}

pub fn normalize_report(
    vendor_id: &str,
    workbook: &Workbook,
) -> Result<NormalizedBatch, NormalizeError> {
    let vendor: Vendor = vendor_id.parse()?;
    normalize_vendor(vendor, workbook)
}

/// Canonical records for `vendor_id` (case-insensitive), or nothing at all.
pub fn normalize(
    vendor_id: &str,
    workbook: &Workbook,
) -> Result<Vec<CanonicalRecord>, NormalizeError> {
    normalize_report(vendor_id, workbook).map(|batch| batch.records)
}

pub struct NormalizeService {
    source: Arc<dyn GridSource>,
}

impl NormalizeService {
    /// Checks the vendor descriptors once, before any upload is handled.
    pub fn new(source: Arc<dyn GridSource>) -> Result<Self, LayoutError> {
        validate_layouts()?;
        Ok(Self { source })
    }

    pub fn normalize_bytes(
        &self,
        vendor_id: &str,
        bytes: &[u8],
    ) -> Result<NormalizedBatch, NormalizeError> {
        let vendor: Vendor = vendor_id.parse()?;
        let workbook = self.source.decode(bytes)?;
        normalize_vendor(vendor, &workbook)
    }
}
