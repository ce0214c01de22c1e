use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::record::{canonical_headers, CanonicalRecord};

pub fn write_records<W: Write>(writer: W, records: &[CanonicalRecord]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(canonical_headers())
        .context("failed to write csv header")?;
    for record in records {
        writer
            .write_record(record.to_row())
            .context("failed to write csv record")?;
    }
    writer.flush().context("failed to flush csv output")?;
    Ok(records.len())
}

pub fn export_records_to_csv(csv_path: &Path, records: &[CanonicalRecord]) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }
    let file = File::create(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    write_records(file, records)
}
