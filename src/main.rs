use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use fuel_etl::config::{resolve_output, Cli, Command, InputFormat, OutputTarget};
use fuel_etl::infra::export::csv::{export_records_to_csv, write_records};
use fuel_etl::infra::import::csv::CsvGridSource;
use fuel_etl::infra::import::xlsx::CalamineGridSource;
use fuel_etl::usecase::ports::grid_source::GridSource;
use fuel_etl::{NormalizeService, Vendor};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Vendors => {
            for vendor in Vendor::ALL {
                println!("{}", vendor.id());
            }
            Ok(())
        }
        Command::Normalize {
            vendor,
            file,
            output,
            format,
        } => {
            let source: Arc<dyn GridSource> = match format.resolve(&file) {
                InputFormat::Csv => Arc::new(CsvGridSource),
                _ => Arc::new(CalamineGridSource),
            };
            let service = NormalizeService::new(source)?;

            let vendor_kind: Vendor = vendor.parse()?;
            let bytes = std::fs::read(&file)
                .with_context(|| format!("failed to read: {}", file.display()))?;
            let batch = service
                .normalize_bytes(&vendor, &bytes)
                .with_context(|| format!("failed to normalize {}", file.display()))?;

            for (sheet, rows) in &batch.sheet_rows {
                info!(sheet = %sheet, rows, "sheet of origin");
            }
            if !batch.quantity_overlaps.is_empty() {
                warn!(
                    rows = ?batch.quantity_overlaps,
                    "rows with both quantity columns populated were summed"
                );
            }
            if !batch.introducer_rows.is_empty() {
                info!(
                    rows = ?batch.introducer_rows,
                    "grade introducer rows kept with zero amount"
                );
            }

            match resolve_output(output.as_deref(), vendor_kind, Local::now().naive_local())? {
                OutputTarget::Stdout => {
                    write_records(io::stdout().lock(), &batch.records)?;
                }
                OutputTarget::File(path) => {
                    let written = export_records_to_csv(&path, &batch.records)?;
                    info!(records = written, path = %path.display(), "wrote canonical csv");
                }
            }
            Ok(())
        }
    }
}
