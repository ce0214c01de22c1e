use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;

use crate::domain::entities::vendor::Vendor;

const STDOUT_MARKER: &str = "-";

#[derive(Debug, Parser)]
#[command(
    name = "fuel-etl",
    version,
    about = "Normalize vendor fuel-card statements into one canonical CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize one exported statement
    Normalize {
        /// Vendor identifier (ptt, bangchak, caltex, pt)
        vendor: String,
        /// Spreadsheet or CSV export to read
        file: PathBuf,
        /// Output CSV path, `-` for stdout. Defaults to the exports directory
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
        format: InputFormat,
    },
    /// List supported vendor identifiers
    Vendors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Auto,
    Spreadsheet,
    Csv,
}

impl InputFormat {
    /// `Auto` picks CSV for `.csv` files and the spreadsheet reader otherwise.
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_csv = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if is_csv {
                    InputFormat::Csv
                } else {
                    InputFormat::Spreadsheet
                }
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

pub fn exports_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "fuel-etl")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join("exports"))
}

pub fn export_file_name(vendor: Vendor, now: NaiveDateTime) -> String {
    format!("{}-{}.csv", vendor.id(), now.format("%Y%m%d-%H%M%S"))
}

pub fn resolve_output(
    output: Option<&str>,
    vendor: Vendor,
    now: NaiveDateTime,
) -> Result<OutputTarget> {
    match output {
        Some(STDOUT_MARKER) => Ok(OutputTarget::Stdout),
        Some(path) => Ok(OutputTarget::File(PathBuf::from(path))),
        None => Ok(OutputTarget::File(
            exports_dir()?.join(export_file_name(vendor, now)),
        )),
    }
}
