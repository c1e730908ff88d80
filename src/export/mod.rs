pub mod csv_export;
pub mod json_export;
pub mod xlsx_export;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::model::Matrix;

pub use csv_export::CsvExporter;
pub use json_export::JsonExporter;
pub use xlsx_export::XlsxExporter;

/// Persists a matrix as a rectangular table at `path`.
///
/// Rows shorter than the widest row are padded with empty cells.
pub trait Exporter {
    fn export(&self, matrix: &Matrix, path: &Path) -> Result<()>;
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Xlsx,
    Csv,
    Json,
}

/// Writer settings that only some formats use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub csv_delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { csv_delimiter: b',' }
    }
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Xlsx => "xlsx",
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }

    pub fn exporter(self, options: &ExportOptions) -> Box<dyn Exporter> {
        match self {
            Format::Xlsx => Box::new(XlsxExporter::new()),
            Format::Csv => Box::new(CsvExporter::new().with_delimiter(options.csv_delimiter)),
            Format::Json => Box::new(JsonExporter::new()),
        }
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}
