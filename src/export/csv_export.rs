use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::core::model::Matrix;
use crate::export::{ensure_parent, Exporter};

#[derive(Debug, Clone)]
pub struct CsvExporter {
    delimiter: u8,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Exporter for CsvExporter {
    fn export(&self, matrix: &Matrix, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        for row in matrix.padded_rows() {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
