use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::core::model::Matrix;
use crate::export::{ensure_parent, Exporter};

/// Single-sheet workbook, no header row, every cell written as a string.
#[derive(Debug, Clone, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for XlsxExporter {
    fn export(&self, matrix: &Matrix, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (row_idx, row) in matrix.rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx).context("too many rows for a worksheet")?;
            for (col_idx, cell) in row.iter().enumerate() {
                // Blank cells are the padding.
                if cell.is_empty() {
                    continue;
                }
                let col_num = u16::try_from(col_idx).context("too many columns for a worksheet")?;
                worksheet
                    .write_string(row_num, col_num, cell.as_str())
                    .with_context(|| format!("failed to write cell ({row_idx}, {col_idx})"))?;
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        Ok(())
    }
}
