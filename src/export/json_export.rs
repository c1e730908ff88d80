use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::model::Matrix;
use crate::export::{ensure_parent, Exporter};

#[derive(Debug, Clone, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct JsonTable<'a> {
    rows: Vec<Vec<&'a str>>,
}

impl Exporter for JsonExporter {
    fn export(&self, matrix: &Matrix, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let table = JsonTable {
            rows: matrix.padded_rows().collect(),
        };
        let data = serde_json::to_string_pretty(&table)?;
        fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
