use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};

use crate::error::ExtractError;

#[derive(Debug, Clone)]
pub struct PdfReader {
    path: PathBuf,
}

impl PdfReader {
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("not a file: {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn page_count(&self) -> Result<usize> {
        let output = Command::new("pdfinfo")
            .arg(&self.path)
            .output()
            .map_err(|source| ExtractError::Spawn {
                tool: "pdfinfo",
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::ToolFailed {
                tool: "pdfinfo",
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
            .with_context(|| format!("failed to read {}", self.path.display()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_page_count(&stdout)
            .with_context(|| format!("no page count for {}", self.path.display()))
    }
}

pub fn parse_page_count(pdfinfo_output: &str) -> Result<usize, ExtractError> {
    pdfinfo_output
        .lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|rest| rest.trim().parse().ok())
        .ok_or(ExtractError::PageCount)
}
