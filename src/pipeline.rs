use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::model::{DocumentWords, Matrix};
use crate::export::{ExportOptions, Format};
use crate::layout::{GapLayoutEngine, LayoutConfig, LayoutEngine};
use crate::parser::WordExtractor;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub layout: LayoutConfig,
    pub format: Format,
    pub export: ExportOptions,
}

impl PipelineConfig {
    pub fn new(layout: LayoutConfig, format: Format) -> Self {
        Self {
            layout,
            format,
            export: ExportOptions::default(),
        }
    }

    pub fn with_csv_delimiter(mut self, delimiter: u8) -> Self {
        self.export.csv_delimiter = delimiter;
        self
    }
}

/// Rows of every page, in page order, each page top to bottom.
pub fn build_matrix(document: &DocumentWords, engine: &dyn LayoutEngine) -> Matrix {
    let mut matrix = Matrix::new();
    for page in &document.pages {
        matrix.extend_rows(engine.reduce_page(page));
    }
    matrix
}

pub fn extract_matrix(
    pdf_path: &Path,
    extractor: &dyn WordExtractor,
    layout: &LayoutConfig,
) -> Result<Matrix> {
    let document = extractor.extract_words(pdf_path)?;
    let engine = GapLayoutEngine::new(*layout);
    Ok(build_matrix(&document, &engine))
}

/// Extract one document and write it to `destination`.
pub fn convert_document(
    source: &Path,
    destination: &Path,
    extractor: &dyn WordExtractor,
    config: &PipelineConfig,
) -> Result<Matrix> {
    let matrix = extract_matrix(source, extractor, &config.layout)
        .with_context(|| format!("Failed to process PDF: {}", source.display()))?;
    config
        .format
        .exporter(&config.export)
        .export(&matrix, destination)
        .with_context(|| format!("Failed to export to: {}", destination.display()))?;
    log::info!("Data successfully saved to: {}", destination.display());
    Ok(matrix)
}

/// PDF files directly inside `dir`, matched on a case-insensitive `.pdf`
/// extension and sorted by path.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// `<dest_dir>/<source stem>.<format extension>`.
pub fn destination_for(source: &Path, dest_dir: &Path, format: Format) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .with_context(|| format!("no file name in {}", source.display()))?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(format.extension());
    Ok(dest_dir.join(name))
}

#[derive(Debug)]
pub struct DocumentOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Number of rows written, or why the document failed.
    pub result: Result<usize>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Convert every PDF in `source_dir` into `dest_dir`.
///
/// A failing document is recorded and the run moves on. Only an unusable
/// destination or unreadable source directory aborts the batch.
pub fn run_batch(
    source_dir: &Path,
    dest_dir: &Path,
    extractor: &dyn WordExtractor,
    config: &PipelineConfig,
) -> Result<BatchReport> {
    let sources = discover_sources(source_dir)?;
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create output directory {}", dest_dir.display()))?;

    log::info!(
        "Found {} PDF file(s) in {}",
        sources.len(),
        source_dir.display()
    );

    let total = sources.len();
    let mut report = BatchReport::default();
    for (i, source) in sources.into_iter().enumerate() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!("[{}/{}] Currently processing: {}", i + 1, total, name);

        let destination = match destination_for(&source, dest_dir, config.format) {
            Ok(destination) => destination,
            Err(err) => {
                report.outcomes.push(DocumentOutcome {
                    source,
                    destination: dest_dir.to_path_buf(),
                    result: Err(err),
                });
                continue;
            }
        };

        let result = convert_document(&source, &destination, extractor, config)
            .map(|matrix| matrix.len());
        if let Err(err) = &result {
            log::warn!("Skipping {name}: {err:#}");
        }
        report.outcomes.push(DocumentOutcome {
            source,
            destination,
            result,
        });
    }

    Ok(report)
}
