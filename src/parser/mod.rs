pub mod pdf_reader;
pub mod word_extractor;

pub use pdf_reader::PdfReader;
pub use word_extractor::{parse_bbox_xhtml, PopplerWordExtractor};

use anyhow::Result;
use std::path::Path;

use crate::core::model::DocumentWords;

/// Source of positioned words for every page of a document.
///
/// Implementations may return words in any order; layout sorts them itself.
pub trait WordExtractor {
    fn extract_words(&self, pdf_path: &Path) -> Result<DocumentWords>;
}
