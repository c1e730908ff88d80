pub mod columns;
pub mod lines;

pub use columns::cluster_columns;
pub use lines::segment_lines;

use serde::{Deserialize, Serialize};

use crate::core::model::{PageWords, Row};

pub const DEFAULT_LINE_THRESHOLD: f64 = 3.0;
pub const DEFAULT_COLUMN_SPACING: f64 = 5.0;

/// Geometric thresholds, in the same units as the word coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Largest `top` delta between consecutive words on the same line.
    #[serde(default = "default_line_threshold")]
    pub line_threshold: f64,
    /// Largest horizontal gap between consecutive words in the same cell.
    #[serde(default = "default_column_spacing")]
    pub column_spacing: f64,
}

fn default_line_threshold() -> f64 {
    DEFAULT_LINE_THRESHOLD
}

fn default_column_spacing() -> f64 {
    DEFAULT_COLUMN_SPACING
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_threshold: DEFAULT_LINE_THRESHOLD,
            column_spacing: DEFAULT_COLUMN_SPACING,
        }
    }
}

impl LayoutConfig {
    pub fn new(line_threshold: f64, column_spacing: f64) -> Self {
        Self {
            line_threshold,
            column_spacing,
        }
    }

    pub fn with_column_spacing(mut self, column_spacing: f64) -> Self {
        self.column_spacing = column_spacing;
        self
    }
}

pub trait LayoutEngine {
    fn reduce_page(&self, page: &PageWords) -> Vec<Row>;
}

/// Lines by rolling vertical delta, cells by horizontal gap.
#[derive(Debug, Clone, Default)]
pub struct GapLayoutEngine {
    config: LayoutConfig,
}

impl GapLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
}

impl LayoutEngine for GapLayoutEngine {
    fn reduce_page(&self, page: &PageWords) -> Vec<Row> {
        let lines = segment_lines(page.words.clone(), self.config.line_threshold);
        let rows: Vec<Row> = lines
            .iter()
            .map(|line| cluster_columns(&line.words, self.config.column_spacing))
            .collect();

        log::debug!(
            "page {}: {} words, {} lines",
            page.page_idx + 1,
            page.words.len(),
            rows.len()
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Word;
    use pretty_assertions::assert_eq;

    #[test]
    fn reduces_page_into_ragged_rows() {
        let page = PageWords::new(
            0,
            vec![
                Word::new("Qty", 200.0, 220.0, 10.0),
                Word::new("Item", 10.0, 30.0, 10.5),
                Word::new("Apples", 10.0, 45.0, 30.0),
                Word::new("12", 205.0, 215.0, 31.0),
                Word::new("note", 10.0, 30.0, 50.0),
            ],
        );

        let rows = GapLayoutEngine::default().reduce_page(&page);
        assert_eq!(
            rows,
            vec![
                vec!["Item".to_string(), "Qty".to_string()],
                vec!["Apples".to_string(), "12".to_string()],
                vec!["note".to_string()],
            ]
        );
    }

    #[test]
    fn empty_page_contributes_no_rows() {
        let rows = GapLayoutEngine::default().reduce_page(&PageWords::new(3, Vec::new()));
        assert!(rows.is_empty());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"column_spacing": 1.5}"#).unwrap();
        assert_eq!(config, LayoutConfig::new(3.0, 1.5));
    }

    #[test]
    fn thresholds_change_grouping() {
        let page = PageWords::new(
            0,
            vec![Word::new("A", 0.0, 10.0, 0.0), Word::new("B", 12.0, 20.0, 0.0)],
        );
        let merged = GapLayoutEngine::default().reduce_page(&page);
        let split = GapLayoutEngine::new(LayoutConfig::default().with_column_spacing(1.0))
            .reduce_page(&page);

        assert_eq!(merged, vec![vec!["A B".to_string()]]);
        assert_eq!(split, vec![vec!["A".to_string(), "B".to_string()]]);
    }
}
