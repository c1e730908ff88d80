use serde::{Deserialize, Serialize};

/// A single token with its bounding box in page coordinates.
///
/// `top` grows downwards: smaller values are higher on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

impl Word {
    pub fn new(text: impl Into<String>, x0: f64, x1: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            bottom: None,
        }
    }

    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }
}

/// Words judged to share a visual row, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub words: Vec<Word>,
}

impl Line {
    pub fn first(&self) -> Option<&Word> {
        self.words.first()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Joined text of one or more horizontally adjacent words.
pub type Cell = String;

/// Cells of one line, left to right.
pub type Row = Vec<Cell>;

/// Rows across a whole document: page order, then top-to-bottom.
///
/// Rows may differ in length; padding is the writer's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: Vec<Row>,
}

impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn extend_rows(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows extended with empty cells up to the widest row.
    pub fn padded_rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        let width = self.width();
        self.rows.iter().map(move |row| {
            let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
            cells.resize(width, "");
            cells
        })
    }
}

impl From<Vec<Row>> for Matrix {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Words extracted from one page, in whatever order the extractor produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageWords {
    pub page_idx: usize,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub words: Vec<Word>,
}

impl PageWords {
    pub fn new(page_idx: usize, words: Vec<Word>) -> Self {
        Self {
            page_idx,
            width: 0.0,
            height: 0.0,
            words,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentWords {
    pub pages: Vec<PageWords>,
}

impl DocumentWords {
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|page| page.words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pads_ragged_rows_to_widest() {
        let matrix = Matrix::from(vec![
            vec!["a".to_string()],
            vec!["b".to_string(), "c".to_string(), "d".to_string()],
            vec![],
        ]);

        assert_eq!(matrix.width(), 3);
        let padded: Vec<Vec<&str>> = matrix.padded_rows().collect();
        assert_eq!(
            padded,
            vec![vec!["a", "", ""], vec!["b", "c", "d"], vec!["", "", ""]]
        );
        // The matrix itself stays ragged.
        assert_eq!(matrix.rows[0].len(), 1);
    }

    #[test]
    fn word_serializes_without_missing_bottom() {
        let json = serde_json::to_string(&Word::new("A", 0.0, 10.0, 0.0)).unwrap();
        assert_eq!(json, r#"{"text":"A","x0":0.0,"x1":10.0,"top":0.0}"#);
    }
}
