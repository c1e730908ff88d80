use crate::core::geometry::{horizontal_gap, horizontal_order};
use crate::core::model::{Cell, Word};

/// Split one line's words into cells, left to right.
///
/// Words are stably sorted by `x0` regardless of input order. A gap strictly
/// wider than `column_spacing` between the previous word's `x1` and the next
/// word's `x0` starts a new cell; words within a cell are joined by a single
/// space. Overlapping boxes never split.
pub fn cluster_columns(words: &[Word], column_spacing: f64) -> Vec<Cell> {
    let mut ordered: Vec<&Word> = words.iter().collect();
    ordered.sort_by(|a, b| horizontal_order(a, b));

    let mut cells = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut prev_x1: Option<f64> = None;

    for word in ordered {
        if let Some(x1) = prev_x1 {
            if horizontal_gap(x1, word.x0) > column_spacing {
                cells.push(current.join(" "));
                current.clear();
            }
        }
        current.push(&word.text);
        prev_x1 = Some(word.x1);
    }

    if !current.is_empty() {
        cells.push(current.join(" "));
    }

    cells
}
