use std::cmp::Ordering;

use crate::core::model::Word;

/// Top-to-bottom, then left-to-right.
pub fn reading_order(a: &Word, b: &Word) -> Ordering {
    a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0))
}

pub fn horizontal_order(a: &Word, b: &Word) -> Ordering {
    a.x0.total_cmp(&b.x0)
}

/// Absolute vertical distance between two `top` values.
pub fn vertical_delta(top: f64, reference_top: f64) -> f64 {
    (top - reference_top).abs()
}

/// Signed horizontal gap between the end of one word and the start of the next.
/// Negative when the boxes overlap.
pub fn horizontal_gap(prev_x1: f64, x0: f64) -> f64 {
    x0 - prev_x1
}
