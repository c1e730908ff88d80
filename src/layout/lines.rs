use crate::core::geometry::{reading_order, vertical_delta};
use crate::core::model::{Line, Word};

/// Group a page's words into visual lines, top to bottom.
///
/// Words are stably sorted by `(top, x0)` and swept once. A word joins the
/// current line when its `top` is within `line_threshold` (inclusive) of the
/// previously placed word's `top`. The reference rolls with every word, so a
/// long line may drift by more than `line_threshold` from end to end.
pub fn segment_lines(mut words: Vec<Word>, line_threshold: f64) -> Vec<Line> {
    words.sort_by(reading_order);

    let mut lines = Vec::new();
    let mut current = Line::default();
    let mut reference_top: Option<f64> = None;

    for word in words {
        let same_line = reference_top
            .map(|reference| vertical_delta(word.top, reference) <= line_threshold)
            .unwrap_or(true);

        if !same_line {
            lines.push(std::mem::take(&mut current));
        }
        reference_top = Some(word.top);
        current.words.push(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
