pub mod core;
pub mod error;
pub mod export;
pub mod layout;
pub mod parser;
pub mod pipeline;

pub use crate::core::model::{Cell, DocumentWords, Line, Matrix, PageWords, Row, Word};
pub use layout::{cluster_columns, segment_lines, LayoutConfig};
