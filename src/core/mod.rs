//! Core rewriting modules
//!
//! - `span_expander`: colspan/rowspan expansion over raw table markup

pub mod span_expander;

pub use span_expander::{
    CellTag, ColExpansion, ExpanderOptions, MarkupToken, SpanExpander, SpanKind,
};
