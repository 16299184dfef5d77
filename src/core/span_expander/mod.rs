//! Span Expander
//!
//! Rewrites HTML table markup carried in raw blocks so that merged cells
//! become repeated plain cells. Renderers that ignore `colspan`/`rowspan`
//! then still see one cell per grid position.
//!
//! # Architecture
//!
//! ```text
//! raw fragment -> MarkupToken::classify -> SpanExpander state machine -> replacement fragments
//! ```
//!
//! # Example
//!
//! ```rust
//! use tablespan::{Fragment, SpanExpander};
//!
//! let mut expander = SpanExpander::new();
//! let out = expander
//!     .process(&Fragment::new("html", r#"<td colspan="2">"#))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(out, vec![Fragment::new("html", "<td>")]);
//! ```

mod expander;
mod options;
mod token;


// Re-export public API
pub use expander::{ColExpansion, SpanExpander};
pub use options::ExpanderOptions;
pub use token::{CellTag, MarkupToken, SpanKind};
