//! # tablespan
//!
//! Pandoc filter that flattens merged HTML table cells.
//!
//! Some output formats drop `colspan` and `rowspan` when they render raw
//! HTML tables. `tablespan` rewrites the table's raw markup blocks so that
//! every merged cell is followed by, or leaves behind, the empty plain cells
//! it covered. The rendered table keeps its shape without any span support.
//!
//! ## Usage Examples
//!
//! ### Fragment stream
//!
//! ```rust
//! use tablespan::{expand_fragments, Fragment};
//!
//! let input: Vec<Fragment> = ["<tr>", r#"<td colspan="3">"#, "</td>", "</tr>"]
//!     .into_iter()
//!     .map(|t| Fragment::new("html", t))
//!     .collect();
//!
//! let output = expand_fragments(&input).unwrap();
//! let html: String = output.iter().map(|f| f.content.as_str()).collect();
//! assert_eq!(html, "<tr><td></td><td></td><td></td></tr>");
//! ```
//!
//! ### Whole pandoc document
//!
//! ```rust
//! use tablespan::{expand_document, ExpanderOptions};
//!
//! let doc = r#"{"pandoc-api-version":[1,23],"meta":{},"blocks":[
//!     {"t":"RawBlock","c":["html","<td colspan=\"2\">"]},
//!     {"t":"RawBlock","c":["html","</td>"]}
//! ]}"#;
//!
//! let output = expand_document(doc, &ExpanderOptions::default()).unwrap();
//! assert!(output.content.contains(r#"["html","<td>"]"#));
//! assert!(!output.has_warnings());
//! ```

/// Core rewriting modules
pub mod core;

/// Pandoc JSON filter runtime
pub mod pandoc;

/// Utility modules
pub mod utils;

// Re-export core types
pub use crate::core::{CellTag, ColExpansion, ExpanderOptions, MarkupToken, SpanExpander, SpanKind};

// Re-export runtime
pub use pandoc::{Filter, FilterAction, Fragment};

// Re-export utilities
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// Run a fresh expander over an in-memory fragment stream.
///
/// Each fragment is replaced by its replacement list, or kept when the
/// expander leaves it alone.
pub fn expand_fragments(fragments: &[Fragment]) -> ConversionResult<Vec<Fragment>> {
    let mut expander = SpanExpander::new();
    let mut out = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        match expander.process(fragment)? {
            Some(replacement) => out.extend(replacement),
            None => out.push(fragment.clone()),
        }
    }

    Ok(out)
}

/// Expand table spans in a whole pandoc JSON document.
///
/// Output is only produced when the entire document went through; the
/// warnings describe spans left open at the end of the document.
pub fn expand_document(
    input: &str,
    options: &ExpanderOptions,
) -> ConversionResult<ConversionOutput> {
    let mut expander = SpanExpander::with_options(options.clone());
    let content = pandoc::filter_json(input, &mut expander)?;
    Ok(ConversionOutput::with_warnings(content, expander.finish()))
}
