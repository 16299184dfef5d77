//! Streaming colspan/rowspan rewriter
//!
//! The expander sees the cell and row boundary tags of an HTML table one
//! fragment at a time and rewrites them so every grid position gets its
//! own plain cell:
//!
//! - `rowspan="N"` leaves an obligation on its column for the next N-1
//!   rows; each of those rows gets a `<td></td>` filler there.
//! - `colspan="N"` appends N-1 empty cells of the same tag right after
//!   the spanning cell closes.
//!
//! State only moves forward. There is no lookahead.

use fxhash::FxHashMap;
use log::{debug, trace, warn};
use serde_json::Value;

use super::options::ExpanderOptions;
use super::token::{CellTag, MarkupToken, SpanKind};
use crate::pandoc::node::{Fragment, RAW_BLOCK};
use crate::pandoc::walk::{Filter, FilterAction};
use crate::utils::error::{ConversionResult, ConversionWarning};

/// Outstanding vertical span at one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowSpanObligation {
    /// Rows still owed a filler cell (always > 0)
    remaining: u32,
    /// Fragment index of the declaring `rowspan` tag
    origin: usize,
}

/// Extra cells to append when the current spanning cell closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColExpansion {
    pub count: u32,
    pub tag: CellTag,
}

/// Rewriter state for one document run.
#[derive(Debug, Clone, Default)]
pub struct SpanExpander {
    options: ExpanderOptions,
    pending_rows: FxHashMap<usize, RowSpanObligation>,
    column: usize,
    pending_col: Option<ColExpansion>,
    /// Raw fragments inspected so far
    seen: usize,
    /// Fragment index of the last `colspan` declaration
    col_origin: usize,
}

impl SpanExpander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExpanderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ExpanderOptions {
        &self.options
    }

    /// Rendered column position within the current row
    pub fn column(&self) -> usize {
        self.column
    }

    /// Rows still owed a filler at `column`, if any
    pub fn pending_row_span(&self, column: usize) -> Option<u32> {
        self.pending_rows.get(&column).map(|o| o.remaining)
    }

    /// All outstanding row-spans as `(column, remaining)`, sorted by column
    pub fn pending_row_spans(&self) -> Vec<(usize, u32)> {
        let mut spans: Vec<_> = self
            .pending_rows
            .iter()
            .map(|(&col, o)| (col, o.remaining))
            .collect();
        spans.sort_unstable();
        spans
    }

    pub fn pending_col_expansion(&self) -> Option<ColExpansion> {
        self.pending_col
    }

    /// Handle the next raw markup fragment.
    ///
    /// Returns `Ok(None)` when the fragment stays as it is, or the list of
    /// fragments that replace it. Replacements carry the input's format tag.
    pub fn process(&mut self, fragment: &Fragment) -> ConversionResult<Option<Vec<Fragment>>> {
        if !self.options.inspects(&fragment.format) {
            return Ok(None);
        }

        let token = MarkupToken::classify(&fragment.content)?;
        trace!("fragment {}: {:?} -> {:?}", self.seen, fragment.content, token);

        let out = self.process_token(fragment, token);
        self.seen += 1;
        Ok(out)
    }

    /// Apply an already classified token.
    pub fn process_token(
        &mut self,
        fragment: &Fragment,
        token: MarkupToken,
    ) -> Option<Vec<Fragment>> {
        match token {
            MarkupToken::RowClose => {
                self.column = 0;
                None
            }

            MarkupToken::CellClose { .. } => {
                self.column += 1;
                let mut out = vec![fragment.clone()];
                if let Some(expansion) = self.pending_col.take() {
                    debug!(
                        "appending {} empty <{}> cell(s) after fragment {}",
                        expansion.count, expansion.tag, self.seen
                    );
                    for _ in 0..expansion.count {
                        out.push(fragment.sibling(expansion.tag.open()));
                        out.push(fragment.sibling(expansion.tag.close()));
                    }
                }
                Some(out)
            }

            MarkupToken::CellOpenWithSpan {
                tag,
                kind: SpanKind::Row,
                count,
            } => {
                if count > 1 {
                    debug!(
                        "column {} owes a filler to the next {} row(s)",
                        self.column,
                        count - 1
                    );
                    self.pending_rows.insert(
                        self.column,
                        RowSpanObligation {
                            remaining: count - 1,
                            origin: self.seen,
                        },
                    );
                }
                Some(vec![fragment.sibling(tag.open())])
            }

            MarkupToken::CellOpenWithSpan {
                tag,
                kind: SpanKind::Col,
                count,
            } => {
                let extra = count.saturating_sub(1);
                self.pending_col = (extra > 0).then_some(ColExpansion { count: extra, tag });
                self.col_origin = self.seen;
                // Reserve the rendered columns before looking for owed fillers
                self.column += extra as usize;

                let mut out = self.take_row_filler(fragment);
                out.push(fragment.sibling(tag.open()));
                Some(out)
            }

            MarkupToken::CellOpenPlain { .. } => {
                let mut out = self.take_row_filler(fragment);
                out.push(fragment.clone());
                Some(out)
            }

            MarkupToken::Other => None,
        }
    }

    /// Emit one `<td></td>` if the current column is still covered by a
    /// row-span from an earlier row.
    fn take_row_filler(&mut self, fragment: &Fragment) -> Vec<Fragment> {
        let column = self.column;
        let Some(obligation) = self.pending_rows.get_mut(&column) else {
            return Vec::new();
        };

        obligation.remaining -= 1;
        let remaining = obligation.remaining;
        if remaining == 0 {
            self.pending_rows.remove(&column);
        }
        debug!(
            "filler cell at column {} ({} row(s) left)",
            column, remaining
        );

        vec![
            fragment.sibling(CellTag::Td.open()),
            fragment.sibling(CellTag::Td.close()),
        ]
    }

    /// End the run, reporting spans that never found their rows or close tag.
    pub fn finish(self) -> Vec<ConversionWarning> {
        if !self.options.report_dangling {
            return Vec::new();
        }

        let mut dangling: Vec<(usize, RowSpanObligation)> =
            self.pending_rows.iter().map(|(&col, &o)| (col, o)).collect();
        dangling.sort_unstable_by_key(|&(col, _)| col);

        let mut warnings: Vec<ConversionWarning> = dangling
            .into_iter()
            .map(|(col, o)| {
                ConversionWarning::new(format!(
                    "rowspan at column {} still covers {} row(s) past the end of input",
                    col, o.remaining
                ))
                .at_fragment(o.origin)
                .with_suggestion("the table has fewer rows than the span declares")
            })
            .collect();

        if let Some(expansion) = self.pending_col {
            warnings.push(
                ConversionWarning::new(format!(
                    "colspan cell never closed; {} <{}> cell(s) not emitted",
                    expansion.count, expansion.tag
                ))
                .at_fragment(self.col_origin),
            );
        }

        for w in &warnings {
            warn!("{}", w);
        }
        warnings
    }
}

impl Filter for SpanExpander {
    fn apply(&mut self, kind: &str, payload: Option<&Value>) -> ConversionResult<FilterAction> {
        if kind != RAW_BLOCK {
            return Ok(FilterAction::Keep);
        }

        let fragment = Fragment::from_payload(payload)?;
        match self.process(&fragment)? {
            Some(fragments) => Ok(FilterAction::Replace(
                fragments
                    .iter()
                    .map(Fragment::to_node)
                    .collect::<ConversionResult<_>>()?,
            )),
            None => Ok(FilterAction::Keep),
        }
    }
}
