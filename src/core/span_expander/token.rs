//! Token classification for raw table markup

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::fmt;

use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    static ref ROW_CLOSE: Regex = Regex::new(r"(?i)^</tr\s*>$").unwrap();
    static ref CELL_CLOSE: Regex = Regex::new(r"(?i)^</(td|th)\s*>$").unwrap();
    /// Anchored at the start only; trailing markup after the tag is ignored
    static ref SPAN_OPEN: Regex =
        Regex::new(r#"(?i)^<(td|th) (col|row)span="([^"]*)">"#).unwrap();
    static ref CELL_OPEN: Regex = Regex::new(r"(?i)^<(td|th)(?:\s[^>]*)?>").unwrap();
}

/// Table cell element name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellTag {
    Td,
    Th,
}

impl CellTag {
    fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("th") {
            CellTag::Th
        } else {
            CellTag::Td
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CellTag::Td => "td",
            CellTag::Th => "th",
        }
    }

    /// `<td>` / `<th>`
    pub fn open(&self) -> String {
        format!("<{}>", self.as_str())
    }

    /// `</td>` / `</th>`
    pub fn close(&self) -> String {
        format!("</{}>", self.as_str())
    }
}

impl fmt::Display for CellTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which direction a span attribute extends a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Col,
    Row,
}

impl SpanKind {
    pub fn attribute(&self) -> &'static str {
        match self {
            SpanKind::Col => "colspan",
            SpanKind::Row => "rowspan",
        }
    }

    /// Largest count HTML table processing honours for this attribute
    pub fn max_count(&self) -> u32 {
        match self {
            SpanKind::Col => 1000,
            SpanKind::Row => 65534,
        }
    }
}

/// A classified raw markup fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken {
    /// `</tr>`
    RowClose,
    /// `<td colspan="N">`, `<th rowspan="N">`, ...
    CellOpenWithSpan {
        tag: CellTag,
        kind: SpanKind,
        count: u32,
    },
    /// `</td>` or `</th>`
    CellClose { tag: CellTag },
    /// `<td>` or `<th>`, possibly with attributes other than a leading span
    CellOpenPlain { tag: CellTag },
    /// Anything else
    Other,
}

impl MarkupToken {
    /// Classify one HTML token.
    ///
    /// Fails only when a span attribute carries something other than a
    /// positive integer.
    pub fn classify(content: &str) -> ConversionResult<Self> {
        let text = content.trim();

        if ROW_CLOSE.is_match(text) {
            return Ok(MarkupToken::RowClose);
        }

        if let Some(caps) = CELL_CLOSE.captures(text) {
            return Ok(MarkupToken::CellClose {
                tag: CellTag::parse(&caps[1]),
            });
        }

        if let Some(caps) = SPAN_OPEN.captures(text) {
            let kind = if caps[2].eq_ignore_ascii_case("col") {
                SpanKind::Col
            } else {
                SpanKind::Row
            };
            return Ok(MarkupToken::CellOpenWithSpan {
                tag: CellTag::parse(&caps[1]),
                kind,
                count: parse_span(kind, &caps[3])?,
            });
        }

        if let Some(caps) = CELL_OPEN.captures(text) {
            return Ok(MarkupToken::CellOpenPlain {
                tag: CellTag::parse(&caps[1]),
            });
        }

        Ok(MarkupToken::Other)
    }
}

fn parse_span(kind: SpanKind, value: &str) -> ConversionResult<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > kind.max_count() => {
            warn!(
                "{}=\"{}\" exceeds {}, clamping",
                kind.attribute(),
                value,
                kind.max_count()
            );
            Ok(kind.max_count())
        }
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConversionError::invalid_span(kind.attribute(), value)),
    }
}
