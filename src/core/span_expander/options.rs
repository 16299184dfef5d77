//! Span expander configuration

/// Options for [`SpanExpander`](super::SpanExpander)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpanderOptions {
    /// Only inspect raw blocks with this format tag (compared case-insensitively)
    /// Default: None (every raw block is inspected)
    pub raw_format: Option<String>,

    /// Report row-spans and column expansions still outstanding at end of run
    /// Default: true
    pub report_dangling: bool,
}

impl Default for ExpanderOptions {
    fn default() -> Self {
        Self {
            raw_format: None,
            report_dangling: true,
        }
    }
}

impl ExpanderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect `html` raw blocks only
    pub fn html_only() -> Self {
        Self {
            raw_format: Some("html".to_string()),
            ..Self::default()
        }
    }

    /// Whether a fragment with this format tag should be inspected
    pub fn inspects(&self, format: &str) -> bool {
        match self.raw_format {
            Some(ref only) => only.eq_ignore_ascii_case(format),
            None => true,
        }
    }
}
