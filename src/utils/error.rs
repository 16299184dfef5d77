//! Error handling for tablespan runs
//!
//! This module provides a unified error type and result type for the
//! span expander and the document filter runtime. Any error aborts the
//! whole run; warnings are collected alongside the output instead.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Parse error - the input document is not valid JSON
    ParseError {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// A `colspan`/`rowspan` attribute whose count is not a positive integer
    InvalidSpan { attribute: String, value: String },
    /// Document shape the filter cannot work with
    InvalidInput { message: String },
    /// IO error (reading stdin, writing stdout, files)
    IoError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ParseError {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Parse error at line {}, column {}: {}", l, c, message)
                } else if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            ConversionError::InvalidSpan { attribute, value } => {
                write!(
                    f,
                    "Invalid span: {}=\"{}\" is not a positive integer",
                    attribute, value
                )
            }
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => ConversionError::IoError {
                message: err.to_string(),
            },
            // Data errors come from typed decoding of an already valid document
            Category::Data => ConversionError::InvalidInput {
                message: err.to_string(),
            },
            Category::Syntax | Category::Eof => ConversionError::ParseError {
                message: err.to_string(),
                line: Some(err.line()),
                column: Some(err.column()),
            },
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub message: String,
    /// Index of the raw-markup fragment the warning refers to, if any
    pub fragment: Option<usize>,
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fragment: None,
            suggestion: None,
        }
    }

    pub fn at_fragment(mut self, index: usize) -> Self {
        self.fragment = Some(index);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(i) = self.fragment {
            write!(f, "Warning at fragment {}: {}", i, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn invalid_span(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        ConversionError::InvalidSpan {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }
}
