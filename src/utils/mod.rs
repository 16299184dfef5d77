//! Utility modules
//!
//! Error, warning, and result types shared by the expander and the runtime.

pub mod error;

// Re-export commonly used items
pub use error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};
