//! Pandoc JSON filter runtime
//!
//! Reads the document tree pandoc emits with `--filter`, hands every node
//! to a [`Filter`] in document order, and writes the altered tree back.

pub mod node;
pub mod walk;

pub use node::{Fragment, RAW_BLOCK};
pub use walk::{filter_json, walk, Filter, FilterAction};
