//! Depth-first walk over a pandoc JSON document
//!
//! Pandoc hands a filter the whole document as JSON. Every object that
//! carries a `"t"` key inside an array is a node; the filter sees those
//! nodes one at a time, in document order, and either keeps a node or
//! splices a replacement list in its place.

use serde_json::{Map, Value};

use crate::utils::error::ConversionResult;

/// What to do with a node offered to a [`Filter`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// Leave the node alone and walk into its children
    Keep,
    /// Replace the node by these nodes (possibly none)
    Replace(Vec<Value>),
}

/// A node-level document filter.
pub trait Filter {
    /// Called once per node in document order.
    ///
    /// `kind` is the node's `"t"` tag and `payload` its `"c"` value.
    fn apply(&mut self, kind: &str, payload: Option<&Value>) -> ConversionResult<FilterAction>;
}

/// Walk `value`, offering every node to `filter`.
///
/// Replacement nodes are not offered to the filter again; only their
/// children are walked.
pub fn walk<F: Filter + ?Sized>(value: Value, filter: &mut F) -> ConversionResult<Value> {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let action = match item.get("t").and_then(Value::as_str) {
                    Some(kind) => filter.apply(kind, item.get("c"))?,
                    None => FilterAction::Keep,
                };
                match action {
                    FilterAction::Keep => out.push(walk(item, filter)?),
                    FilterAction::Replace(nodes) => {
                        for node in nodes {
                            out.push(walk(node, filter)?);
                        }
                    }
                }
            }
            Ok(Value::Array(out))
        }
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                out.insert(key, walk(child, filter)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other),
    }
}

/// Parse a JSON document, run `filter` over it, and serialize the result.
pub fn filter_json<F: Filter + ?Sized>(input: &str, filter: &mut F) -> ConversionResult<String> {
    let doc: Value = serde_json::from_str(input)?;
    let altered = walk(doc, filter)?;
    Ok(serde_json::to_string(&altered)?)
}
