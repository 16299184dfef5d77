//! Raw markup fragments as they appear in the pandoc JSON tree

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::{ConversionError, ConversionResult};

/// Node kind of a raw markup block
pub const RAW_BLOCK: &str = "RawBlock";

/// A raw markup block: an opaque format tag plus verbatim markup text.
///
/// Serialized the way pandoc does it:
///
/// ```rust
/// use tablespan::Fragment;
///
/// let frag = Fragment::new("html", "<td>");
/// let json = serde_json::to_string(&frag).unwrap();
/// assert_eq!(json, r#"{"t":"RawBlock","c":["html","<td>"]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct Fragment {
    /// Format tag (`"html"` for table markup), forwarded as-is
    pub format: String,
    /// Markup text, expected to be a single HTML token
    pub content: String,
}

/// Wire shape of a raw block node.
#[derive(Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
enum RawNode {
    RawBlock(String, String),
}

impl From<Fragment> for RawNode {
    fn from(frag: Fragment) -> Self {
        RawNode::RawBlock(frag.format, frag.content)
    }
}

impl From<RawNode> for Fragment {
    fn from(node: RawNode) -> Self {
        let RawNode::RawBlock(format, content) = node;
        Fragment { format, content }
    }
}

impl Fragment {
    pub fn new(format: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            content: content.into(),
        }
    }

    /// Same format tag, different markup.
    pub fn sibling(&self, content: impl Into<String>) -> Self {
        Self {
            format: self.format.clone(),
            content: content.into(),
        }
    }

    /// Decode the `c` payload of a `RawBlock` node.
    pub fn from_payload(payload: Option<&Value>) -> ConversionResult<Self> {
        let node = serde_json::json!({ "t": RAW_BLOCK, "c": payload });
        serde_json::from_value(node).map_err(|e| {
            ConversionError::invalid(format!(
                "RawBlock content must be a [format, text] array: {}",
                e
            ))
        })
    }

    /// Encode as a full `{"t": "RawBlock", "c": [...]}` node.
    pub fn to_node(&self) -> ConversionResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
