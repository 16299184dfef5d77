//! Integration tests for tablespan over whole pandoc documents

use serde_json::{json, Value};
use tablespan::{
    expand_document, expand_fragments, ConversionError, ExpanderOptions, Fragment, SpanExpander,
};

/// Build a document whose blocks are raw html tags, with any token not
/// starting with `<` turned into a `Plain` block of text.
fn document(tokens: &[&str]) -> Value {
    let blocks: Vec<Value> = tokens.iter().map(|t| block(t)).collect();
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": blocks,
    })
}

fn block(token: &str) -> Value {
    if token.starts_with('<') {
        Fragment::new("html", token).to_node().unwrap()
    } else {
        json!({"t": "Plain", "c": [{"t": "Str", "c": token}]})
    }
}

fn expand(doc: &Value) -> Value {
    let output = expand_document(&doc.to_string(), &ExpanderOptions::default())
        .expect("document should expand");
    serde_json::from_str(&output.content).unwrap()
}

// ============================================================================
// Span expansion through the pandoc runtime
// ============================================================================

mod documents {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rowspan_table() {
        let input = document(&[
            "<table>",
            "<tr>",
            r#"<td rowspan="2">"#,
            "A",
            "</td>",
            "<td>",
            "B",
            "</td>",
            "</tr>",
            "<tr>",
            "<td>",
            "C",
            "</td>",
            "</tr>",
            "</table>",
        ]);
        let expected = document(&[
            "<table>", "<tr>", "<td>", "A", "</td>", "<td>", "B", "</td>", "</tr>", "<tr>",
            "<td>", "</td>", "<td>", "C", "</td>", "</tr>", "</table>",
        ]);
        assert_eq!(expand(&input), expected);
    }

    #[test]
    fn test_colspan_table() {
        let input = document(&["<tr>", r#"<td colspan="3">"#, "X", "</td>", "</tr>"]);
        let expected = document(&[
            "<tr>", "<td>", "X", "</td>", "<td>", "</td>", "<td>", "</td>", "</tr>",
        ]);
        assert_eq!(expand(&input), expected);
    }

    #[test]
    fn test_header_row_with_colspan_and_body_rowspan() {
        let input = document(&[
            "<table>",
            "<tr>",
            r#"<th colspan="2">"#,
            "Name",
            "</th>",
            "<th>",
            "Score",
            "</th>",
            "</tr>",
            "<tr>",
            r#"<td rowspan="2">"#,
            "Team",
            "</td>",
            "<td>",
            "Ann",
            "</td>",
            "<td>",
            "1",
            "</td>",
            "</tr>",
            "<tr>",
            "<td>",
            "Bob",
            "</td>",
            "<td>",
            "2",
            "</td>",
            "</tr>",
            "</table>",
        ]);
        let expected = document(&[
            "<table>", "<tr>", "<th>", "Name", "</th>", "<th>", "</th>", "<th>", "Score", "</th>",
            "</tr>", "<tr>", "<td>", "Team", "</td>", "<td>", "Ann", "</td>", "<td>", "1",
            "</td>", "</tr>", "<tr>", "<td>", "</td>", "<td>", "Bob", "</td>", "<td>", "2",
            "</td>", "</tr>", "</table>",
        ]);
        assert_eq!(expand(&input), expected);
    }

    #[test]
    fn test_document_without_tables_is_unchanged() {
        let input = json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {"title": {"t": "MetaInlines", "c": [{"t": "Str", "c": "T"}]}},
            "blocks": [
                {"t": "Header", "c": [1, ["intro", [], []], [{"t": "Str", "c": "Intro"}]]},
                {"t": "RawBlock", "c": ["html", "<div class=\"note\">"]},
                {"t": "Para", "c": [{"t": "RawInline", "c": ["html", "<td>"]}]},
                {"t": "RawBlock", "c": ["html", "</div>"]}
            ]
        });
        assert_eq!(expand(&input), input);
    }

    #[test]
    fn test_nested_blocks_are_visited() {
        let input = json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [
                {"t": "Div", "c": [["", [], []], [
                    {"t": "RawBlock", "c": ["html", "<td colspan=\"2\">"]},
                    {"t": "RawBlock", "c": ["html", "</td>"]}
                ]]}
            ]
        });
        let out = expand(&input);
        assert_eq!(
            out["blocks"][0]["c"][1],
            json!([
                {"t": "RawBlock", "c": ["html", "<td>"]},
                {"t": "RawBlock", "c": ["html", "</td>"]},
                {"t": "RawBlock", "c": ["html", "<td>"]},
                {"t": "RawBlock", "c": ["html", "</td>"]}
            ])
        );
    }

    #[test]
    fn test_output_keeps_key_order() {
        let input = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"t":"RawBlock","c":["html","<table>"]}]}"#;
        let output = expand_document(input, &ExpanderOptions::default()).unwrap();
        assert_eq!(output.content, input);
    }
}

// ============================================================================
// Failure modes
// ============================================================================

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_malformed_span_aborts_whole_document() {
        let input = document(&["<tr>", r#"<td rowspan="0">"#, "A", "</td>", "</tr>"]);
        let err = expand_document(&input.to_string(), &ExpanderOptions::default())
            .unwrap_err();
        assert_eq!(err, ConversionError::invalid_span("rowspan", "0"));
    }

    #[test]
    fn test_malformed_json() {
        let err = expand_document("{\"blocks\": [", &ExpanderOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConversionError::ParseError { .. }));
    }

    #[test]
    fn test_raw_block_with_bad_payload() {
        let input = r#"{"blocks":[{"t":"RawBlock","c":"<td>"}]}"#;
        let err = expand_document(input, &ExpanderOptions::default()).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));
    }
}

// ============================================================================
// Options and warnings
// ============================================================================

mod options {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_html_only_skips_other_raw_formats() {
        let input = json!({
            "meta": {},
            "blocks": [
                {"t": "RawBlock", "c": ["latex", "<td colspan=\"2\">"]},
                {"t": "RawBlock", "c": ["latex", "</td>"]}
            ]
        });
        let output =
            expand_document(&input.to_string(), &ExpanderOptions::html_only()).unwrap();
        let out: Value = serde_json::from_str(&output.content).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_unclosed_colspan_warns() {
        let input = document(&["<tr>", r#"<td colspan="4">"#]);
        let output =
            expand_document(&input.to_string(), &ExpanderOptions::default()).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].message.contains("3 <td>"));
    }
}

// ============================================================================
// Fragment-level API
// ============================================================================

mod fragments {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_fragments_matches_document_run() {
        let tokens = ["<tr>", r#"<td colspan="2">"#, "</td>", "</tr>"];
        let input: Vec<Fragment> = tokens.iter().map(|t| Fragment::new("html", *t)).collect();
        let out = expand_fragments(&input).unwrap();
        let contents: Vec<&str> = out.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, ["<tr>", "<td>", "</td>", "<td>", "</td>", "</tr>"]);
    }

    #[test]
    fn test_expander_state_is_per_instance() {
        let mut first = SpanExpander::new();
        first
            .process(&Fragment::new("html", r#"<td rowspan="2">"#))
            .unwrap();
        let second = SpanExpander::new();
        assert_eq!(second.pending_row_spans(), Vec::new());
        assert_eq!(first.pending_row_spans(), vec![(0, 1)]);
    }
}
