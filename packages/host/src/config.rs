//! Configuration validation and synthetic import documents

use serde_json::{json, Value};
use tracing::warn;

use emailbuilder_blocks::{Document, ROOT_BLOCK_ID};

/// Fixed id of the block holding imported markup.
///
/// Stable across imports so a repeated `set_html` fully replaces the
/// previously imported content instead of appending a second block.
pub const IMPORTED_HTML_BLOCK_ID: &str = "block-imported-html";

/// Structural check for a configuration import.
///
/// A configuration is accepted when the root entry exists, is an
/// `EmailLayout` with a `childrenIds` array, and every id referenced from
/// any `childrenIds` array resolves to a key of the mapping. Anything else
/// is rejected before it can reach the store.
pub fn is_valid_configuration(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let Some(root) = object.get(ROOT_BLOCK_ID).and_then(Value::as_object) else {
        return false;
    };
    if root.get("type").and_then(Value::as_str) != Some("EmailLayout") {
        return false;
    }
    let Some(root_data) = root.get("data").and_then(Value::as_object) else {
        return false;
    };
    if !root_data
        .get("childrenIds")
        .map(Value::is_array)
        .unwrap_or(false)
    {
        return false;
    }

    // Every childrenIds reference anywhere must resolve
    for block in object.values() {
        let Some(children) = block
            .get("data")
            .and_then(|data| data.get("childrenIds"))
            .and_then(Value::as_array)
        else {
            continue;
        };
        for child in children {
            match child.as_str() {
                Some(id) if object.contains_key(id) => {}
                _ => return false,
            }
        }
    }

    true
}

/// Validate and deserialize a configuration.
///
/// Returns `None` (with a diagnostic) for anything the structural check or
/// the block schemas reject; the caller ignores the import in that case.
pub fn parse_configuration(value: &Value) -> Option<Document> {
    if !is_valid_configuration(value) {
        warn!("rejected configuration import: structural check failed");
        return None;
    }
    match serde_json::from_value::<Document>(value.clone()) {
        Ok(document) => Some(document),
        Err(error) => {
            warn!(%error, "rejected configuration import: block schemas failed");
            None
        }
    }
}

/// Empty document: root layout with no children
pub fn empty_document() -> Document {
    Document::empty_layout()
}

/// Wrap raw markup as the sole child of a synthetic layout document
pub fn synthetic_html_document(markup: &str) -> Document {
    let value = json!({
        ROOT_BLOCK_ID: {
            "type": "EmailLayout",
            "data": {
                "backdropColor": "#F5F5F5",
                "canvasColor": "#FFFFFF",
                "textColor": "#262626",
                "fontFamily": "MODERN_SANS",
                "childrenIds": [IMPORTED_HTML_BLOCK_ID],
            },
        },
        IMPORTED_HTML_BLOCK_ID: {
            "type": "Html",
            "data": {
                "props": { "contents": markup },
                "style": {
                    "padding": { "top": 16, "bottom": 16, "left": 24, "right": 24 },
                },
            },
        },
    });

    // The shape above is statically well-formed for the block schemas
    serde_json::from_value(value).unwrap_or_else(|_| Document::empty_layout())
}
