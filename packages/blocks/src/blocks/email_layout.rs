//! # EmailLayout
//!
//! The root container. Holds the backdrop/canvas colors, the base text
//! color and font, and the top-level `childrenIds` sequence. Layout fields
//! live flat on `data` (not under `props`) for wire compatibility.

use serde::{Deserialize, Serialize};

use crate::document::{BlockData, BlockId};
use crate::errors::BlockError;
use crate::kind::BlockKind;
use crate::style::{FontFamily, StyleBuilder};

pub const DEFAULT_BACKDROP_COLOR: &str = "#F5F5F5";
pub const DEFAULT_CANVAS_COLOR: &str = "#FFFFFF";
pub const DEFAULT_TEXT_COLOR: &str = "#262626";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLayoutProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_ids: Option<Vec<BlockId>>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_flat::<EmailLayoutProps>(BlockKind::EmailLayout)?;
    Ok(())
}

pub fn render(data: &BlockData, children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_flat::<EmailLayoutProps>(BlockKind::EmailLayout)?;

    let backdrop = props
        .backdrop_color
        .as_deref()
        .unwrap_or(DEFAULT_BACKDROP_COLOR);
    let canvas = props
        .canvas_color
        .as_deref()
        .unwrap_or(DEFAULT_CANVAS_COLOR);
    let text_color = props.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR);
    let font = props.font_family.unwrap_or_default();

    let mut outer = StyleBuilder::new();
    outer
        .push("background-color", backdrop)
        .push("color", text_color)
        .push("font-family", font.font_stack())
        .push("font-size", "16px")
        .push("line-height", "1.5")
        .push("padding", "32px 0")
        .push("width", "100%")
        .push("min-height", "100%");

    let mut inner = StyleBuilder::new();
    inner
        .push("margin", "0 auto")
        .push("max-width", "600px")
        .push("background-color", canvas);
    if let Some(border_color) = &props.border_color {
        inner.push("border", format!("1px solid {border_color}"));
    }
    if let Some(radius) = props.border_radius.filter(|radius| *radius > 0) {
        inner.push("border-radius", format!("{radius}px"));
    }
    inner.push("box-sizing", "border-box");

    Ok(format!(
        "<div{outer}><div{inner}>\
         <table role=\"presentation\" width=\"100%\" cellspacing=\"0\" cellpadding=\"0\" border=\"0\" \
         style=\"border-collapse:separate;width:100%\">\
         <tbody><tr style=\"width:100%\"><td style=\"padding:0\">{body}</td></tr></tbody>\
         </table></div></div>",
        outer = outer.to_attr(),
        inner = inner.to_attr(),
        body = children.concat(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let data = BlockData::default();
        let html = render(&data, &[]).unwrap();
        assert!(html.contains("background-color:#F5F5F5"));
        assert!(html.contains("background-color:#FFFFFF"));
        assert!(html.contains("Helvetica Neue"));
    }

    #[test]
    fn test_children_in_order() {
        let data = BlockData::default();
        let html = render(&data, &["<p>one</p>".into(), "<p>two</p>".into()]).unwrap();
        let one = html.find("<p>one</p>").unwrap();
        let two = html.find("<p>two</p>").unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_flat_fields_parse() {
        let data: BlockData = serde_json::from_str(
            r##"{ "backdropColor": "#101010", "fontFamily": "MONOSPACE", "childrenIds": [] }"##,
        )
        .unwrap();
        validate(&data).unwrap();
        let html = render(&data, &[]).unwrap();
        assert!(html.contains("background-color:#101010"));
        assert!(html.contains("Courier New"));
    }
}
