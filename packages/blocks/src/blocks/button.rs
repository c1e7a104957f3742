//! Button block: a styled call-to-action link

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::escape::{escape_attr, escape_text};
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    fn padding_css(self) -> &'static str {
        match self {
            ButtonSize::Xs => "4px 8px",
            ButtonSize::Sm => "8px 12px",
            ButtonSize::Md => "12px 20px",
            ButtonSize::Lg => "16px 24px",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    Rectangle,
    #[default]
    Rounded,
    Pill,
}

impl ButtonShape {
    fn border_radius_px(self) -> u32 {
        match self {
            ButtonShape::Rectangle => 0,
            ButtonShape::Rounded => 4,
            ButtonShape::Pill => 64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub size: ButtonSize,

    #[serde(rename = "buttonStyle", default)]
    pub shape: ButtonShape,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,

    #[serde(default)]
    pub full_width: bool,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<ButtonProps>(BlockKind::Button)?;
    data.parse_style::<BlockStyle>(BlockKind::Button)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<ButtonProps>(BlockKind::Button)?;
    let style = data.parse_style::<BlockStyle>(BlockKind::Button)?;

    let background = props
        .button_background_color
        .as_deref()
        .unwrap_or("#0079CC");
    let text_color = props.button_text_color.as_deref().unwrap_or("#FFFFFF");

    let mut anchor = StyleBuilder::new();
    anchor
        .push(
            "display",
            if props.full_width { "block" } else { "inline-block" },
        )
        .push("background-color", background)
        .push("color", text_color)
        .push("padding", props.size.padding_css())
        .push(
            "border-radius",
            format!("{}px", props.shape.border_radius_px()),
        )
        .push("text-align", "center")
        .push("text-decoration", "none")
        .push("font-weight", "bold");

    // Outer div carries the block-level style (alignment, padding, backdrop)
    let mut wrapper = StyleBuilder::new();
    wrapper.push_block_style(&style);

    let href = escape_attr(props.url.as_deref().unwrap_or("#"));
    Ok(format!(
        "<div{}><a href=\"{href}\" target=\"_blank\"{}>{}</a></div>",
        wrapper.to_attr(),
        anchor.to_attr(),
        escape_text(props.text.as_deref().unwrap_or_default()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pill_full_width() {
        let data: BlockData = serde_json::from_str(
            r#"{ "props": {
                "text": "Go",
                "url": "https://example.com",
                "buttonStyle": "pill",
                "fullWidth": true
            } }"#,
        )
        .unwrap();
        let html = render(&data, &[]).unwrap();
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("border-radius:64px"));
        assert!(html.contains("display:block"));
    }

    #[test]
    fn test_invalid_size_rejected() {
        let data: BlockData =
            serde_json::from_str(r#"{ "props": { "size": "xxl" } }"#).unwrap();
        assert!(validate(&data).is_err());
    }
}
