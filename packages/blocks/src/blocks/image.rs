//! Image block
//!
//! The `url` prop is typically populated by the upload side-channel; the
//! panel only commits it after a successful transfer.

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::escape::escape_attr;
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl ContentAlignment {
    fn vertical_align(self) -> &'static str {
        match self {
            ContentAlignment::Top => "top",
            ContentAlignment::Middle => "middle",
            ContentAlignment::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_href: Option<String>,

    #[serde(default)]
    pub content_alignment: ContentAlignment,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<ImageProps>(BlockKind::Image)?;
    data.parse_style::<BlockStyle>(BlockKind::Image)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<ImageProps>(BlockKind::Image)?;
    let style = data.parse_style::<BlockStyle>(BlockKind::Image)?;

    let mut img_style = StyleBuilder::new();
    img_style
        .push("outline", "none")
        .push("border", "none")
        .push("max-width", "100%")
        .push("vertical-align", props.content_alignment.vertical_align());
    img_style.push_opt("width", props.width.map(|px| format!("{px}px")));
    img_style.push_opt("height", props.height.map(|px| format!("{px}px")));

    let mut img = format!(
        "<img src=\"{}\" alt=\"{}\"",
        escape_attr(props.url.as_deref().unwrap_or_default()),
        escape_attr(props.alt.as_deref().unwrap_or_default()),
    );
    if let Some(width) = props.width {
        img.push_str(&format!(" width=\"{width}\""));
    }
    if let Some(height) = props.height {
        img.push_str(&format!(" height=\"{height}\""));
    }
    img.push_str(&img_style.to_attr());
    img.push('>');

    let content = match props.link_href.as_deref() {
        Some(href) if !href.is_empty() => format!(
            "<a href=\"{}\" target=\"_blank\" style=\"text-decoration:none\">{img}</a>",
            escape_attr(href),
        ),
        _ => img,
    };

    let mut wrapper = StyleBuilder::new();
    wrapper.push_block_style(&style);
    Ok(format!("<div{}>{content}</div>", wrapper.to_attr()))
}
