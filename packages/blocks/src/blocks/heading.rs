//! Heading block: h1/h2/h3 with level-scaled default sizing

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::escape::escape_text;
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }

    fn default_font_size(self) -> u32 {
        match self {
            HeadingLevel::H1 => 32,
            HeadingLevel::H2 => 24,
            HeadingLevel::H3 => 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default)]
    pub level: HeadingLevel,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<HeadingProps>(BlockKind::Heading)?;
    data.parse_style::<BlockStyle>(BlockKind::Heading)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<HeadingProps>(BlockKind::Heading)?;
    let style = data.parse_style::<BlockStyle>(BlockKind::Heading)?;

    let font_size = style
        .font_size
        .unwrap_or_else(|| props.level.default_font_size());

    let font_weight = style
        .font_weight
        .map(crate::style::FontWeight::to_css)
        .unwrap_or("bold");

    let mut builder = StyleBuilder::new();
    builder
        .push("margin", "0")
        .push("font-size", format!("{font_size}px"))
        .push("font-weight", font_weight)
        .push_block_style(&BlockStyle {
            font_size: None,
            font_weight: None,
            ..style
        });

    let tag = props.level.tag();
    Ok(format!(
        "<{tag}{}>{}</{tag}>",
        builder.to_attr(),
        escape_text(props.text.as_deref().unwrap_or_default()),
    ))
}
