//! Avatar block: a small profile image with a shape mask

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::escape::escape_attr;
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

const DEFAULT_SIZE: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvatarShape {
    #[default]
    Circle,
    Square,
    Rounded,
}

impl AvatarShape {
    fn border_radius_css(self, size: u32) -> String {
        match self {
            AvatarShape::Circle => format!("{}px", size / 2),
            AvatarShape::Square => "0px".to_string(),
            AvatarShape::Rounded => "8px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default)]
    pub shape: AvatarShape,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<AvatarProps>(BlockKind::Avatar)?;
    data.parse_style::<BlockStyle>(BlockKind::Avatar)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<AvatarProps>(BlockKind::Avatar)?;
    let style = data.parse_style::<BlockStyle>(BlockKind::Avatar)?;

    let size = props.size.unwrap_or(DEFAULT_SIZE);

    let mut img_style = StyleBuilder::new();
    img_style
        .push("width", format!("{size}px"))
        .push("height", format!("{size}px"))
        .push("border-radius", props.shape.border_radius_css(size))
        .push("object-fit", "cover")
        .push("vertical-align", "middle");

    let mut wrapper = StyleBuilder::new();
    wrapper.push_block_style(&style);

    Ok(format!(
        "<div{}><img src=\"{}\" alt=\"{}\" width=\"{size}\" height=\"{size}\"{}></div>",
        wrapper.to_attr(),
        escape_attr(props.image_url.as_deref().unwrap_or_default()),
        escape_attr(props.alt.as_deref().unwrap_or_default()),
        img_style.to_attr(),
    ))
}
