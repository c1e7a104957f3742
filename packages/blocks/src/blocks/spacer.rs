//! Spacer block: fixed vertical whitespace

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::kind::BlockKind;

const DEFAULT_HEIGHT: u32 = 16;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<SpacerProps>(BlockKind::Spacer)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<SpacerProps>(BlockKind::Spacer)?;
    let height = props.height.unwrap_or(DEFAULT_HEIGHT);
    Ok(format!("<div style=\"height:{height}px\"></div>"))
}
