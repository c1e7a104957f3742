//! Container block: a nested layout grouping its children vertically
//!
//! Like `EmailLayout`, children live in `childrenIds` on `data`.

use serde::{Deserialize, Serialize};

use crate::document::{BlockData, BlockId};
use crate::errors::BlockError;
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BlockStyle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_ids: Option<Vec<BlockId>>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_flat::<ContainerData>(BlockKind::Container)?;
    Ok(())
}

pub fn render(data: &BlockData, children: &[String]) -> Result<String, BlockError> {
    let container = data.parse_flat::<ContainerData>(BlockKind::Container)?;

    let mut wrapper = StyleBuilder::new();
    if let Some(style) = &container.style {
        wrapper.push_block_style(style);
    }

    Ok(format!(
        "<div{}>{}</div>",
        wrapper.to_attr(),
        children.concat(),
    ))
}
