//! Divider block: a horizontal rule

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<u32>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<DividerProps>(BlockKind::Divider)?;
    data.parse_style::<BlockStyle>(BlockKind::Divider)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<DividerProps>(BlockKind::Divider)?;
    let style = data.parse_style::<BlockStyle>(BlockKind::Divider)?;

    let color = props.line_color.as_deref().unwrap_or("#EEEEEE");
    let height = props.line_height.unwrap_or(1);

    let mut wrapper = StyleBuilder::new();
    wrapper.push_block_style(&style);

    Ok(format!(
        "<div{}><hr style=\"border:none;border-top:{height}px solid {color};margin:0\"></div>",
        wrapper.to_attr(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule() {
        let html = render(&BlockData::default(), &[]).unwrap();
        assert!(html.contains("border-top:1px solid #EEEEEE"));
    }
}
