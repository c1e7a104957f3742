//! Text block: a paragraph of plain text

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::escape::escape_text;
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<TextProps>(BlockKind::Text)?;
    data.parse_style::<BlockStyle>(BlockKind::Text)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<TextProps>(BlockKind::Text)?;
    let style = data.parse_style::<BlockStyle>(BlockKind::Text)?;

    let mut builder = StyleBuilder::new();
    builder.push("white-space", "pre-wrap").push_block_style(&style);

    Ok(format!(
        "<div{}>{}</div>",
        builder.to_attr(),
        escape_text(props.text.as_deref().unwrap_or_default()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let data: BlockData =
            serde_json::from_str(r#"{ "props": { "text": "<b>&</b>" } }"#).unwrap();
        let html = render(&data, &[]).unwrap();
        assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_invalid_props_rejected() {
        let data: BlockData = serde_json::from_str(r#"{ "props": { "text": 42 } }"#).unwrap();
        assert!(matches!(
            validate(&data),
            Err(BlockError::InvalidProps { .. })
        ));
    }
}
