//! Html block: raw markup passthrough
//!
//! `contents` is emitted verbatim. This is the import target for
//! markup-based template imports.

use serde::{Deserialize, Serialize};

use crate::document::BlockData;
use crate::errors::BlockError;
use crate::kind::BlockKind;
use crate::style::{BlockStyle, StyleBuilder};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

pub fn validate(data: &BlockData) -> Result<(), BlockError> {
    data.parse_props::<HtmlProps>(BlockKind::Html)?;
    data.parse_style::<BlockStyle>(BlockKind::Html)?;
    Ok(())
}

pub fn render(data: &BlockData, _children: &[String]) -> Result<String, BlockError> {
    let props = data.parse_props::<HtmlProps>(BlockKind::Html)?;
    let style = data.parse_style::<BlockStyle>(BlockKind::Html)?;

    let mut wrapper = StyleBuilder::new();
    wrapper.push_block_style(&style);

    Ok(format!(
        "<div{}>{}</div>",
        wrapper.to_attr(),
        props.contents.as_deref().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_not_escaped() {
        let data: BlockData =
            serde_json::from_str(r#"{ "props": { "contents": "<table><tr></tr></table>" } }"#)
                .unwrap();
        let html = render(&data, &[]).unwrap();
        assert!(html.contains("<table><tr></tr></table>"));
    }
}
