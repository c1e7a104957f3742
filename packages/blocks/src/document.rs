//! # Block Document
//!
//! Flat-map document model: block id → block.
//!
//! The distinguished id `root` is always present in a well-formed document
//! and carries the `EmailLayout` block. Display order is defined by the
//! `childrenIds` sequence inside each container block's data; insertion
//! order of the map only affects serialization (the map is ordered so
//! exports are deterministic).

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::BlockError;
use crate::kind::BlockKind;

/// Distinguished root block id
pub const ROOT_BLOCK_ID: &str = "root";

/// Block identifier (string key of the document map)
pub type BlockId = String;

/// One node of the email document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Kind discriminant, selects schema and renderer
    #[serde(rename = "type")]
    pub kind: BlockKind,

    /// Props, style, and (for containers) child ids
    pub data: BlockData,
}

/// Payload of a block
///
/// Most kinds keep their fields under `props`/`style`. `EmailLayout` stores
/// its fields flat on `data` (wire compatibility), so unrecognized keys are
/// kept in `extra` rather than dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,

    #[serde(rename = "childrenIds", default, skip_serializing_if = "Option::is_none")]
    pub children_ids: Option<Vec<BlockId>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlockData {
    /// Deserialize `props` into a typed schema (missing props → defaults)
    pub fn parse_props<T>(&self, kind: BlockKind) -> Result<T, BlockError>
    where
        T: DeserializeOwned + Default,
    {
        match &self.props {
            None => Ok(T::default()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|source| BlockError::InvalidProps { kind, source }),
        }
    }

    /// Deserialize `style` into a typed schema (missing style → defaults)
    pub fn parse_style<T>(&self, kind: BlockKind) -> Result<T, BlockError>
    where
        T: DeserializeOwned + Default,
    {
        match &self.style {
            None => Ok(T::default()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|source| BlockError::InvalidStyle { kind, source }),
        }
    }

    /// Deserialize the whole data payload (flat layout schemas)
    pub fn parse_flat<T>(&self, kind: BlockKind) -> Result<T, BlockError>
    where
        T: DeserializeOwned,
    {
        let value = serde_json::to_value(self)
            .map_err(|source| BlockError::InvalidProps { kind, source })?;
        serde_json::from_value(value).map_err(|source| BlockError::InvalidProps { kind, source })
    }
}

/// Email document: mapping from block id to block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: IndexMap<BlockId, Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty layout: a root `EmailLayout` with no children and the stock
    /// backdrop/canvas/text/font defaults.
    pub fn empty_layout() -> Self {
        let mut doc = Self::new();
        doc.insert(ROOT_BLOCK_ID.to_string(), empty_layout_root());
        doc
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn insert(&mut self, id: BlockId, block: Block) -> Option<Block> {
        self.blocks.insert(id, block)
    }

    pub fn remove(&mut self, id: &str) -> Option<Block> {
        self.blocks.shift_remove(id)
    }

    pub fn root(&self) -> Option<&Block> {
        self.get(ROOT_BLOCK_ID)
    }

    /// Child ids of a container block (None if absent or not a container)
    pub fn children_of(&self, id: &str) -> Option<&[BlockId]> {
        self.get(id)
            .and_then(|block| block.data.children_ids.as_deref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.blocks.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockId, &Block)> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Shallow-merge: entries of `partial` replace/add by id, other entries
    /// are untouched.
    pub fn merge(&mut self, partial: Document) {
        for (id, block) in partial.blocks {
            self.blocks.insert(id, block);
        }
    }
}

impl FromIterator<(BlockId, Block)> for Document {
    fn from_iter<I: IntoIterator<Item = (BlockId, Block)>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

fn empty_layout_root() -> Block {
    use crate::blocks::email_layout;

    let mut extra = Map::new();
    extra.insert(
        "backdropColor".into(),
        email_layout::DEFAULT_BACKDROP_COLOR.into(),
    );
    extra.insert(
        "canvasColor".into(),
        email_layout::DEFAULT_CANVAS_COLOR.into(),
    );
    extra.insert("textColor".into(), email_layout::DEFAULT_TEXT_COLOR.into());
    extra.insert("fontFamily".into(), "MODERN_SANS".into());

    Block {
        kind: BlockKind::EmailLayout,
        data: BlockData {
            props: None,
            style: None,
            children_ids: Some(Vec::new()),
            extra,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_layout_shape() {
        let doc = Document::empty_layout();
        let root = doc.root().expect("root present");
        assert_eq!(root.kind, BlockKind::EmailLayout);
        assert_eq!(root.data.children_ids.as_deref(), Some(&[][..]));
        assert_eq!(
            root.data.extra.get("backdropColor"),
            Some(&Value::from("#F5F5F5"))
        );
    }

    #[test]
    fn test_wire_round_trip() {
        let json = r##"{
            "root": {
                "type": "EmailLayout",
                "data": { "backdropColor": "#EEEEEE", "childrenIds": ["b1"] }
            },
            "b1": {
                "type": "Text",
                "data": { "props": { "text": "hi" } }
            }
        }"##;

        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.children_of("root"), Some(&["b1".to_string()][..]));
        assert_eq!(
            doc.get("root").unwrap().data.extra.get("backdropColor"),
            Some(&Value::from("#EEEEEE"))
        );

        let back = serde_json::to_value(&doc).unwrap();
        let reparsed: Document = serde_json::from_value(back).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut doc = Document::empty_layout();
        let text = Block {
            kind: BlockKind::Text,
            data: BlockData::default(),
        };
        let partial: Document = [("b1".to_string(), text.clone())].into_iter().collect();
        doc.merge(partial);

        assert!(doc.contains("b1"));
        // root untouched by the merge
        assert_eq!(doc.root().unwrap().kind, BlockKind::EmailLayout);
    }

    #[test]
    fn test_unknown_block_type_rejected() {
        let json = r#"{ "root": { "type": "Carousel", "data": {} } }"#;
        assert!(serde_json::from_str::<Document>(json).is_err());
    }
}
