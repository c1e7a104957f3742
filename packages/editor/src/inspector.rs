//! # Inspector Layer
//!
//! Headless property-panel controller for the selected block.
//!
//! The contract per panel is `(data, set_data)`: a candidate payload must
//! round-trip through the block kind's own validation before it is merged
//! into the store. Invalid payloads never reach the store; the previous
//! value stays in place and the error is returned for inline display.

use std::rc::Rc;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use emailbuilder_blocks::{BlockData, BlockError, BlockId, BlockKind, BlockRegistry, Document};

use crate::store::{EditOrigin, EditorStore};

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("No block under edit: {0}")]
    NoSuchBlock(String),

    #[error("Rejected by block validation: {0}")]
    Validation(#[from] BlockError),

    #[error("{kind} block has no {field} reference")]
    UnsupportedUploadTarget { kind: BlockKind, field: &'static str },
}

/// Snapshot handed to a panel renderer
#[derive(Debug, Clone)]
pub struct Panel {
    pub block_id: BlockId,
    pub kind: BlockKind,
    pub data: BlockData,
}

/// Translates panel edits into scoped store merges
pub struct Inspector {
    store: Rc<EditorStore>,
    registry: Rc<BlockRegistry>,
}

impl Inspector {
    pub fn new(store: Rc<EditorStore>, registry: Rc<BlockRegistry>) -> Self {
        Self { store, registry }
    }

    /// Panel for the current selection; `None` when nothing is selected
    /// (closed inspector renders nothing).
    pub fn open_panel(&self) -> Option<Panel> {
        let block_id = self.store.selected_block_id()?;
        let document = self.store.document();
        let block = document.get(&block_id)?;
        Some(Panel {
            block_id: block_id.clone(),
            kind: block.kind,
            data: block.data.clone(),
        })
    }

    /// The panel's `set_data`: validate, then merge scoped to this block
    pub fn apply_edit(&self, block_id: &str, candidate: BlockData) -> Result<(), PanelError> {
        let document = self.store.document();
        let block = document
            .get(block_id)
            .ok_or_else(|| PanelError::NoSuchBlock(block_id.to_string()))?;

        let mut updated = block.clone();
        updated.data = candidate;

        if let Err(error) = self.registry.validate(&updated) {
            debug!(block_id, %error, "panel edit rejected");
            return Err(error.into());
        }

        let partial: Document = [(block_id.to_string(), updated)].into_iter().collect();
        self.store.set_document_with(EditOrigin::User, partial);
        Ok(())
    }

    /// Merge a completed upload's reference into the block's props.
    ///
    /// Only called on success; a failed upload never touches the store.
    pub fn complete_upload(&self, block_id: &str, url: &str) -> Result<(), PanelError> {
        let document = self.store.document();
        let block = document
            .get(block_id)
            .ok_or_else(|| PanelError::NoSuchBlock(block_id.to_string()))?;

        let field = match block.kind {
            BlockKind::Image => "url",
            BlockKind::Avatar => "imageUrl",
            kind => {
                return Err(PanelError::UnsupportedUploadTarget {
                    kind,
                    field: "image",
                })
            }
        };

        let mut candidate = block.data.clone();
        let props = candidate
            .props
            .get_or_insert_with(|| Value::Object(Default::default()));
        if let Some(object) = props.as_object_mut() {
            object.insert(field.to_string(), Value::from(url));
        }

        self.apply_edit(block_id, candidate)
    }
}
