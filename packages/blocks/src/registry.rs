//! # Block Registry
//!
//! Kind → {validator, renderer} dispatch table.
//!
//! Registration iterates [`BlockKind::ALL`] and matches exhaustively, so a
//! new kind without a handler is a compile error rather than a runtime
//! string-dispatch miss.

use std::collections::HashMap;

use crate::blocks::{
    avatar, button, container, divider, email_layout, heading, html, image, spacer, text,
};
use crate::document::{Block, BlockData};
use crate::errors::BlockError;
use crate::kind::BlockKind;

/// Children of a container, already rendered and wrapped by the walker
pub type RenderedChildren = [String];

pub type Validator = fn(&BlockData) -> Result<(), BlockError>;
pub type Renderer = fn(&BlockData, &RenderedChildren) -> Result<String, BlockError>;

/// Handler entry for one block kind
#[derive(Clone, Copy)]
pub struct BlockHandler {
    pub kind: BlockKind,
    pub validator: Validator,
    pub renderer: Renderer,
}

impl std::fmt::Debug for BlockHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockHandler")
            .field("kind", &self.kind)
            .finish()
    }
}

/// Dispatch table over all block kinds
#[derive(Debug)]
pub struct BlockRegistry {
    handlers: HashMap<BlockKind, BlockHandler>,
}

impl BlockRegistry {
    /// Registry covering the standard block set
    pub fn standard() -> Self {
        let mut handlers = HashMap::new();
        for kind in BlockKind::ALL {
            let (validator, renderer): (Validator, Renderer) = match kind {
                BlockKind::EmailLayout => (email_layout::validate, email_layout::render),
                BlockKind::Text => (text::validate, text::render),
                BlockKind::Heading => (heading::validate, heading::render),
                BlockKind::Button => (button::validate, button::render),
                BlockKind::Image => (image::validate, image::render),
                BlockKind::Avatar => (avatar::validate, avatar::render),
                BlockKind::Divider => (divider::validate, divider::render),
                BlockKind::Spacer => (spacer::validate, spacer::render),
                BlockKind::Html => (html::validate, html::render),
                BlockKind::Container => (container::validate, container::render),
            };
            handlers.insert(
                kind,
                BlockHandler {
                    kind,
                    validator,
                    renderer,
                },
            );
        }
        Self { handlers }
    }

    pub fn handler(&self, kind: BlockKind) -> Result<&BlockHandler, BlockError> {
        self.handlers
            .get(&kind)
            .ok_or_else(|| BlockError::UnknownKind(kind.to_string()))
    }

    /// Validate a block's data against its kind schema
    pub fn validate(&self, block: &Block) -> Result<(), BlockError> {
        let handler = self.handler(block.kind)?;
        (handler.validator)(&block.data)
    }

    /// Render a block to an HTML fragment
    pub fn render(&self, block: &Block, children: &RenderedChildren) -> Result<String, BlockError> {
        let handler = self.handler(block.kind)?;
        (handler.renderer)(&block.data, children)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
