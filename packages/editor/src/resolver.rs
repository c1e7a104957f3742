//! # Editor Block Resolver
//!
//! Resolves a block id to rendered markup through the registry.
//!
//! A missing id is a fatal [`ResolveError::MissingBlock`]: it means a
//! container holds a dangling child reference, which no mutation can
//! produce. The caller imported or assembled a broken document.
//!
//! Two modes:
//! - **Edit**: children are wrapped in interactive wrappers carrying
//!   `data-block-id` / selection attributes, a tune-menu slot on the
//!   selected block, and add-block affordances interleaved between
//!   siblings.
//! - **Preview**: children are wrapped in a layout-only reader wrapper;
//!   no affordances, no interactivity.

use thiserror::Error;

use emailbuilder_blocks::{
    BlockError, BlockId, BlockRegistry, Document, StyleBuilder, ROOT_BLOCK_ID,
};

/// Outline color of the interactive wrapper
const SELECTION_OUTLINE: &str = "2px solid rgba(0,121,204,1)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Edit,
    Preview,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// Dangling child reference; a data-consistency bug upstream
    #[error("Could not find block: {0}")]
    MissingBlock(BlockId),

    #[error(transparent)]
    Block(#[from] BlockError),
}

/// Renders blocks out of a document snapshot
pub struct EditorResolver<'a> {
    document: &'a Document,
    registry: &'a BlockRegistry,
    mode: RenderMode,
    selected_block_id: Option<BlockId>,
    root_radius: u32,
}

impl<'a> EditorResolver<'a> {
    pub fn new(document: &'a Document, registry: &'a BlockRegistry) -> Self {
        let root_radius = document
            .root()
            .and_then(|root| root.data.extra.get("borderRadius"))
            .and_then(|value| value.as_u64())
            .unwrap_or(0) as u32;

        Self {
            document,
            registry,
            mode: RenderMode::Edit,
            selected_block_id: None,
            root_radius,
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_selection(mut self, selected_block_id: Option<BlockId>) -> Self {
        self.selected_block_id = selected_block_id;
        self
    }

    /// Resolve the root layout
    pub fn resolve_root(&self) -> Result<String, ResolveError> {
        self.resolve(ROOT_BLOCK_ID)
    }

    /// Resolve one block id to markup
    pub fn resolve(&self, id: &str) -> Result<String, ResolveError> {
        let block = self
            .document
            .get(id)
            .ok_or_else(|| ResolveError::MissingBlock(id.to_string()))?;

        let children = match block.data.children_ids.as_deref() {
            Some(child_ids) => self.resolve_children(id, child_ids)?,
            None => Vec::new(),
        };

        Ok(self.registry.render(block, &children)?)
    }

    fn resolve_children(
        &self,
        parent_id: &str,
        child_ids: &[BlockId],
    ) -> Result<Vec<String>, ResolveError> {
        let mut rendered = Vec::new();

        if child_ids.is_empty() {
            if self.mode == RenderMode::Edit {
                rendered.push(format!(
                    "<div data-add-block=\"{parent_id}:0\" data-placeholder=\"true\"></div>"
                ));
            }
            return Ok(rendered);
        }

        for (index, child_id) in child_ids.iter().enumerate() {
            if self.mode == RenderMode::Edit {
                rendered.push(format!("<div data-add-block=\"{parent_id}:{index}\"></div>"));
            }
            let inner = self.resolve(child_id)?;
            rendered.push(self.wrap_child(child_id, inner));
        }
        if self.mode == RenderMode::Edit {
            rendered.push(format!(
                "<div data-add-block=\"{parent_id}:{}\"></div>",
                child_ids.len()
            ));
        }

        Ok(rendered)
    }

    fn wrap_child(&self, child_id: &str, inner: String) -> String {
        let mut style = StyleBuilder::new();
        style.push("position", "relative").push("max-width", "100%");
        self.push_corner_styles(child_id, &mut style);

        match self.mode {
            RenderMode::Preview => {
                format!("<div{}>{inner}</div>", style.to_attr())
            }
            RenderMode::Edit => {
                let selected = self.selected_block_id.as_deref() == Some(child_id);
                if selected {
                    style.push("outline", SELECTION_OUTLINE).push("outline-offset", "-1px");
                }
                let tune_menu = if selected {
                    format!("<div data-tune-menu=\"{child_id}\"></div>")
                } else {
                    String::new()
                };
                format!(
                    "<div data-block-id=\"{child_id}\" data-selected=\"{selected}\"{}>{inner}{tune_menu}</div>",
                    style.to_attr(),
                )
            }
        }
    }

    /// First/last root children inherit the canvas corner radius
    fn push_corner_styles(&self, child_id: &str, style: &mut StyleBuilder) {
        if self.root_radius == 0 {
            return;
        }
        let Some(root_children) = self.document.children_of(ROOT_BLOCK_ID) else {
            return;
        };
        let is_first = root_children.first().map(String::as_str) == Some(child_id);
        let is_last = root_children.last().map(String::as_str) == Some(child_id);
        if !is_first && !is_last {
            return;
        }

        let radius = format!("{}px", self.root_radius);
        if is_first {
            style.push("border-top-left-radius", &radius);
            style.push("border-top-right-radius", &radius);
        }
        if is_last {
            style.push("border-bottom-left-radius", &radius);
            style.push("border-bottom-right-radius", &radius);
        }
        style.push("overflow", "hidden");
    }
}
