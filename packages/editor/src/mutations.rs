//! # Document Mutations
//!
//! High-level semantic operations on the block tree.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation represents one editing gesture
//!    (the add-menu and tune-menu operations)
//! 2. **Validated**: structural constraints are checked before any change
//! 3. **Consistent**: removal also strips the id from every `childrenIds`
//!    sequence, so no mutation can introduce a dangling reference
//!
//! ## Mutation Semantics
//!
//! ### InsertBlock
//! - New id must be unused; parent must be a container
//! - Index is clamped to the sibling count
//!
//! ### DuplicateBlock
//! - Deep copy: descendants are cloned with fresh ids
//! - Copy lands immediately after the original
//!
//! ### RemoveBlock
//! - Removes the block and all descendants
//! - Strips the id from every container's child list
//!
//! ### MoveBlockUp / MoveBlockDown
//! - Swap with the neighboring sibling; no-op at the boundary

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use emailbuilder_blocks::{Block, BlockData, BlockId, Document, ROOT_BLOCK_ID};

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new block under a container at index
    InsertBlock {
        parent_id: BlockId,
        index: usize,
        block_id: BlockId,
        block: Block,
    },

    /// Deep-copy a block (and descendants) next to itself
    DuplicateBlock { block_id: BlockId },

    /// Remove a block and its descendants
    RemoveBlock { block_id: BlockId },

    /// Swap a block with its previous sibling
    MoveBlockUp { block_id: BlockId },

    /// Swap a block with its next sibling
    MoveBlockDown { block_id: BlockId },

    /// Replace a block's data payload (kind unchanged)
    UpdateBlockData { block_id: BlockId, data: BlockData },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Block is not a container: {0}")]
    NotAContainer(String),

    #[error("Block id already in use: {0}")]
    DuplicateBlockId(String),

    #[error("Child reference does not resolve: {0}")]
    DanglingChildReference(String),

    #[error("The root layout cannot be moved, duplicated, or removed")]
    RootImmovable,

    #[error("Block has no parent: {0}")]
    NoParent(String),
}

impl Mutation {
    /// Validate without applying
    pub fn validate(&self, document: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock {
                parent_id,
                block_id,
                block,
                ..
            } => {
                let parent = document
                    .get(parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                if !parent.kind.is_container() {
                    return Err(MutationError::NotAContainer(parent_id.clone()));
                }
                if document.contains(block_id) {
                    return Err(MutationError::DuplicateBlockId(block_id.clone()));
                }
                if let Some(children) = &block.data.children_ids {
                    for child_id in children {
                        if !document.contains(child_id) {
                            return Err(MutationError::DanglingChildReference(child_id.clone()));
                        }
                    }
                }
                Ok(())
            }

            Mutation::DuplicateBlock { block_id }
            | Mutation::MoveBlockUp { block_id }
            | Mutation::MoveBlockDown { block_id } => {
                if block_id == ROOT_BLOCK_ID {
                    return Err(MutationError::RootImmovable);
                }
                if !document.contains(block_id) {
                    return Err(MutationError::BlockNotFound(block_id.clone()));
                }
                find_parent(document, block_id)
                    .map(|_| ())
                    .ok_or_else(|| MutationError::NoParent(block_id.clone()))
            }

            Mutation::RemoveBlock { block_id } => {
                if block_id == ROOT_BLOCK_ID {
                    return Err(MutationError::RootImmovable);
                }
                if !document.contains(block_id) {
                    return Err(MutationError::BlockNotFound(block_id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateBlockData { block_id, .. } => {
                if !document.contains(block_id) {
                    return Err(MutationError::BlockNotFound(block_id.clone()));
                }
                Ok(())
            }
        }
    }

    /// Apply to the document with validation
    pub fn apply(&self, document: &mut Document) -> Result<(), MutationError> {
        self.validate(document)?;

        match self {
            Mutation::InsertBlock {
                parent_id,
                index,
                block_id,
                block,
            } => {
                document.insert(block_id.clone(), block.clone());
                let parent = document
                    .get_mut(parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                let children = parent.data.children_ids.get_or_insert_with(Vec::new);
                let insert_index = (*index).min(children.len());
                children.insert(insert_index, block_id.clone());
                Ok(())
            }

            Mutation::DuplicateBlock { block_id } => {
                let (parent_id, position) = find_parent(document, block_id)
                    .ok_or_else(|| MutationError::NoParent(block_id.clone()))?;

                let mut allocator = IdAllocator::new(document);
                let copy_id = clone_subtree(document, block_id, &mut allocator)?;

                let parent = document
                    .get_mut(&parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                if let Some(children) = &mut parent.data.children_ids {
                    children.insert(position + 1, copy_id);
                }
                Ok(())
            }

            Mutation::RemoveBlock { block_id } => {
                for id in collect_subtree(document, block_id) {
                    document.remove(&id);
                }
                strip_child_references(document, block_id);
                Ok(())
            }

            Mutation::MoveBlockUp { block_id } => {
                let (parent_id, position) = find_parent(document, block_id)
                    .ok_or_else(|| MutationError::NoParent(block_id.clone()))?;
                if position > 0 {
                    if let Some(parent) = document.get_mut(&parent_id) {
                        if let Some(children) = &mut parent.data.children_ids {
                            children.swap(position - 1, position);
                        }
                    }
                }
                Ok(())
            }

            Mutation::MoveBlockDown { block_id } => {
                let (parent_id, position) = find_parent(document, block_id)
                    .ok_or_else(|| MutationError::NoParent(block_id.clone()))?;
                if let Some(parent) = document.get_mut(&parent_id) {
                    if let Some(children) = &mut parent.data.children_ids {
                        if position + 1 < children.len() {
                            children.swap(position, position + 1);
                        }
                    }
                }
                Ok(())
            }

            Mutation::UpdateBlockData { block_id, data } => {
                let block = document
                    .get_mut(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                block.data = data.clone();
                Ok(())
            }
        }
    }
}

/// Locate the container holding `block_id` and its position in the child list
pub fn find_parent(document: &Document, block_id: &str) -> Option<(BlockId, usize)> {
    for (id, block) in document.iter() {
        if let Some(children) = &block.data.children_ids {
            if let Some(position) = children.iter().position(|child| child == block_id) {
                return Some((id.clone(), position));
            }
        }
    }
    None
}

/// Ids of a block and all its descendants, depth-first
pub fn collect_subtree(document: &Document, block_id: &str) -> Vec<BlockId> {
    let mut ids = Vec::new();
    let mut stack = vec![block_id.to_string()];
    let mut seen = HashSet::new();

    while let Some(id) = stack.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        if let Some(children) = document.children_of(&id) {
            stack.extend(children.iter().cloned());
        }
        ids.push(id);
    }

    ids
}

fn strip_child_references(document: &mut Document, block_id: &str) {
    let container_ids: Vec<BlockId> = document
        .iter()
        .filter(|(_, block)| block.data.children_ids.is_some())
        .map(|(id, _)| id.clone())
        .collect();

    for id in container_ids {
        if let Some(block) = document.get_mut(&id) {
            if let Some(children) = &mut block.data.children_ids {
                children.retain(|child| child != block_id);
            }
        }
    }
}

/// Allocates `block-{n}` ids that collide with nothing already present
struct IdAllocator {
    used: HashSet<BlockId>,
    next: usize,
}

impl IdAllocator {
    fn new(document: &Document) -> Self {
        Self {
            used: document.ids().cloned().collect(),
            next: 1,
        }
    }

    fn fresh(&mut self) -> BlockId {
        loop {
            let candidate = format!("block-{}", self.next);
            self.next += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Deep-copy a subtree, returning the id of the copied root
fn clone_subtree(
    document: &mut Document,
    block_id: &str,
    allocator: &mut IdAllocator,
) -> Result<BlockId, MutationError> {
    let mut block = document
        .get(block_id)
        .cloned()
        .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;

    if let Some(children) = block.data.children_ids.take() {
        let mut copied_children = Vec::with_capacity(children.len());
        for child_id in &children {
            copied_children.push(clone_subtree(document, child_id, allocator)?);
        }
        block.data.children_ids = Some(copied_children);
    }

    let copy_id = allocator.fresh();
    document.insert(copy_id.clone(), block);
    Ok(copy_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emailbuilder_blocks::BlockKind;

    fn text_block() -> Block {
        Block {
            kind: BlockKind::Text,
            data: BlockData::default(),
        }
    }

    fn document_with_children(ids: &[&str]) -> Document {
        let mut document = Document::empty_layout();
        for id in ids {
            document.insert(id.to_string(), text_block());
        }
        if let Some(root) = document.get_mut(ROOT_BLOCK_ID) {
            root.data.children_ids = Some(ids.iter().map(|id| id.to_string()).collect());
        }
        document
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut document = Document::empty_layout();
        let mutation = Mutation::InsertBlock {
            parent_id: ROOT_BLOCK_ID.to_string(),
            index: 99,
            block_id: "b1".to_string(),
            block: text_block(),
        };
        mutation.apply(&mut document).unwrap();
        assert_eq!(document.children_of("root"), Some(&["b1".to_string()][..]));
    }

    #[test]
    fn test_insert_into_non_container_fails() {
        let mut document = document_with_children(&["b1"]);
        let mutation = Mutation::InsertBlock {
            parent_id: "b1".to_string(),
            index: 0,
            block_id: "b2".to_string(),
            block: text_block(),
        };
        assert_eq!(
            mutation.apply(&mut document),
            Err(MutationError::NotAContainer("b1".to_string()))
        );
    }

    #[test]
    fn test_remove_strips_child_reference() {
        let mut document = document_with_children(&["b1", "b2"]);
        Mutation::RemoveBlock {
            block_id: "b1".to_string(),
        }
        .apply(&mut document)
        .unwrap();

        assert!(!document.contains("b1"));
        assert_eq!(document.children_of("root"), Some(&["b2".to_string()][..]));
    }

    #[test]
    fn test_remove_root_rejected() {
        let mut document = Document::empty_layout();
        assert_eq!(
            Mutation::RemoveBlock {
                block_id: ROOT_BLOCK_ID.to_string(),
            }
            .apply(&mut document),
            Err(MutationError::RootImmovable)
        );
    }

    #[test]
    fn test_move_up_and_boundary() {
        let mut document = document_with_children(&["b1", "b2"]);

        Mutation::MoveBlockUp {
            block_id: "b2".to_string(),
        }
        .apply(&mut document)
        .unwrap();
        assert_eq!(
            document.children_of("root"),
            Some(&["b2".to_string(), "b1".to_string()][..])
        );

        // Already first: no-op
        Mutation::MoveBlockUp {
            block_id: "b2".to_string(),
        }
        .apply(&mut document)
        .unwrap();
        assert_eq!(
            document.children_of("root"),
            Some(&["b2".to_string(), "b1".to_string()][..])
        );
    }

    #[test]
    fn test_duplicate_lands_after_original() {
        let mut document = document_with_children(&["b1", "b2"]);
        Mutation::DuplicateBlock {
            block_id: "b1".to_string(),
        }
        .apply(&mut document)
        .unwrap();

        let children = document.children_of("root").unwrap();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], "b1");
        assert_ne!(children[1], "b2");
        assert_eq!(children[2], "b2");
        assert!(document.contains(&children[1]));
    }

    #[test]
    fn test_duplicate_container_copies_descendants() {
        let mut document = document_with_children(&["c1"]);
        document.insert(
            "c1".to_string(),
            Block {
                kind: BlockKind::Container,
                data: BlockData {
                    children_ids: Some(vec!["t1".to_string()]),
                    ..Default::default()
                },
            },
        );
        document.insert("t1".to_string(), text_block());

        Mutation::DuplicateBlock {
            block_id: "c1".to_string(),
        }
        .apply(&mut document)
        .unwrap();

        let children = document.children_of("root").unwrap().to_vec();
        assert_eq!(children.len(), 2);
        let copy_id = &children[1];
        let copied_children = document.children_of(copy_id).unwrap();
        assert_eq!(copied_children.len(), 1);
        assert_ne!(copied_children[0], "t1");
        assert!(document.contains(&copied_children[0]));
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::RemoveBlock {
            block_id: "b1".to_string(),
        };
        let json = serde_json::to_string(&mutation).unwrap();
        let back: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, back);
    }
}
