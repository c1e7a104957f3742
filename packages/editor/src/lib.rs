//! # Email Builder Editor
//!
//! Document store and editing protocol for the email builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: schemas + renderers                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: store + mutations + resolver        │
//! │  - Single source of truth (tree + selection)│
//! │  - Synchronous subscriber notification      │
//! │  - Validated semantic mutations             │
//! │  - Edit/preview block resolution            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: import/export + event emission        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is the source of truth**: rendered markup and cached
//!    exports are derived views
//! 2. **Explicit origin**: every mutation carries a user/programmatic tag
//!    so change events can be attributed without flag races
//! 3. **Decoupled channels**: document content and selection notify
//!    independently, so selecting a block never forces a full re-render
//! 4. **No structural validation in the store**: schemas are enforced at
//!    the panel/import boundaries, dangling references are caller bugs
//!
//! ## Usage
//!
//! ```rust
//! use emailbuilder_editor::{EditOrigin, EditorStore, Mutation};
//! use emailbuilder_blocks::{Block, BlockData, BlockKind};
//!
//! let store = EditorStore::new();
//!
//! let block = Block { kind: BlockKind::Text, data: BlockData::default() };
//! store.apply(
//!     EditOrigin::User,
//!     &Mutation::InsertBlock {
//!         parent_id: "root".to_string(),
//!         index: 0,
//!         block_id: "block-1".to_string(),
//!         block,
//!     },
//! ).unwrap();
//!
//! assert!(store.document().contains("block-1"));
//! ```

mod inspector;
mod mutations;
mod resolver;
mod store;

pub use inspector::{Inspector, Panel, PanelError};
pub use mutations::{Mutation, MutationError};
pub use resolver::{EditorResolver, RenderMode, ResolveError};
pub use store::{DocumentChange, EditOrigin, EditorStore, SubscriptionId};

// Re-export common types for convenience
pub use emailbuilder_blocks::{Block, BlockData, BlockId, BlockKind, Document, ROOT_BLOCK_ID};
