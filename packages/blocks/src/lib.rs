//! # Email Builder Blocks
//!
//! Block schema library for the email builder.
//!
//! A document is a flat map of block id → block. Each block carries a kind
//! tag, typed props/style data, and (for containers) an ordered list of
//! child ids. This crate owns:
//!
//! - The document/block data model and its JSON wire format
//! - Per-kind prop and style schemas with serde-backed validation
//! - Per-kind static-HTML renderers (email-safe markup)
//! - The kind → {validator, renderer} dispatch table
//!
//! ## Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: id → Block { kind, data }         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ registry: kind → { validator, renderer }    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ blocks::*: typed schemas + HTML fragments   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Consumers never match on kind strings directly; dispatch goes through
//! [`BlockRegistry`].

pub mod blocks;
mod document;
mod errors;
mod escape;
mod kind;
mod registry;
mod style;

pub use document::{Block, BlockData, BlockId, Document, ROOT_BLOCK_ID};
pub use errors::BlockError;
pub use escape::{escape_attr, escape_text};
pub use kind::BlockKind;
pub use registry::{BlockHandler, BlockRegistry, RenderedChildren};
pub use style::{BlockStyle, FontFamily, FontWeight, Padding, StyleBuilder, TextAlign};
