//! Per-kind block schemas and renderers
//!
//! Each module defines the typed props for one block kind, a `validate`
//! entry point (serde round-trip of the stored data), and a `render` entry
//! point producing an email-safe HTML fragment. Container renderers receive
//! their children already rendered and wrapped.

pub mod avatar;
pub mod button;
pub mod container;
pub mod divider;
pub mod email_layout;
pub mod heading;
pub mod html;
pub mod image;
pub mod spacer;
pub mod text;
