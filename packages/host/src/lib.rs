//! # Host Bridge
//!
//! The sole integration surface between the editor store and an embedding
//! host. Owns import/export and event emission, so nothing else in the
//! system ever talks to the host directly.
//!
//! ## Surface
//!
//! Mirrors the embeddable element contract:
//!
//! - `set_html(markup)`: import raw markup as a single-block document
//! - `set_document_config(config)`: import a structured configuration
//! - `import_template(value)`: disambiguate between the two
//! - `get_html()` / `get_document()`: cached readback of the last export
//! - Events: ready (once, on mount) and content-change (every document
//!   change, tagged with its origin)
//!
//! Imports issued before mount are queued and flushed on mount. Invalid
//! configurations are ignored apart from a diagnostic; nothing here
//! surfaces an error to the embedding page.

mod bridge;
mod config;

pub use bridge::{EditorHost, HostEvent, ImportOutcome, ListenerId};
pub use config::{
    empty_document, is_valid_configuration, parse_configuration, synthetic_html_document,
    IMPORTED_HTML_BLOCK_ID,
};
