//! # Static Markup Compiler
//!
//! Compiles an email document to a standalone email-safe HTML page.
//!
//! This is the export path: every document change in the host recomputes
//! this rendering, and the result is what `getHtml()` hands back to the
//! embedding page. Rendering is reader-mode only; no editing affordances
//! ever appear in exported markup.

mod compiler;


pub use compiler::{render_to_static_markup, CompileError, CompileOptions};
