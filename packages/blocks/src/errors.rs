//! Error types for the block library

use thiserror::Error;

use crate::kind::BlockKind;

#[derive(Error, Debug)]
pub enum BlockError {
    #[error("Invalid props for {kind} block: {source}")]
    InvalidProps {
        kind: BlockKind,
        source: serde_json::Error,
    },

    #[error("Invalid style for {kind} block: {source}")]
    InvalidStyle {
        kind: BlockKind,
        source: serde_json::Error,
    },

    #[error("Unknown block kind: {0}")]
    UnknownKind(String),
}
