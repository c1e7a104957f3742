//! Block kind tags
//!
//! The `type` discriminant of the wire format. The enum is closed: an
//! unknown tag fails deserialization instead of producing an untyped block.

use serde::{Deserialize, Serialize};

/// Block kind discriminant (`type` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    EmailLayout,
    Text,
    Heading,
    Button,
    Image,
    Avatar,
    Divider,
    Spacer,
    Html,
    Container,
}

impl BlockKind {
    /// All kinds, in registration order
    pub const ALL: [BlockKind; 10] = [
        BlockKind::EmailLayout,
        BlockKind::Text,
        BlockKind::Heading,
        BlockKind::Button,
        BlockKind::Image,
        BlockKind::Avatar,
        BlockKind::Divider,
        BlockKind::Spacer,
        BlockKind::Html,
        BlockKind::Container,
    ];

    /// Container kinds hold an ordered `childrenIds` sequence
    pub fn is_container(self) -> bool {
        matches!(self, BlockKind::EmailLayout | BlockKind::Container)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::EmailLayout => "EmailLayout",
            BlockKind::Text => "Text",
            BlockKind::Heading => "Heading",
            BlockKind::Button => "Button",
            BlockKind::Image => "Image",
            BlockKind::Avatar => "Avatar",
            BlockKind::Divider => "Divider",
            BlockKind::Spacer => "Spacer",
            BlockKind::Html => "Html",
            BlockKind::Container => "Container",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags_round_trip() {
        for kind in BlockKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: BlockKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result = serde_json::from_str::<BlockKind>("\"Carousel\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_container_kinds() {
        assert!(BlockKind::EmailLayout.is_container());
        assert!(BlockKind::Container.is_container());
        assert!(!BlockKind::Text.is_container());
        assert!(!BlockKind::Html.is_container());
    }
}
