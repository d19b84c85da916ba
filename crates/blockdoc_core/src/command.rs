//! Slash-command menu catalog and filtering.
//!
//! # Responsibility
//! - Declare the block types a user can pick from the command menu.
//! - Filter candidates by a free-text query.
//!
//! # Invariants
//! - Filtering never reorders candidates.
//! - An empty query matches every candidate.

use crate::model::block::BlockType;

/// One selectable entry in the command menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTypeOption {
    pub kind: BlockType,
    /// Matched against the query.
    pub title: &'static str,
    pub description: &'static str,
    /// Short glyph shown next to the title.
    pub icon: &'static str,
}

const BUILTIN_BLOCK_TYPE_OPTIONS: &[BlockTypeOption] = &[
    BlockTypeOption {
        kind: BlockType::Paragraph,
        title: "Text",
        description: "Just start writing with plain text.",
        icon: "T",
    },
    BlockTypeOption {
        kind: BlockType::Heading1,
        title: "Heading 1",
        description: "Large section heading.",
        icon: "H1",
    },
    BlockTypeOption {
        kind: BlockType::Heading2,
        title: "Heading 2",
        description: "Medium section heading.",
        icon: "H2",
    },
    BlockTypeOption {
        kind: BlockType::Heading3,
        title: "Heading 3",
        description: "Small section heading.",
        icon: "H3",
    },
    BlockTypeOption {
        kind: BlockType::BulletListItem,
        title: "Bulleted list",
        description: "Create a simple bulleted list.",
        icon: "•",
    },
    BlockTypeOption {
        kind: BlockType::NumberedListItem,
        title: "Numbered list",
        description: "Create a list with numbering.",
        icon: "1.",
    },
    BlockTypeOption {
        kind: BlockType::ToDoItem,
        title: "To-do list",
        description: "Track tasks with a to-do list.",
        icon: "☐",
    },
];

/// Returns the built-in command menu entries in display order.
pub fn builtin_block_type_options() -> &'static [BlockTypeOption] {
    BUILTIN_BLOCK_TYPE_OPTIONS
}

/// Keeps candidates whose title contains `query`, ignoring case.
pub fn command_filter(candidates: &[BlockTypeOption], query: &str) -> Vec<BlockTypeOption> {
    if query.is_empty() {
        return candidates.to_vec();
    }
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|option| option.title.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{builtin_block_type_options, command_filter};
    use crate::model::block::BlockType;

    #[test]
    fn catalog_has_seven_entries_starting_with_text() {
        let options = builtin_block_type_options();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0].kind, BlockType::Paragraph);
        assert_eq!(options[6].kind, BlockType::ToDoItem);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let hits = command_filter(builtin_block_type_options(), "LIST");
        let kinds: Vec<_> = hits.iter().map(|option| option.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockType::BulletListItem,
                BlockType::NumberedListItem,
                BlockType::ToDoItem
            ]
        );
    }

    #[test]
    fn filter_without_match_is_empty() {
        assert!(command_filter(builtin_block_type_options(), "table").is_empty());
    }
}
