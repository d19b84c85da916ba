//! Block domain model.
//!
//! # Responsibility
//! - Define the canonical record for one addressable unit of content.
//! - Own the closed block type enumeration and its stable external names.
//!
//! # Invariants
//! - `id` is stable and never reused for another block.
//! - `id` is never the nil UUID.
//! - `children` stays empty; nesting is reserved and not modelled.
//!
//! # See also
//! - `crate::model::document` for sequence-level invariants.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every block.
pub type BlockId = Uuid;

/// Closed set of block kinds a document can hold.
///
/// Serialized with kebab-case names (`heading-1`, `to-do-item`, ...), which
/// are also the values accepted by [`BlockType::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    Heading2,
    #[serde(rename = "heading-3")]
    Heading3,
    #[serde(rename = "bullet-list-item")]
    BulletListItem,
    #[serde(rename = "numbered-list-item")]
    NumberedListItem,
    #[serde(rename = "to-do-item")]
    ToDoItem,
    #[serde(rename = "quote")]
    Quote,
    #[serde(rename = "divider")]
    Divider,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "code")]
    Code,
}

const ALL_BLOCK_TYPES: &[BlockType] = &[
    BlockType::Paragraph,
    BlockType::Heading1,
    BlockType::Heading2,
    BlockType::Heading3,
    BlockType::BulletListItem,
    BlockType::NumberedListItem,
    BlockType::ToDoItem,
    BlockType::Quote,
    BlockType::Divider,
    BlockType::Image,
    BlockType::Code,
];

impl BlockType {
    /// Every block type in declaration order.
    pub fn all() -> &'static [BlockType] {
        ALL_BLOCK_TYPES
    }

    /// Stable external name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading-1",
            Self::Heading2 => "heading-2",
            Self::Heading3 => "heading-3",
            Self::BulletListItem => "bullet-list-item",
            Self::NumberedListItem => "numbered-list-item",
            Self::ToDoItem => "to-do-item",
            Self::Quote => "quote",
            Self::Divider => "divider",
            Self::Image => "image",
            Self::Code => "code",
        }
    }

    /// Parses one external name. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Result<Self, BlockTypeParseError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(BlockTypeParseError::Empty);
        }
        ALL_BLOCK_TYPES
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| BlockTypeParseError::Unsupported(normalized.to_string()))
    }

    /// Heading level for heading kinds, `None` otherwise.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            _ => None,
        }
    }
}

impl Display for BlockType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = BlockTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Block type parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockTypeParseError {
    Empty,
    Unsupported(String),
}

impl Display for BlockTypeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "block type must not be empty"),
            Self::Unsupported(value) => write!(f, "block type is unsupported: {value}"),
        }
    }
}

impl Error for BlockTypeParseError {}

/// Validation failures for a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockValidationError {
    /// Block id is the nil UUID.
    NilId,
    /// Block carries nested children, which are not supported.
    NestedChildren(BlockId),
}

impl Display for BlockValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "block id must not be nil"),
            Self::NestedChildren(id) => write!(f, "block {id} must not have children"),
        }
    }
}

impl Error for BlockValidationError {}

/// One addressable unit of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable id assigned at creation.
    pub id: BlockId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: BlockType,
    /// Plain text body.
    pub content: String,
    /// Reserved for nesting. Always empty for a valid block.
    #[serde(default)]
    pub children: Vec<Block>,
}

impl Block {
    /// Creates a block with a freshly generated id.
    pub fn new(kind: BlockType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Creates an empty paragraph, the block produced by a split.
    pub fn empty_paragraph() -> Self {
        Self::new(BlockType::Paragraph, String::new())
    }

    /// Creates a block with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `BlockValidationError::NilId` for `Uuid::nil()`.
    pub fn with_id(
        id: BlockId,
        kind: BlockType,
        content: impl Into<String>,
    ) -> Result<Self, BlockValidationError> {
        let block = Self {
            id,
            kind,
            content: content.into(),
            children: Vec::new(),
        };
        block.validate()?;
        Ok(block)
    }

    /// Checks block-local invariants.
    pub fn validate(&self) -> Result<(), BlockValidationError> {
        if self.id.is_nil() {
            return Err(BlockValidationError::NilId);
        }
        if !self.children.is_empty() {
            return Err(BlockValidationError::NestedChildren(self.id));
        }
        Ok(())
    }

    /// Whether the body is the empty string.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
