//! Document domain model.
//!
//! # Responsibility
//! - Hold the ordered block sequence that makes up one editable document.
//! - Enforce sequence-level invariants at every construction path.
//!
//! # Invariants
//! - `blocks` is never empty.
//! - Block ids are unique within one document.
//! - Sequence order is the only display order; there is no position field.

use crate::model::block::{Block, BlockId, BlockType, BlockValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SEED_HEADING: &str = "Welcome to Notion-like Editor";
const SEED_PARAGRAPH: &str = "Start typing here, or type \"/\" to see available block types.";

/// Construction failures for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentError {
    /// Block sequence is empty.
    Empty,
    /// Two blocks share one id.
    DuplicateBlockId(BlockId),
    /// One block failed block-level validation.
    InvalidBlock(BlockValidationError),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "document must contain at least one block"),
            Self::DuplicateBlockId(id) => write!(f, "duplicate block id in document: {id}"),
            Self::InvalidBlock(err) => write!(f, "invalid block: {err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBlock(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BlockValidationError> for DocumentError {
    fn from(value: BlockValidationError) -> Self {
        Self::InvalidBlock(value)
    }
}

/// Ordered block sequence.
///
/// Snapshots are immutable from the outside; edits in `crate::edit`
/// produce a new `Document` instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    blocks: Vec<Block>,
}

#[derive(Deserialize)]
struct RawDocument {
    blocks: Vec<Block>,
}

impl TryFrom<RawDocument> for Document {
    type Error = DocumentError;

    fn try_from(value: RawDocument) -> Result<Self, Self::Error> {
        Self::from_blocks(value.blocks)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::seed()
    }
}

impl Document {
    /// Creates the fixed seed document shown on first load.
    pub fn seed() -> Self {
        Self {
            blocks: vec![
                Block::new(BlockType::Heading1, SEED_HEADING),
                Block::new(BlockType::Paragraph, SEED_PARAGRAPH),
            ],
        }
    }

    /// Creates a document holding one empty paragraph.
    pub fn blank() -> Self {
        Self {
            blocks: vec![Block::empty_paragraph()],
        }
    }

    /// Builds a document from caller-provided blocks.
    ///
    /// # Errors
    /// - `DocumentError::Empty` for an empty sequence.
    /// - `DocumentError::InvalidBlock` when a block fails validation.
    /// - `DocumentError::DuplicateBlockId` when ids repeat.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, DocumentError> {
        if blocks.is_empty() {
            return Err(DocumentError::Empty);
        }
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            block.validate()?;
            if !seen.insert(block.id) {
                return Err(DocumentError::DuplicateBlockId(block.id));
            }
        }
        Ok(Self { blocks })
    }

    /// Wraps a sequence the caller already validated.
    pub(crate) fn from_validated(blocks: Vec<Block>) -> Self {
        debug_assert!(!blocks.is_empty());
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the display index of one block.
    pub fn index_of(&self, block_id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == block_id)
    }

    pub fn get(&self, block_id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == block_id)
    }

    pub fn contains(&self, block_id: BlockId) -> bool {
        self.index_of(block_id).is_some()
    }

    pub fn first(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn last(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.iter().map(|block| block.id)
    }
}
