//! Pure document edit operations.
//!
//! # Responsibility
//! - Apply one discrete edit intent to a document snapshot.
//! - Report where focus should go next without touching any UI.
//!
//! # Invariants
//! - Operations never fail; an unknown `BlockId` leaves the document unchanged.
//! - The input snapshot is never mutated; every call returns a new one.
//! - Accepted edits keep every `Document` invariant (non-empty, unique ids).

use crate::model::block::{Block, BlockId, BlockType};
use crate::model::document::Document;
use log::debug;

/// Focus instruction handed back to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirective {
    /// Leave focus where it is.
    Keep,
    /// Focus one block at its new display index.
    Focus { block_id: BlockId, index: usize },
}

impl FocusDirective {
    pub fn target(&self) -> Option<BlockId> {
        match self {
            Self::Keep => None,
            Self::Focus { block_id, .. } => Some(*block_id),
        }
    }
}

/// Result of one edit: the next snapshot plus its focus directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub document: Document,
    pub focus: FocusDirective,
    /// `false` when the edit was a no-op.
    pub applied: bool,
}

impl EditOutcome {
    fn unchanged(document: &Document) -> Self {
        Self {
            document: document.clone(),
            focus: FocusDirective::Keep,
            applied: false,
        }
    }

    fn applied(document: Document, focus: FocusDirective) -> Self {
        Self {
            document,
            focus,
            applied: true,
        }
    }

    /// Index of the focused block, when the directive names one.
    pub fn focus_index(&self) -> Option<usize> {
        match self.focus {
            FocusDirective::Keep => None,
            FocusDirective::Focus { index, .. } => Some(index),
        }
    }
}

/// Navigation direction for `move_focus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Inserts `new_block` immediately after `block_id`.
///
/// No-op when `block_id` is absent, or when `new_block` would break
/// document invariants (nil or duplicate id, nested children).
pub fn insert_after(document: &Document, block_id: BlockId, new_block: Block) -> EditOutcome {
    let Some(index) = document.index_of(block_id) else {
        debug!("event=block_insert module=edit status=skipped reason=anchor_missing");
        return EditOutcome::unchanged(document);
    };
    if new_block.validate().is_err() || document.contains(new_block.id) {
        debug!("event=block_insert module=edit status=skipped reason=invalid_block");
        return EditOutcome::unchanged(document);
    }

    let new_index = index + 1;
    let new_id = new_block.id;
    let mut blocks = document.blocks().to_vec();
    blocks.insert(new_index, new_block);
    debug!(
        "event=block_insert module=edit status=ok index={} len={}",
        new_index,
        blocks.len()
    );
    EditOutcome::applied(
        Document::from_validated(blocks),
        FocusDirective::Focus {
            block_id: new_id,
            index: new_index,
        },
    )
}

/// Starts a new empty paragraph below `block_id`.
pub fn split(document: &Document, block_id: BlockId) -> EditOutcome {
    insert_after(document, block_id, Block::empty_paragraph())
}

/// Removes an empty, non-first block and focuses its predecessor.
///
/// Blocks with content are left alone; their text is never joined into
/// the previous block.
pub fn merge_backward(document: &Document, block_id: BlockId) -> EditOutcome {
    let Some(index) = document.index_of(block_id) else {
        return EditOutcome::unchanged(document);
    };
    if index == 0 || !document.blocks()[index].is_empty() {
        debug!("event=block_merge module=edit status=skipped index={index}");
        return EditOutcome::unchanged(document);
    }

    let mut blocks = document.blocks().to_vec();
    blocks.remove(index);
    let previous = &blocks[index - 1];
    let focus = FocusDirective::Focus {
        block_id: previous.id,
        index: index - 1,
    };
    debug!(
        "event=block_merge module=edit status=ok index={} len={}",
        index,
        blocks.len()
    );
    EditOutcome::applied(Document::from_validated(blocks), focus)
}

/// Replaces one block's content verbatim.
pub fn set_content(document: &Document, block_id: BlockId, text: &str) -> EditOutcome {
    let Some(index) = document.index_of(block_id) else {
        return EditOutcome::unchanged(document);
    };
    if document.blocks()[index].content == text {
        return EditOutcome::unchanged(document);
    }
    let mut blocks = document.blocks().to_vec();
    blocks[index].content = text.to_string();
    EditOutcome::applied(Document::from_validated(blocks), FocusDirective::Keep)
}

/// Reclassifies one block and clears its content.
pub fn set_type(document: &Document, block_id: BlockId, kind: BlockType) -> EditOutcome {
    let Some(index) = document.index_of(block_id) else {
        return EditOutcome::unchanged(document);
    };
    let mut blocks = document.blocks().to_vec();
    let block = &mut blocks[index];
    block.kind = kind;
    block.content.clear();
    debug!("event=block_retype module=edit status=ok index={index} type={kind}");
    EditOutcome::applied(
        Document::from_validated(blocks),
        FocusDirective::Focus { block_id, index },
    )
}

/// Returns the id of the adjacent block, or `None` at a boundary.
pub fn move_focus(document: &Document, block_id: BlockId, direction: Direction) -> Option<BlockId> {
    let index = document.index_of(block_id)?;
    let target = match direction {
        Direction::Previous => index.checked_sub(1)?,
        Direction::Next => index + 1,
    };
    document.blocks().get(target).map(|block| block.id)
}

#[cfg(test)]
mod tests {
    use super::{merge_backward, move_focus, set_content, split, Direction, FocusDirective};
    use crate::model::block::BlockType;
    use crate::model::document::Document;
    use uuid::Uuid;

    #[test]
    fn split_focuses_new_block_at_next_index() {
        let doc = Document::seed();
        let first = doc.first().id;
        let outcome = split(&doc, first);

        assert!(outcome.applied);
        assert_eq!(outcome.document.len(), 3);
        let inserted = &outcome.document.blocks()[1];
        assert_eq!(inserted.kind, BlockType::Paragraph);
        assert_eq!(
            outcome.focus,
            FocusDirective::Focus {
                block_id: inserted.id,
                index: 1
            }
        );
    }

    #[test]
    fn merge_on_non_empty_block_is_noop() {
        let doc = Document::seed();
        let outcome = merge_backward(&doc, doc.last().id);
        assert!(!outcome.applied);
        assert_eq!(outcome.document, doc);
        assert_eq!(outcome.focus, FocusDirective::Keep);
    }

    #[test]
    fn set_content_unknown_id_is_noop() {
        let doc = Document::seed();
        let outcome = set_content(&doc, Uuid::new_v4(), "ghost");
        assert!(!outcome.applied);
        assert_eq!(outcome.document, doc);
    }

    #[test]
    fn set_content_with_same_text_is_not_applied() {
        let doc = Document::seed();
        let outcome = set_content(&doc, doc.first().id, &doc.first().content);
        assert!(!outcome.applied);
        assert_eq!(outcome.document, doc);
    }

    #[test]
    fn move_focus_unknown_id_is_none() {
        let doc = Document::seed();
        assert_eq!(move_focus(&doc, Uuid::new_v4(), Direction::Next), None);
    }
}
