//! Editor session: document snapshot, command menu state and focus effects.
//!
//! # Responsibility
//! - Route discrete user intents to pure edit operations.
//! - Own the slash-command menu state machine as an explicit value.
//! - Apply focus directives through a `FocusSink` after each accepted edit.
//!
//! # Invariants
//! - The menu opens only on `/` over a block whose content is empty.
//! - While composing, anchor input updates the query and never the document.
//! - Cancelling the menu never mutates the document.
//! - The menu leaves `Composing` only on selection, cancel, or removal of
//!   its anchor block.
//! - Focus effects run synchronously, after the new snapshot is committed.

use crate::command::{builtin_block_type_options, command_filter, BlockTypeOption};
use crate::edit::{self, Direction, EditOutcome, FocusDirective};
use crate::model::block::{BlockId, BlockType};
use crate::model::document::Document;
use log::debug;

/// Slash-command menu state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandMenuState {
    #[default]
    Idle,
    /// Menu is open over `anchor` and filtering by `query`.
    Composing { anchor: BlockId, query: String },
}

impl CommandMenuState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Composing { .. })
    }

    pub fn anchor(&self) -> Option<BlockId> {
        match self {
            Self::Idle => None,
            Self::Composing { anchor, .. } => Some(*anchor),
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Composing { query, .. } => Some(query.as_str()),
        }
    }
}

/// Rendering-surface hook that moves input focus to one block.
pub trait FocusSink {
    fn focus_block(&mut self, block_id: BlockId, index: usize);
}

/// Focus sink for callers that manage focus themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreFocus;

impl FocusSink for IgnoreFocus {
    fn focus_block(&mut self, _block_id: BlockId, _index: usize) {}
}

/// Where a pointer-down event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the open command menu.
    Menu,
    /// Inside one block's editable region.
    Block(BlockId),
    /// Anywhere else.
    Outside,
}

/// One discrete user intent, already translated from raw events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorIntent {
    /// Enter without shift.
    Submit { block_id: BlockId },
    /// Backspace at the start of a line.
    MergeBackward { block_id: BlockId },
    /// Arrow up / arrow down.
    Navigate {
        block_id: BlockId,
        direction: Direction,
    },
    /// Editable region text changed.
    Input { block_id: BlockId, text: String },
    /// `/` key pressed.
    Slash { block_id: BlockId },
    /// Pointer selection of a menu entry.
    SelectType(BlockType),
    /// Escape key.
    Cancel,
    PointerDown(PointerTarget),
}

/// What one dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Document snapshot was replaced.
    Edited { focus: FocusDirective },
    /// Focus moved without an edit.
    Focused { block_id: BlockId, index: usize },
    /// Menu opened; the surface must not commit the typed `/` as content.
    MenuOpened { anchor: BlockId },
    QueryUpdated,
    MenuClosed,
    /// Nothing changed.
    Ignored,
}

/// Single-writer editing session over one document.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    document: Document,
    menu: CommandMenuState,
}

impl EditorSession {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            menu: CommandMenuState::Idle,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn menu(&self) -> &CommandMenuState {
        &self.menu
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Menu entries for the current query; empty while the menu is closed.
    pub fn visible_commands(&self) -> Vec<BlockTypeOption> {
        match &self.menu {
            CommandMenuState::Idle => Vec::new(),
            CommandMenuState::Composing { query, .. } => {
                command_filter(builtin_block_type_options(), query)
            }
        }
    }

    /// Applies one intent and runs its focus effect on `focus`.
    pub fn dispatch(
        &mut self,
        intent: EditorIntent,
        focus: &mut impl FocusSink,
    ) -> DispatchOutcome {
        match intent {
            EditorIntent::Submit { block_id } => {
                let outcome = edit::split(&self.document, block_id);
                self.commit(outcome, focus)
            }
            EditorIntent::MergeBackward { block_id } => {
                let outcome = edit::merge_backward(&self.document, block_id);
                let dispatched = self.commit(outcome, focus);
                self.drop_removed_anchor();
                dispatched
            }
            EditorIntent::Navigate {
                block_id,
                direction,
            } => self.navigate(block_id, direction, focus),
            EditorIntent::Input { block_id, text } => self.input(block_id, text, focus),
            EditorIntent::Slash { block_id } => self.slash(block_id),
            EditorIntent::SelectType(kind) => self.select_type(kind, focus),
            EditorIntent::Cancel => self.cancel(),
            EditorIntent::PointerDown(target) => self.pointer_down(target),
        }
    }

    fn commit(&mut self, outcome: EditOutcome, focus: &mut impl FocusSink) -> DispatchOutcome {
        if !outcome.applied {
            return DispatchOutcome::Ignored;
        }
        self.document = outcome.document;
        if let FocusDirective::Focus { block_id, index } = outcome.focus {
            focus.focus_block(block_id, index);
        }
        DispatchOutcome::Edited {
            focus: outcome.focus,
        }
    }

    fn navigate(
        &mut self,
        block_id: BlockId,
        direction: Direction,
        focus: &mut impl FocusSink,
    ) -> DispatchOutcome {
        let Some(target) = edit::move_focus(&self.document, block_id, direction) else {
            return DispatchOutcome::Ignored;
        };
        let Some(index) = self.document.index_of(target) else {
            return DispatchOutcome::Ignored;
        };
        focus.focus_block(target, index);
        DispatchOutcome::Focused {
            block_id: target,
            index,
        }
    }

    fn input(
        &mut self,
        block_id: BlockId,
        text: String,
        focus: &mut impl FocusSink,
    ) -> DispatchOutcome {
        if let CommandMenuState::Composing { anchor, query } = &mut self.menu {
            if *anchor == block_id {
                *query = text.strip_prefix('/').unwrap_or(text.as_str()).to_string();
                return DispatchOutcome::QueryUpdated;
            }
        }
        let outcome = edit::set_content(&self.document, block_id, &text);
        self.commit(outcome, focus)
    }

    fn slash(&mut self, block_id: BlockId) -> DispatchOutcome {
        let Some(block) = self.document.get(block_id) else {
            return DispatchOutcome::Ignored;
        };
        if !block.is_empty() {
            return DispatchOutcome::Ignored;
        }
        self.menu = CommandMenuState::Composing {
            anchor: block_id,
            query: String::new(),
        };
        debug!("event=command_menu_open module=session status=ok");
        DispatchOutcome::MenuOpened { anchor: block_id }
    }

    fn select_type(&mut self, kind: BlockType, focus: &mut impl FocusSink) -> DispatchOutcome {
        let Some(anchor) = self.menu.anchor() else {
            return DispatchOutcome::Ignored;
        };
        self.menu = CommandMenuState::Idle;
        debug!("event=command_menu_select module=session status=ok type={kind}");
        match self.commit(edit::set_type(&self.document, anchor, kind), focus) {
            DispatchOutcome::Ignored => DispatchOutcome::MenuClosed,
            edited => edited,
        }
    }

    fn cancel(&mut self) -> DispatchOutcome {
        if self.close_menu() {
            DispatchOutcome::MenuClosed
        } else {
            DispatchOutcome::Ignored
        }
    }

    fn pointer_down(&mut self, target: PointerTarget) -> DispatchOutcome {
        let inside = match (target, self.menu.anchor()) {
            (_, None) => return DispatchOutcome::Ignored,
            (PointerTarget::Menu, Some(_)) => true,
            (PointerTarget::Block(id), Some(anchor)) => id == anchor,
            (PointerTarget::Outside, Some(_)) => false,
        };
        if inside {
            return DispatchOutcome::Ignored;
        }
        self.cancel()
    }

    /// Closes the menu when its anchor no longer exists.
    fn drop_removed_anchor(&mut self) {
        if let Some(anchor) = self.menu.anchor() {
            if !self.document.contains(anchor) {
                self.close_menu();
            }
        }
    }

    /// Returns whether the menu was open.
    fn close_menu(&mut self) -> bool {
        if !self.menu.is_open() {
            return false;
        }
        self.menu = CommandMenuState::Idle;
        debug!("event=command_menu_close module=session status=ok");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandMenuState, DispatchOutcome, EditorIntent, EditorSession, IgnoreFocus};
    use crate::model::block::{Block, BlockType};
    use crate::model::document::Document;

    fn session_with_empty_tail() -> EditorSession {
        let doc = Document::from_blocks(vec![
            Block::new(BlockType::Paragraph, "intro"),
            Block::empty_paragraph(),
        ])
        .expect("valid document");
        EditorSession::new(doc)
    }

    #[test]
    fn slash_on_non_empty_block_keeps_menu_closed() {
        let mut session = session_with_empty_tail();
        let first = session.document().first().id;
        let outcome = session.dispatch(EditorIntent::Slash { block_id: first }, &mut IgnoreFocus);
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(session.menu(), &CommandMenuState::Idle);
    }

    #[test]
    fn select_type_while_idle_is_ignored() {
        let mut session = session_with_empty_tail();
        let before = session.document().clone();
        let outcome =
            session.dispatch(EditorIntent::SelectType(BlockType::Quote), &mut IgnoreFocus);
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn visible_commands_empty_when_idle() {
        let session = session_with_empty_tail();
        assert!(session.visible_commands().is_empty());
    }
}
