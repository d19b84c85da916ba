//! Core block document logic for Blockdoc.
//! This crate is the single source of truth for block document invariants.

pub mod command;
pub mod edit;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod session;

pub use command::{builtin_block_type_options, command_filter, BlockTypeOption};
pub use edit::{
    insert_after, merge_backward, move_focus, set_content, set_type, split, Direction,
    EditOutcome, FocusDirective,
};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use markdown::{parse_markdown, to_markdown};
pub use model::block::{Block, BlockId, BlockType, BlockTypeParseError, BlockValidationError};
pub use model::document::{Document, DocumentError};
pub use session::{
    CommandMenuState, DispatchOutcome, EditorIntent, EditorSession, FocusSink, IgnoreFocus,
    PointerTarget,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
