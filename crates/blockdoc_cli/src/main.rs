//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `blockdoc_core` linkage.
//! - Replay a fixed editing script so output stays deterministic.
//!
//! Logging is enabled when `BLOCKDOC_LOG_DIR` is set.

use blockdoc_core::{
    core_version, ping, to_markdown, BlockId, BlockType, Document, EditorIntent, EditorSession,
    FocusSink, LogConfig,
};
use log::{debug, info};

/// Focus sink that only records focus moves in the log.
struct LogFocus;

impl FocusSink for LogFocus {
    fn focus_block(&mut self, _block_id: BlockId, index: usize) {
        debug!("event=focus_block module=cli status=ok index={index}");
    }
}

fn main() {
    if let Some(config) = LogConfig::from_env() {
        if let Err(err) = config.init() {
            eprintln!("blockdoc logging disabled: {err}");
        }
    }

    println!("blockdoc_core ping={}", ping());
    println!("blockdoc_core version={}", core_version());

    let document = replay_demo(EditorSession::default());
    info!(
        "event=demo_replayed module=cli status=ok blocks={}",
        document.len()
    );
    print!("{}", to_markdown(&document));
}

/// Turns the seed into a short checklist through the slash menu.
fn replay_demo(mut session: EditorSession) -> Document {
    let mut focus = LogFocus;
    let anchor = session.document().last().id;

    session.dispatch(EditorIntent::Submit { block_id: anchor }, &mut focus);
    let Some(item) = session.document().blocks().get(2).map(|block| block.id) else {
        return session.into_document();
    };

    let script = [
        EditorIntent::Slash { block_id: item },
        EditorIntent::Input {
            block_id: item,
            text: "/to-do".to_string(),
        },
        EditorIntent::SelectType(BlockType::ToDoItem),
        EditorIntent::Input {
            block_id: item,
            text: "Try the slash menu".to_string(),
        },
    ];
    for intent in script {
        session.dispatch(intent, &mut focus);
    }
    session.into_document()
}
