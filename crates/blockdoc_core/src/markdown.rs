//! Plain Markdown projection of a block document.
//!
//! # Responsibility
//! - Render a document as Markdown text, one construct per block.
//! - Classify Markdown lines back into typed blocks.
//!
//! # Invariants
//! - Parsing always yields a non-empty document with fresh block ids.
//! - Export never emits inline formatting; block content is plain text.

use crate::model::block::{Block, BlockType};
use crate::model::document::Document;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,3})(?:\s+(.*))?$").expect("valid heading regex"));
static TODO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+]\s+\[[ xX]\](?:\s+(.*))?$").expect("valid todo regex"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+](?:\s+(.*))?$").expect("valid bullet regex"));
static NUMBERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)](?:\s+(.*))?$").expect("valid numbered regex"));
static QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s?(.*)$").expect("valid quote regex"));
static DIVIDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").expect("valid divider regex"));
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[[^\]]*]\((.*)\)$").expect("valid image regex"));
static FENCE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(`{3,})").expect("valid fence regex"));
static ESCAPED_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\\([.)])").expect("valid escaped number regex"));

const MIN_FENCE_LEN: usize = 3;
const ESCAPE: char = '\\';

/// Renders `document` as Markdown. Blocks are separated by one blank line.
///
/// Paragraph lines that would read back as another construct are escaped,
/// and code fences are longer than any backtick run inside the code.
pub fn to_markdown(document: &Document) -> String {
    let mut chunks = Vec::with_capacity(document.len());
    let mut list_number = 0usize;

    for block in document.blocks() {
        if block.kind == BlockType::NumberedListItem {
            list_number += 1;
        } else {
            list_number = 0;
        }

        let content = block.content.as_str();
        let chunk = match block.kind {
            BlockType::Paragraph => content
                .split('\n')
                .map(escape_paragraph_line)
                .collect::<Vec<_>>()
                .join("\n"),
            BlockType::Heading1 => prefixed("# ", content),
            BlockType::Heading2 => prefixed("## ", content),
            BlockType::Heading3 => prefixed("### ", content),
            BlockType::BulletListItem => prefixed("- ", content),
            BlockType::NumberedListItem => prefixed(&format!("{list_number}. "), content),
            BlockType::ToDoItem => prefixed("- [ ] ", content),
            BlockType::Quote => prefixed("> ", content),
            BlockType::Divider => "---".to_string(),
            BlockType::Image => format!("![]({content})"),
            BlockType::Code => {
                let fence = fence_for(content);
                format!("{fence}\n{content}\n{fence}")
            }
        };
        chunks.push(chunk);
    }

    let mut output = chunks.join("\n\n");
    output.push('\n');
    output
}

/// Parses Markdown into a document of typed blocks.
///
/// Consecutive plain lines join into one paragraph. Unknown syntax is kept
/// as paragraph text; a leading backslash escape is removed.
pub fn parse_markdown(input: &str) -> Document {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut lines = input.lines();

    while let Some(raw) = lines.next() {
        let line = raw.trim_end();

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some(caps) = FENCE_OPEN_RE.captures(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let open_len = caps[1].len();
            let mut body = Vec::new();
            for code_line in lines.by_ref() {
                if closes_fence(code_line, open_len) {
                    break;
                }
                body.push(code_line);
            }
            blocks.push(Block::new(BlockType::Code, body.join("\n")));
            continue;
        }

        match classify_line(line) {
            Some(block) => {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(block);
            }
            None => paragraph.push(unescape_paragraph_line(raw)),
        }
    }
    flush_paragraph(&mut paragraph, &mut blocks);

    if blocks.is_empty() {
        return Document::blank();
    }
    Document::from_validated(blocks)
}

fn classify_line(line: &str) -> Option<Block> {
    if DIVIDER_RE.is_match(line) {
        return Some(Block::new(BlockType::Divider, String::new()));
    }
    if let Some(caps) = HEADING_RE.captures(line) {
        let kind = match caps[1].len() {
            1 => BlockType::Heading1,
            2 => BlockType::Heading2,
            _ => BlockType::Heading3,
        };
        return Some(Block::new(kind, capture_text(&caps, 2)));
    }
    if let Some(caps) = IMAGE_RE.captures(line) {
        return Some(Block::new(BlockType::Image, capture_text(&caps, 1)));
    }
    if let Some(caps) = TODO_RE.captures(line) {
        return Some(Block::new(BlockType::ToDoItem, capture_text(&caps, 1)));
    }
    if let Some(caps) = BULLET_RE.captures(line) {
        return Some(Block::new(BlockType::BulletListItem, capture_text(&caps, 1)));
    }
    if let Some(caps) = NUMBERED_RE.captures(line) {
        return Some(Block::new(BlockType::NumberedListItem, capture_text(&caps, 1)));
    }
    if let Some(caps) = QUOTE_RE.captures(line) {
        return Some(Block::new(BlockType::Quote, capture_text(&caps, 1)));
    }
    None
}

/// Escapes one paragraph line so `parse_markdown` reads it back verbatim.
///
/// Numbered markers get `1\.`; every other ambiguous line, including blank
/// ones and ones already starting with `\`, gets a leading `\`.
fn escape_paragraph_line(line: &str) -> String {
    let trimmed = line.trim_end();
    let literal_escape = line.starts_with(ESCAPE) || ESCAPED_NUMBER_RE.is_match(line);
    if !literal_escape && NUMBERED_RE.is_match(trimmed) {
        let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        return format!("{}{ESCAPE}{}", &line[..digits], &line[digits..]);
    }
    let ambiguous = literal_escape
        || trimmed.trim().is_empty()
        || FENCE_OPEN_RE.is_match(trimmed)
        || classify_line(trimmed).is_some();
    if ambiguous {
        return format!("{ESCAPE}{line}");
    }
    line.to_string()
}

fn unescape_paragraph_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix(ESCAPE) {
        return rest.to_string();
    }
    ESCAPED_NUMBER_RE.replace(line, "$1$2").into_owned()
}

fn fence_for(content: &str) -> String {
    let longest_run = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(MIN_FENCE_LEN.max(longest_run + 1))
}

fn closes_fence(line: &str, open_len: usize) -> bool {
    let trimmed = line.trim_end();
    trimmed.len() >= open_len && trimmed.chars().all(|c| c == '`')
}

fn capture_text(caps: &regex::Captures<'_>, group: usize) -> String {
    caps.get(group)
        .map(|value| value.as_str().to_string())
        .unwrap_or_default()
}

fn flush_paragraph(lines: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }
    blocks.push(Block::new(BlockType::Paragraph, lines.join("\n")));
    lines.clear();
}

fn prefixed(prefix: &str, content: &str) -> String {
    if content.is_empty() {
        return prefix.trim_end().to_string();
    }
    format!("{prefix}{content}")
}
