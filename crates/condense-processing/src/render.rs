//! Summary renderer: markdown-lite text → block structure.
//!
//! A pure, total transform consumed by the display layer. Any input string
//! produces a block sequence; unrecognized lines become paragraphs, so model
//! output that deviates from the requested structure still renders.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Emoji prefixes the summarization prompt asks the model to use for its
/// section headings.
pub const HEADING_EMOJIS: [&str; 4] = ["📝", "💡", "🎯", "🔍"];

/// Inline span inside a paragraph or list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Bold(String),
}

/// One rendered block of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { emoji: String, title: String },
    List { items: Vec<Vec<Inline>> },
    Paragraph { spans: Vec<Inline> },
    Spacer,
}

/// Parse a summary body into blocks.
///
/// - heading: a line starting with one of [`HEADING_EMOJIS`] followed by a
///   bold-marked title
/// - list item: a line starting with `* `; consecutive items form one list
/// - empty line: flushes any pending list, then yields a spacer
/// - anything else: a paragraph
pub fn parse_summary(input: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending_list: Vec<Vec<Inline>> = Vec::new();

    let flush_list = |pending: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>| {
        if !pending.is_empty() {
            blocks.push(Block::List {
                items: std::mem::take(pending),
            });
        }
    };

    for raw_line in input.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            flush_list(&mut pending_list, &mut blocks);
            blocks.push(Block::Spacer);
            continue;
        }

        if let Some((emoji, title)) = parse_heading(line) {
            flush_list(&mut pending_list, &mut blocks);
            blocks.push(Block::Heading { emoji, title });
            continue;
        }

        if let Some(item) = line.strip_prefix("* ") {
            pending_list.push(parse_inlines(item.trim()));
            continue;
        }

        flush_list(&mut pending_list, &mut blocks);
        blocks.push(Block::Paragraph {
            spans: parse_inlines(line),
        });
    }

    flush_list(&mut pending_list, &mut blocks);
    blocks
}

/// Recognize `"{emoji} **title**"`; the bold marker is required.
fn parse_heading(line: &str) -> Option<(String, String)> {
    for emoji in HEADING_EMOJIS {
        if let Some(rest) = line.strip_prefix(emoji) {
            let rest = rest.trim();
            let title = rest.strip_prefix("**")?.strip_suffix("**")?;
            if title.is_empty() || title.contains("**") {
                return None;
            }
            return Some((emoji.to_string(), title.to_string()));
        }
    }
    None
}

/// Split inline `**bold**` spans out of a line. Unpaired markers are left as
/// plain text.
fn parse_inlines(line: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end_rel) = after.find("**") else {
            break;
        };

        if start > 0 {
            spans.push(Inline::Text(rest[..start].to_string()));
        }
        spans.push(Inline::Bold(after[..end_rel].to_string()));
        rest = &after[end_rel + 2..];
    }

    if !rest.is_empty() {
        spans.push(Inline::Text(rest.to_string()));
    }

    spans
}
