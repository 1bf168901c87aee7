//! Line-oriented block parser
//!
//! A single pass over the source lines with two pieces of state: the lines of
//! the paragraph being collected and the list currently open, if any. The two
//! are never populated together.

use std::sync::LazyLock;

use regex::Regex;

use super::block::{Block, ListKind};
use super::inline::process_inline;

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+(.+)$").unwrap());
static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+(.+)$").unwrap());

/// Heading prefixes, longest first so `## x` is never read as `# # x`
const HEADINGS: [(&str, u8); 4] = [("#### ", 4), ("### ", 3), ("## ", 2), ("# ", 1)];

#[derive(Debug, Default)]
struct Parser {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Option<(ListKind, Vec<String>)>,
}

impl Parser {
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join(" ");
        let text = joined.trim();
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph(process_inline(text)));
        }
        self.paragraph.clear();
    }

    fn close_list(&mut self) {
        if let Some((kind, items)) = self.list.take() {
            self.blocks.push(Block::List { kind, items });
        }
    }

    /// Close structure and emit a standalone block
    fn push_standalone(&mut self, block: Block) {
        self.flush_paragraph();
        self.close_list();
        self.blocks.push(block);
    }

    fn push_item(&mut self, kind: ListKind, text: &str) {
        self.flush_paragraph();
        if !matches!(self.list, Some((open, _)) if open == kind) {
            self.close_list();
            self.list = Some((kind, Vec::new()));
        }
        if let Some((_, items)) = self.list.as_mut() {
            items.push(process_inline(text));
        }
    }

    fn line(&mut self, raw: &str) {
        let line = raw.trim();

        if line.is_empty() {
            self.flush_paragraph();
            self.close_list();
            return;
        }

        if line == "---" {
            self.push_standalone(Block::HorizontalRule);
            return;
        }

        for (prefix, level) in HEADINGS {
            if let Some(text) = line.strip_prefix(prefix) {
                if !text.is_empty() {
                    let html = process_inline(text);
                    self.push_standalone(Block::Heading { level, html });
                    return;
                }
            }
        }

        if let Some(caps) = ORDERED_ITEM.captures(line) {
            self.push_item(ListKind::Ordered, &caps[1]);
            return;
        }

        if let Some(caps) = UNORDERED_ITEM.captures(line) {
            self.push_item(ListKind::Unordered, &caps[1]);
            return;
        }

        // Lists never absorb plain text
        self.close_list();
        self.paragraph.push(line.to_string());
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_paragraph();
        self.close_list();
        self.blocks
    }
}

/// Parse a document into blocks
///
/// Never fails: anything that is not recognised structure becomes paragraph
/// text. Consecutive text lines are joined with a single space.
pub fn parse(source: &str) -> Vec<Block> {
    let mut parser = Parser::default();
    for line in source.split('\n') {
        parser.line(line);
    }
    parser.finish()
}
