//! Lightweight markdown → HTML.
//!
//! A single pass over trimmed lines. Only headings, flat bullet and numbered
//! lists, `**bold**`, and paragraphs are recognised; at most one block is open
//! at a time.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use pagewright_shared::MarkdownConfig;

use crate::{escape_text, inline_bold};

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("valid regex"));

/// Optional `H2` / `H2:` token some writers put after the hashes.
static HEADING_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^H\d\b:?").expect("valid regex"));

const MAX_HEADING_LEVEL: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OpenBlock {
    #[default]
    None,
    Paragraph,
    Unordered,
    Ordered,
}

/// Convert markdown text to HTML fragments joined by newlines.
///
/// Every plain line becomes its own `<p>` element; consecutive lines are not
/// merged into one paragraph.
#[instrument(skip_all, fields(len = text.len()))]
pub fn markdown_to_html(text: &str, options: &MarkdownConfig) -> String {
    let mut writer = BlockWriter::new(options);

    for line in text.lines() {
        let line = line.trim();

        if let Some((level, heading)) = parse_heading(line) {
            writer.close();
            writer
                .lines
                .push(format!("<h{level}>{}</h{level}>", escape_text(heading)));
        } else if let Some(item) = line.strip_prefix("- ") {
            writer.enter(OpenBlock::Unordered);
            writer.item(item);
        } else if let Some(m) = NUMBERED_RE.find(line) {
            writer.enter(OpenBlock::Ordered);
            writer.item(&line[m.end()..]);
        } else if line.is_empty() {
            writer.close();
        } else {
            writer.enter(OpenBlock::Paragraph);
            writer.lines.push(inline_bold(&escape_text(line)));
            writer.close();
        }
    }

    writer.close();
    debug!(fragments = writer.lines.len(), "markdown conversion complete");
    writer.lines.join("\n")
}

/// Heading level and text for lines starting with one to six `#`.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let rest = line.trim_start_matches('#');
    let level = line.len() - rest.len();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }

    let rest = rest.trim_start();
    let text = match HEADING_TOKEN_RE.find(rest) {
        Some(m) => &rest[m.end()..],
        None => rest,
    };
    Some((level, text.trim()))
}

struct BlockWriter<'a> {
    options: &'a MarkdownConfig,
    lines: Vec<String>,
    open: OpenBlock,
}

impl<'a> BlockWriter<'a> {
    fn new(options: &'a MarkdownConfig) -> Self {
        Self {
            options,
            lines: Vec::new(),
            open: OpenBlock::None,
        }
    }

    /// Make `block` the open block, closing whatever else is open.
    fn enter(&mut self, block: OpenBlock) {
        if self.open == block {
            return;
        }
        self.close();
        let tag = match block {
            OpenBlock::None => return,
            OpenBlock::Paragraph => "<p>",
            OpenBlock::Unordered => self.options.unordered_open.as_str(),
            OpenBlock::Ordered => self.options.ordered_open.as_str(),
        };
        self.lines.push(tag.to_string());
        self.open = block;
    }

    fn close(&mut self) {
        let tag = match self.open {
            OpenBlock::None => return,
            OpenBlock::Paragraph => "</p>",
            OpenBlock::Unordered => "</ul>",
            OpenBlock::Ordered => "</ol>",
        };
        self.lines.push(tag.to_string());
        self.open = OpenBlock::None;
    }

    fn item(&mut self, text: &str) {
        let text = inline_bold(&escape_text(text.trim()));
        self.lines.push(format!("<li>{text}</li>"));
    }
}
