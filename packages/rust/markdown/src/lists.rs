//! Paragraph stream → nested list/paragraph HTML.
//!
//! Paragraphs come from a word-processor text extractor: nesting is expressed
//! with leading tabs, bullets as `--<TAB>`, numbered items as `1.` / `1)`.
//! Open lists are tracked on a flat stack, outermost first, so any indentation
//! jump still yields balanced tags.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use pagewright_shared::DocumentWrappers;

use crate::escape_text;

/// Bullet prefix after indentation.
const BULLET_PREFIX: &str = "--\t";

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[.)]\s*").expect("valid regex"));

/// One open list on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            Self::Ordered => "<ol>",
            Self::Unordered => "<ul>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::Ordered => "</ol>",
            Self::Unordered => "</ul>",
        }
    }
}

/// Split an unindented paragraph into its list kind and item text.
/// `None` means a plain paragraph.
fn classify(line: &str) -> Option<(ListKind, &str)> {
    if let Some(text) = line.strip_prefix(BULLET_PREFIX) {
        return Some((ListKind::Unordered, text));
    }
    NUMBERED_RE
        .find(line)
        .map(|m| (ListKind::Ordered, &line[m.end()..]))
}

/// Convert extracted paragraphs to HTML fragments joined by newlines.
///
/// `entire_start`/`entire_end` bracket the output when non-empty; plain
/// paragraphs are wrapped in `p_start`/`p_end`. Blank paragraphs are skipped.
#[instrument(skip_all, fields(paragraphs = paragraphs.len()))]
pub fn paragraphs_to_html<S: AsRef<str>>(paragraphs: &[S], wrappers: &DocumentWrappers) -> String {
    let mut writer = ListWriter::default();

    if !wrappers.entire_start.is_empty() {
        writer.fragments.push(wrappers.entire_start.clone());
    }

    for paragraph in paragraphs {
        let paragraph = paragraph.as_ref();
        if paragraph.trim().is_empty() {
            continue;
        }

        let unindented = paragraph.trim_start_matches('\t');
        let indent = paragraph.len() - unindented.len();

        match classify(unindented) {
            Some((kind, text)) => writer.item(indent + 1, kind, text),
            None => {
                writer.close_to(0);
                writer.fragments.push(format!(
                    "{}{}{}",
                    wrappers.p_start,
                    escape_text(unindented),
                    wrappers.p_end
                ));
            }
        }
    }

    writer.close_to(0);

    if !wrappers.entire_end.is_empty() {
        writer.fragments.push(wrappers.entire_end.clone());
    }

    debug!(
        fragments = writer.fragments.len(),
        max_depth = writer.max_depth,
        "list conversion complete"
    );
    writer.fragments.join("\n")
}

#[derive(Debug, Default)]
struct ListWriter {
    fragments: Vec<String>,
    stack: Vec<ListKind>,
    max_depth: usize,
}

impl ListWriter {
    fn open(&mut self, kind: ListKind) {
        self.stack.push(kind);
        self.max_depth = self.max_depth.max(self.stack.len());
        self.fragments.push(kind.open_tag().to_string());
    }

    /// Pop lists until exactly `depth` remain open.
    fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            if let Some(kind) = self.stack.pop() {
                self.fragments.push(kind.close_tag().to_string());
            }
        }
    }

    fn item(&mut self, depth: usize, kind: ListKind, text: &str) {
        if self.stack.len() > depth {
            self.close_to(depth);
        } else if self.stack.len() < depth {
            while self.stack.len() < depth {
                self.open(kind);
            }
        } else if self.stack.last() != Some(&kind) {
            self.close_to(depth - 1);
            self.open(kind);
        }

        self.fragments.push(format!("<li>{}</li>", escape_text(text)));
    }
}
