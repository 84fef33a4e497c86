//! Line-oriented converters that turn extracted text into HTML.
//!
//! - [`paragraphs_to_html`] nests tab-indented bullet/numbered paragraphs.
//! - [`markdown_to_html`] handles headings, flat lists, bold, and paragraphs.
//!
//! Both escape `&`, `<`, and `>` exactly once in the text they emit and never
//! fail: anything that does not look like a list item becomes a paragraph.

mod blocks;
mod lists;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

pub use blocks::markdown_to_html;
pub use lists::{ListKind, paragraphs_to_html};

/// Escape `&`, `<`, `>` for element text.
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Replace `**text**` with `<strong>text</strong>`.
pub(crate) fn inline_bold(text: &str) -> String {
    static BOLD_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));

    BOLD_RE
        .replace_all(text, "<strong>${1}</strong>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_text_specials_only() {
        assert_eq!(escape_text("a & b < c > d \"e\""), "a &amp; b &lt; c &gt; d \"e\"");
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn bold_is_non_greedy() {
        assert_eq!(
            inline_bold("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
        assert_eq!(inline_bold("**unclosed"), "**unclosed");
    }
}
