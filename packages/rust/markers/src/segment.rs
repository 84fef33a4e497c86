//! Fail-fast extraction and replacement of a single marker-delimited segment.
//!
//! The start marker is located by its occurrence in the whole content; the end
//! marker is then counted only within the text following that start match.
//! Any missing marker aborts with [`PagewrightError::MarkerNotFound`] and the
//! caller's content is left as it was.

use tracing::{debug, instrument};

use pagewright_shared::{MarkerRole, PagewrightError, Result, SegmentRule};

use crate::locate::locate;

/// Search parameters for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpan<'a> {
    pub start: &'a str,
    pub end: &'a str,
    /// 1-based occurrence of `start` in the content.
    pub start_occurrence: usize,
    /// 1-based occurrence of `end` after the start match.
    pub end_occurrence: usize,
}

impl<'a> MarkerSpan<'a> {
    /// First `start`, then the first `end` after it.
    pub fn new(start: &'a str, end: &'a str) -> Self {
        Self {
            start,
            end,
            start_occurrence: 1,
            end_occurrence: 1,
        }
    }

    pub fn with_start_occurrence(mut self, n: usize) -> Self {
        self.start_occurrence = n;
        self
    }

    pub fn with_end_occurrence(mut self, n: usize) -> Self {
        self.end_occurrence = n;
        self
    }
}

impl<'a> From<&'a SegmentRule> for MarkerSpan<'a> {
    fn from(rule: &'a SegmentRule) -> Self {
        Self {
            start: &rule.search_start_marker,
            end: &rule.search_end_marker,
            start_occurrence: rule.search_start_occurrence,
            end_occurrence: rule.search_end_occurrence,
        }
    }
}

/// Absolute byte range `[start, end)` covering both markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    /// Slice of `content` covered by this segment, markers included.
    pub fn text<'c>(&self, content: &'c str) -> &'c str {
        &content[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locate the segment described by `span`.
pub fn locate_segment(content: &str, span: &MarkerSpan<'_>) -> Result<Segment> {
    if span.start.is_empty() {
        return Err(PagewrightError::EmptyMarker {
            role: MarkerRole::Start,
        });
    }
    if span.end.is_empty() {
        return Err(PagewrightError::EmptyMarker {
            role: MarkerRole::End,
        });
    }

    let start = locate(content, span.start, span.start_occurrence).ok_or_else(|| {
        PagewrightError::marker_not_found(MarkerRole::Start, span.start, span.start_occurrence)
    })?;

    let after_start = start + span.start.len();
    let relative_end = locate(&content[after_start..], span.end, span.end_occurrence)
        .ok_or_else(|| {
            PagewrightError::marker_not_found(MarkerRole::End, span.end, span.end_occurrence)
        })?;

    Ok(Segment {
        start,
        end: after_start + relative_end + span.end.len(),
    })
}

/// Text of the segment described by `span`, markers included.
pub fn extract_segment<'c>(content: &'c str, span: &MarkerSpan<'_>) -> Result<&'c str> {
    let segment = locate_segment(content, span)?;
    Ok(segment.text(content))
}

/// Replace the segment described by `span` (markers included) with `replacement`.
#[instrument(skip(content, replacement), fields(
    start_marker = %span.start,
    end_marker = %span.end,
    start_occurrence = span.start_occurrence,
    end_occurrence = span.end_occurrence,
))]
pub fn replace_segment(content: &str, span: &MarkerSpan<'_>, replacement: &str) -> Result<String> {
    let segment = locate_segment(content, span)?;

    let mut out = String::with_capacity(content.len() - segment.len() + replacement.len());
    out.push_str(&content[..segment.start]);
    out.push_str(replacement);
    out.push_str(&content[segment.end..]);

    debug!(
        removed = segment.len(),
        inserted = replacement.len(),
        "segment replaced"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<head><title>Old</title><meta a/><meta b/><meta name=\"description\"/></head>";

    #[test]
    fn extract_includes_both_markers() {
        let span = MarkerSpan::new("<title>", "</title>");
        assert_eq!(extract_segment(PAGE, &span).unwrap(), "<title>Old</title>");
    }

    #[test]
    fn replace_splices_between_prefix_and_suffix() {
        let span = MarkerSpan::new("<title>", "</title>");
        let out = replace_segment(PAGE, &span, "<title>New</title>").unwrap();
        assert_eq!(
            out,
            "<head><title>New</title><meta a/><meta b/><meta name=\"description\"/></head>"
        );
    }

    #[test]
    fn start_occurrence_selects_later_match() {
        let span = MarkerSpan::new("<meta", "/>").with_start_occurrence(3);
        assert_eq!(
            extract_segment(PAGE, &span).unwrap(),
            "<meta name=\"description\"/>"
        );
    }

    #[test]
    fn end_occurrence_counts_from_start_match() {
        let content = "x</a> <a>1</a>2</a>3</a>";
        // Global second "</a>" sits before the start marker; counting is relative.
        let span = MarkerSpan::new("<a>", "</a>").with_end_occurrence(2);
        assert_eq!(extract_segment(content, &span).unwrap(), "<a>1</a>2</a>");
    }

    #[test]
    fn end_marker_must_follow_start_marker() {
        // The only "</b>" precedes "<b>"; the overlap with the start match is not searched.
        let err = extract_segment("</b><b>text", &MarkerSpan::new("<b>", "</b>")).unwrap_err();
        assert!(matches!(
            err,
            PagewrightError::MarkerNotFound {
                role: MarkerRole::End,
                occurrence: 1,
                ..
            }
        ));
    }

    #[test]
    fn missing_start_marker_reports_marker_and_index() {
        let span = MarkerSpan::new("<meta", "/>").with_start_occurrence(4);
        let err = replace_segment(PAGE, &span, "x").unwrap_err();
        match err {
            PagewrightError::MarkerNotFound {
                role,
                marker,
                occurrence,
            } => {
                assert_eq!(role, MarkerRole::Start);
                assert_eq!(marker, "<meta");
                assert_eq!(occurrence, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_occurrence_is_not_found() {
        let span = MarkerSpan::new("<title>", "</title>").with_start_occurrence(0);
        assert!(matches!(
            locate_segment(PAGE, &span),
            Err(PagewrightError::MarkerNotFound { occurrence: 0, .. })
        ));
    }

    #[test]
    fn empty_markers_are_rejected() {
        assert!(matches!(
            locate_segment(PAGE, &MarkerSpan::new("", "</title>")),
            Err(PagewrightError::EmptyMarker {
                role: MarkerRole::Start
            })
        ));
        assert!(matches!(
            locate_segment(PAGE, &MarkerSpan::new("<title>", "")),
            Err(PagewrightError::EmptyMarker {
                role: MarkerRole::End
            })
        ));
    }

    #[test]
    fn segment_end_never_precedes_start_marker_end() {
        let content = "<!--x-->";
        let span = MarkerSpan::new("<!--", "-->");
        let segment = locate_segment(content, &span).unwrap();
        assert_eq!(segment, Segment { start: 0, end: 8 });
        assert!(segment.end >= segment.start + span.start.len());
    }

    #[test]
    fn replacing_with_extracted_text_is_identity() {
        let spans = [
            MarkerSpan::new("<title>", "</title>"),
            MarkerSpan::new("<meta", "/>").with_start_occurrence(2),
            MarkerSpan::new("<head>", "/>").with_end_occurrence(3),
        ];
        for span in &spans {
            let text = extract_segment(PAGE, span).unwrap();
            assert_eq!(replace_segment(PAGE, span, text).unwrap(), PAGE);
        }
    }

    #[test]
    fn span_from_rule_carries_occurrences() {
        let mut rule = SegmentRule::new("<script type=", "</script>");
        rule.search_start_occurrence = 2;
        let span = MarkerSpan::from(&rule);
        assert_eq!(span.start, "<script type=");
        assert_eq!(span.start_occurrence, 2);
        assert_eq!(span.end_occurrence, 1);
    }
}
