//! Best-effort rewriting of every marker pair into a tag pair.
//!
//! Rules run in the order given and each one is exhausted before the next
//! starts. A start marker with no end marker after it stops that rule only:
//! the condition is reported to the [`DiagnosticSink`] and the remaining
//! rules still run.

use tracing::{debug, instrument};

use pagewright_shared::{Diagnostic, DiagnosticSink, TagRule};

/// Rewrite all `start_marker ... end_marker` spans into `start_tag ... end_tag`.
///
/// The text between the markers is kept as-is. Never fails; rules that cannot
/// be applied are skipped and reported.
#[instrument(skip_all, fields(rules = rules.len(), len = content.len()))]
pub fn replace_all_markers(
    content: &str,
    rules: &[TagRule],
    sink: &mut dyn DiagnosticSink,
) -> String {
    let mut updated = content.to_string();

    for rule in rules {
        if rule.start_marker.is_empty() || rule.end_marker.is_empty() {
            sink.report(Diagnostic::EmptyMarker {
                start_marker: rule.start_marker.clone(),
                end_marker: rule.end_marker.clone(),
            });
            continue;
        }

        let replaced = rewrite_rule(&mut updated, rule, sink);
        debug!(
            start_marker = %rule.start_marker,
            end_marker = %rule.end_marker,
            replaced,
            "tag rule applied"
        );
    }

    updated
}

/// Apply one rule until no start marker remains. Returns the number of spans rewritten.
fn rewrite_rule(content: &mut String, rule: &TagRule, sink: &mut dyn DiagnosticSink) -> usize {
    let mut cursor = 0;
    let mut replaced = 0;

    while let Some(found) = content[cursor..].find(&rule.start_marker) {
        let start = cursor + found;
        let inner_start = start + rule.start_marker.len();

        let Some(found_end) = content[inner_start..].find(&rule.end_marker) else {
            sink.report(Diagnostic::UnmatchedStartMarker {
                start_marker: rule.start_marker.clone(),
                end_marker: rule.end_marker.clone(),
            });
            break;
        };
        let inner_end = inner_start + found_end;

        // Back to front so `start..inner_start` stays valid.
        content.replace_range(inner_end..inner_end + rule.end_marker.len(), &rule.end_tag);
        content.replace_range(start..inner_start, &rule.start_tag);
        replaced += 1;

        // Resume at the start of the kept inner text. Everything before it is
        // already free of this start marker, and skipping the tag keeps a tag
        // that contains its own marker from being rewritten forever.
        cursor = start + rule.start_tag.len();
    }

    replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_rule() -> TagRule {
        TagRule::new("<a>", "</a>", "<b>", "</b>")
    }

    #[test]
    fn rewrites_every_occurrence() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("X<a>keep</a>Y<a>keep2</a>Z", &[anchor_rule()], &mut sink);
        assert_eq!(out, "X<b>keep</b>Y<b>keep2</b>Z");
        assert!(sink.is_empty());
    }

    #[test]
    fn unmatched_start_marker_warns_and_leaves_content() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("X<a>keep", &[anchor_rule()], &mut sink);
        assert_eq!(out, "X<a>keep");
        assert_eq!(
            sink,
            vec![Diagnostic::UnmatchedStartMarker {
                start_marker: "<a>".into(),
                end_marker: "</a>".into(),
            }]
        );
    }

    #[test]
    fn unmatched_rule_keeps_earlier_rewrites_and_later_rules_run() {
        let rules = [
            TagRule::new("<bold>", "</bold>", "<strong>", "</strong>"),
            anchor_rule(),
            TagRule::new("[i]", "[/i]", "<em>", "</em>"),
        ];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("<bold>a</bold> <a>b</a> <a>c [i]d[/i]", &rules, &mut sink);
        assert_eq!(out, "<strong>a</strong> <b>b</b> <a>c <em>d</em>");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn rules_apply_in_order() {
        // The first rule's output becomes the second rule's input.
        let rules = [
            TagRule::new("((", "))", "[", "]"),
            TagRule::new("[", "]", "<span>", "</span>"),
        ];
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert_eq!(replace_all_markers("((x))", &rules, &mut sink), "<span>x</span>");

        let reversed = [rules[1].clone(), rules[0].clone()];
        assert_eq!(replace_all_markers("((x))", &reversed, &mut sink), "[x]");
    }

    #[test]
    fn newline_terminated_markers() {
        let rules = [TagRule::new("H1:", "\n", "<h1>", "</h1>")];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("H1: Welcome\n<p>Body</p>\n", &rules, &mut sink);
        assert_eq!(out, "<h1> Welcome</h1><p>Body</p>\n");
    }

    #[test]
    fn nested_start_markers_pair_with_first_end() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("<a>x<a>y</a>z</a>", &[anchor_rule()], &mut sink);
        assert_eq!(out, "<b>x<b>y</b>z</b>");
    }

    #[test]
    fn tag_containing_its_marker_terminates() {
        let rules = [TagRule::new("<ul>", "</ul>", "<ul><!--list-->", "</ul>")];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("<ul>1</ul><ul>2</ul>", &rules, &mut sink);
        assert_eq!(out, "<ul><!--list-->1</ul><ul><!--list-->2</ul>");
    }

    #[test]
    fn empty_marker_rule_is_skipped() {
        let rules = [TagRule::new("", "</a>", "<b>", "</b>"), anchor_rule()];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("<a>k</a>", &rules, &mut sink);
        assert_eq!(out, "<b>k</b>");
        assert!(matches!(sink[0], Diagnostic::EmptyMarker { .. }));
    }

    #[test]
    fn escaped_markers_from_list_conversion() {
        let rules = [TagRule::new("&lt;bold&gt;", "&lt;/bold&gt;", "<strong>", "</strong>")];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let out = replace_all_markers("<p>&lt;bold&gt;Hours&lt;/bold&gt; daily</p>", &rules, &mut sink);
        assert_eq!(out, "<p><strong>Hours</strong> daily</p>");
    }
}
