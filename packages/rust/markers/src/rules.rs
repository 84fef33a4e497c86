//! Template filling: one fail-fast segment replacement per configured field.

use std::collections::HashMap;

use tracing::{debug, instrument};

use pagewright_shared::{Diagnostic, DiagnosticSink, FieldRule, Result};

use crate::segment::{MarkerSpan, replace_segment};

/// Apply `rules` in order, substituting each field's wrapped value for its segment.
///
/// A field with no entry in `values` is filled with empty text and reported to
/// `sink`. A missing marker aborts the whole call; no partially filled content
/// is returned.
#[instrument(skip_all, fields(fields = rules.len(), len = content.len()))]
pub fn apply_field_rules(
    content: &str,
    values: &HashMap<String, String>,
    rules: &[FieldRule],
    sink: &mut dyn DiagnosticSink,
) -> Result<String> {
    let mut updated = content.to_string();

    for field in rules {
        let value = match values.get(&field.field) {
            Some(value) => value.as_str(),
            None => {
                sink.report(Diagnostic::MissingFieldValue {
                    field: field.field.clone(),
                });
                ""
            }
        };

        let replacement = field.rule.wrap(value);
        updated = replace_segment(&updated, &MarkerSpan::from(&field.rule), &replacement)?;
        debug!(field = %field.field, "field replaced");
    }

    Ok(updated)
}
