//! End-to-end page pipelines: extracted paragraphs → tagged HTML → template.

use std::collections::HashMap;

use tracing::{info, instrument};

use pagewright_markdown::paragraphs_to_html;
use pagewright_markers::{MarkerSpan, apply_field_rules, replace_all_markers, replace_segment};
use pagewright_shared::{AppConfig, DiagnosticSink, PagewrightError, Result};

/// Result of [`build_page`].
#[derive(Debug, Clone)]
pub struct BuildPageResult {
    /// The template with the converted document spliced in and post tags applied.
    pub page: String,
    /// The converted, tagged document before splicing.
    pub fragment: String,
}

/// Convert `paragraphs` and splice them into `template`.
///
/// 1. Nested list conversion with `config.document`
/// 2. Best-effort tagging with `config.tags`
/// 3. Fail-fast replacement of `config.page.region`
/// 4. Best-effort tagging of the whole page with `config.page.post_tags`
///
/// Diagnostics from both tagging passes go to `sink`. A missing region or a
/// region marker that cannot be found is an error and no page is produced.
#[instrument(skip_all, fields(paragraphs = paragraphs.len(), template_len = template.len()))]
pub fn build_page<S: AsRef<str>>(
    template: &str,
    paragraphs: &[S],
    config: &AppConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<BuildPageResult> {
    let region = config
        .page
        .region
        .as_ref()
        .ok_or_else(|| PagewrightError::config("no [page.region] configured"))?;

    let preliminary = paragraphs_to_html(paragraphs, &config.document);
    let fragment = replace_all_markers(&preliminary, &config.tags, sink);

    let spliced = replace_segment(template, &MarkerSpan::from(region), &region.wrap(&fragment))?;
    let page = replace_all_markers(&spliced, &config.page.post_tags, sink);

    info!(
        fragment_len = fragment.len(),
        page_len = page.len(),
        "page built"
    );

    Ok(BuildPageResult { page, fragment })
}

/// Substitute `values` into `template` using `config.fields`.
#[instrument(skip_all, fields(values = values.len()))]
pub fn fill_template(
    template: &str,
    values: &HashMap<String, String>,
    config: &AppConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<String> {
    let filled = apply_field_rules(template, values, &config.fields, sink)?;
    info!(fields = config.fields.len(), "template filled");
    Ok(filled)
}
