//! Meta tag snippets delivered as JSON by upstream generators.

use serde::Deserialize;
use tracing::debug;

use pagewright_shared::{PagewrightError, Result};

#[derive(Debug, Deserialize)]
struct MetaTagsPayload {
    raw_schema: String,
}

/// Pull the HTML snippet out of a `{"raw_schema": "..."}` payload.
///
/// Generators tend to wrap the snippet in a fenced code block; the
/// ```` ```html ```` opener and any ```` ``` ```` fences are removed.
pub fn format_meta_tags(json: &str) -> Result<String> {
    let payload: MetaTagsPayload = serde_json::from_str(json)
        .map_err(|e| PagewrightError::parse(format!("invalid meta tags payload: {e}")))?;

    let html = payload.raw_schema.replace("```html\n", "").replace("```", "");
    debug!(len = html.len(), "meta tags formatted");
    Ok(html)
}
