//! Application configuration for pagewright.
//!
//! User config lives at `~/.pagewright/pagewright.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PagewrightError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "pagewright.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".pagewright";

// ---------------------------------------------------------------------------
// Config structs (matching pagewright.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wrappers used by the nested list converter.
    #[serde(default)]
    pub document: DocumentWrappers,

    /// Markdown converter settings.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Per-field template substitutions, applied in order.
    #[serde(default)]
    pub fields: Vec<FieldRule>,

    /// Marker pairs rewritten into tag pairs after list conversion, in order.
    #[serde(default)]
    pub tags: Vec<TagRule>,

    /// Where converted content lands inside a page template.
    #[serde(default)]
    pub page: PageConfig,
}

/// `[document]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentWrappers {
    /// Emitted before everything else. Skipped when empty.
    #[serde(default)]
    pub entire_start: String,

    /// Emitted after everything else. Skipped when empty.
    #[serde(default)]
    pub entire_end: String,

    /// Opening wrapper for each plain paragraph.
    #[serde(default = "default_p_start")]
    pub p_start: String,

    /// Closing wrapper for each plain paragraph.
    #[serde(default = "default_p_end")]
    pub p_end: String,
}

impl Default for DocumentWrappers {
    fn default() -> Self {
        Self {
            entire_start: String::new(),
            entire_end: String::new(),
            p_start: default_p_start(),
            p_end: default_p_end(),
        }
    }
}

fn default_p_start() -> String {
    "<p>".into()
}
fn default_p_end() -> String {
    "</p>".into()
}

/// `[markdown]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Opening tag for bullet lists.
    #[serde(default = "default_unordered_open")]
    pub unordered_open: String,

    /// Opening tag for numbered lists.
    #[serde(default = "default_ordered_open")]
    pub ordered_open: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            unordered_open: default_unordered_open(),
            ordered_open: default_ordered_open(),
        }
    }
}

fn default_unordered_open() -> String {
    r#"<ul class="list" role="list">"#.into()
}
fn default_ordered_open() -> String {
    r#"<ol class="list" role="list">"#.into()
}

/// A marker-delimited region and the wrappers placed around its replacement value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRule {
    pub search_start_marker: String,
    pub search_end_marker: String,

    /// 1-based occurrence of the start marker.
    #[serde(default = "default_occurrence")]
    pub search_start_occurrence: usize,

    /// 1-based occurrence of the end marker, counted after the start match.
    #[serde(default = "default_occurrence")]
    pub search_end_occurrence: usize,

    #[serde(default)]
    pub replacement_start: String,

    #[serde(default)]
    pub replacement_end: String,
}

impl SegmentRule {
    /// Rule matching the first `start` and the first `end` after it, with no wrappers.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            search_start_marker: start.into(),
            search_end_marker: end.into(),
            search_start_occurrence: default_occurrence(),
            search_end_occurrence: default_occurrence(),
            replacement_start: String::new(),
            replacement_end: String::new(),
        }
    }

    /// Surround `value` with this rule's replacement wrappers.
    pub fn wrap(&self, value: &str) -> String {
        format!("{}{value}{}", self.replacement_start, self.replacement_end)
    }

    fn validate(&self, context: &str) -> Result<()> {
        if self.search_start_marker.is_empty() || self.search_end_marker.is_empty() {
            return Err(PagewrightError::config(format!(
                "{context}: search markers must not be empty"
            )));
        }
        if self.search_start_occurrence == 0 || self.search_end_occurrence == 0 {
            return Err(PagewrightError::config(format!(
                "{context}: occurrences are 1-based"
            )));
        }
        Ok(())
    }
}

fn default_occurrence() -> usize {
    1
}

/// `[[fields]]` entry — a named value substituted into a template region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Key looked up in the caller-supplied values.
    pub field: String,

    #[serde(flatten)]
    pub rule: SegmentRule,
}

/// `[[tags]]` entry — every `start_marker ... end_marker` becomes `start_tag ... end_tag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRule {
    pub start_marker: String,
    pub end_marker: String,
    pub start_tag: String,
    pub end_tag: String,
}

impl TagRule {
    pub fn new(
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
        start_tag: impl Into<String>,
        end_tag: impl Into<String>,
    ) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            start_tag: start_tag.into(),
            end_tag: end_tag.into(),
        }
    }
}

/// `[page]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Template region replaced by the converted document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<SegmentRule>,

    /// Tag rules run over the whole page after splicing.
    #[serde(default)]
    pub post_tags: Vec<TagRule>,
}

impl AppConfig {
    /// Reject rules the engine could never satisfy.
    pub fn validate(&self) -> Result<()> {
        for field in &self.fields {
            field.rule.validate(&format!("field '{}'", field.field))?;
        }
        if let Some(region) = &self.page.region {
            region.validate("page.region")?;
        }
        for (i, tag) in self.tags.iter().chain(&self.page.post_tags).enumerate() {
            if tag.start_marker.is_empty() || tag.end_marker.is_empty() {
                return Err(PagewrightError::config(format!(
                    "tag rule #{}: markers must not be empty",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.pagewright/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PagewrightError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.pagewright/pagewright.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PagewrightError::io(path, e))?;

    parse_config(&content).map_err(|e| match e {
        PagewrightError::Config { message } => {
            PagewrightError::config(format!("failed to parse {}: {message}", path.display()))
        }
        other => other,
    })
}

/// Parse and validate config from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| PagewrightError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PagewrightError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PagewrightError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PagewrightError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
