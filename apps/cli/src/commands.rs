//! CLI command definitions, routing, and tracing setup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use pagewright_core::{build_page, fill_template, format_meta_tags};
use pagewright_markdown::{markdown_to_html, paragraphs_to_html};
use pagewright_markers::{MarkerSpan, extract_segment};
use pagewright_shared::{AppConfig, TracingSink, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// pagewright — marker-driven HTML page assembly.
#[derive(Parser)]
#[command(
    name = "pagewright",
    version,
    about = "Convert extracted text to HTML and splice it into page templates.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.pagewright/pagewright.toml).
    #[arg(long, global = true, env = "PAGEWRIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert extracted paragraphs (one per line, tab-indented) to nested list HTML.
    Lists {
        /// Paragraph file.
        input: PathBuf,
    },

    /// Convert lightweight markdown to HTML.
    Markdown {
        /// Markdown file.
        input: PathBuf,
    },

    /// Print the segment between two markers, markers included.
    Extract {
        /// HTML file to search.
        input: PathBuf,

        /// Start marker.
        #[arg(long)]
        start: String,

        /// End marker, searched after the start marker.
        #[arg(long)]
        end: String,

        /// Which occurrence of the start marker (1-based).
        #[arg(long, default_value_t = 1)]
        start_occurrence: usize,

        /// Which occurrence of the end marker after the start (1-based).
        #[arg(long, default_value_t = 1)]
        end_occurrence: usize,
    },

    /// Fill a template's configured fields from a JSON object of values.
    Fill {
        /// Template HTML file.
        #[arg(long)]
        template: PathBuf,

        /// JSON file mapping field names to values.
        #[arg(long)]
        values: PathBuf,

        /// Overwrite the template instead of writing `<name>-new.<ext>`.
        #[arg(long)]
        in_place: bool,
    },

    /// Convert a paragraph file and splice it into the template's configured region.
    Build {
        /// Template HTML file.
        #[arg(long)]
        template: PathBuf,

        /// Paragraph file (one paragraph per line).
        #[arg(long)]
        paragraphs: PathBuf,

        /// Output file (defaults to `<template>-new.<ext>`).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Extract meta tags from a `{"raw_schema": ...}` JSON payload.
    Meta {
        /// JSON file.
        input: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

const CRATE_TARGETS: [&str; 5] = [
    "pagewright",
    "pagewright_core",
    "pagewright_markers",
    "pagewright_markdown",
    "pagewright_shared",
];

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so converted HTML on stdout stays clean.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Lists { input } => cmd_lists(&resolve_config(config_path.as_deref())?, &input),
        Command::Markdown { input } => {
            cmd_markdown(&resolve_config(config_path.as_deref())?, &input)
        }
        Command::Extract {
            input,
            start,
            end,
            start_occurrence,
            end_occurrence,
        } => {
            let span = MarkerSpan::new(&start, &end)
                .with_start_occurrence(start_occurrence)
                .with_end_occurrence(end_occurrence);
            cmd_extract(&input, &span)
        }
        Command::Fill {
            template,
            values,
            in_place,
        } => cmd_fill(
            &resolve_config(config_path.as_deref())?,
            &template,
            &values,
            in_place,
        ),
        Command::Build {
            template,
            paragraphs,
            out,
        } => cmd_build(
            &resolve_config(config_path.as_deref())?,
            &template,
            &paragraphs,
            out.as_deref(),
        ),
        Command::Meta { input } => cmd_meta(&input),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&resolve_config(config_path.as_deref())?),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_lists(config: &AppConfig, input: &Path) -> Result<()> {
    let text = read_file(input)?;
    let paragraphs: Vec<&str> = text.lines().collect();
    println!("{}", paragraphs_to_html(&paragraphs, &config.document));
    Ok(())
}

fn cmd_markdown(config: &AppConfig, input: &Path) -> Result<()> {
    let text = read_file(input)?;
    println!("{}", markdown_to_html(&text, &config.markdown));
    Ok(())
}

fn cmd_extract(input: &Path, span: &MarkerSpan<'_>) -> Result<()> {
    let html = read_file(input)?;
    let segment = extract_segment(&html, span)
        .wrap_err_with(|| format!("cannot extract from {}", input.display()))?;
    println!("{segment}");
    Ok(())
}

fn cmd_fill(config: &AppConfig, template: &Path, values: &Path, in_place: bool) -> Result<()> {
    if config.fields.is_empty() {
        return Err(eyre!("no [[fields]] configured; nothing to fill"));
    }

    let html = read_file(template)?;
    let values: HashMap<String, String> = serde_json::from_str(&read_file(values)?)
        .wrap_err_with(|| format!("{} must be a JSON object of strings", values.display()))?;

    let filled = fill_template(&html, &values, config, &mut TracingSink)
        .wrap_err_with(|| format!("failed to fill {}", template.display()))?;

    let out = if in_place {
        template.to_path_buf()
    } else {
        new_sibling(template)
    };
    write_file(&out, &filled)?;

    info!(template = %template.display(), out = %out.display(), "template filled");
    Ok(())
}

fn cmd_build(config: &AppConfig, template: &Path, paragraphs: &Path, out: Option<&Path>) -> Result<()> {
    let html = read_file(template)?;
    let text = read_file(paragraphs)?;
    let paragraphs: Vec<&str> = text.lines().collect();

    let result = build_page(&html, &paragraphs, config, &mut TracingSink)
        .wrap_err_with(|| format!("failed to build page from {}", template.display()))?;

    let out = out.map(Path::to_path_buf).unwrap_or_else(|| new_sibling(template));
    write_file(&out, &result.page)?;

    println!();
    println!("  Page built!");
    println!("  Paragraphs: {}", paragraphs.len());
    println!("  Fragment:   {} bytes", result.fragment.len());
    println!("  Output:     {}", out.display());
    println!();

    Ok(())
}

fn cmd_meta(input: &Path) -> Result<()> {
    let json = read_file(input)?;
    println!("{}", format_meta_tags(&json)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Created config file: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    println!("{content}");
    Ok(())
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// `dir/page.html` → `dir/page-new.html`.
fn new_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-new.{}", ext.to_string_lossy()),
        None => format!("{stem}-new"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_defaults_to_first_occurrences() {
        let cli = Cli::try_parse_from([
            "pagewright",
            "extract",
            "page.html",
            "--start",
            "<title>",
            "--end",
            "</title>",
        ])
        .expect("parse");
        match cli.command {
            Command::Extract {
                start_occurrence,
                end_occurrence,
                ..
            } => {
                assert_eq!(start_occurrence, 1);
                assert_eq!(end_occurrence, 1);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn new_sibling_inserts_suffix_before_extension() {
        assert_eq!(
            new_sibling(Path::new("site/primary-care.html")),
            PathBuf::from("site/primary-care-new.html")
        );
        assert_eq!(new_sibling(Path::new("notes")), PathBuf::from("notes-new"));
    }

    #[test]
    fn build_writes_spliced_page() {
        let dir = tempfile::tempdir().expect("tempdir");
        let template = dir.path().join("page.html");
        let paragraphs = dir.path().join("body.txt");
        std::fs::write(&template, "<body><!--a-->old<!--b--></body>").expect("write");
        std::fs::write(&paragraphs, "Intro\n--\tOne\n").expect("write");

        let config = pagewright_shared::parse_config(
            "[page.region]\nsearch_start_marker = \"<!--a\"\nsearch_end_marker = \"b-->\"\n",
        )
        .expect("config");

        cmd_build(&config, &template, &paragraphs, None).expect("build");
        let page = std::fs::read_to_string(dir.path().join("page-new.html")).expect("read");
        assert_eq!(page, "<body><p>Intro</p>\n<ul>\n<li>One</li>\n</ul></body>");
    }

    #[test]
    fn fill_in_place_overwrites_template() {
        let dir = tempfile::tempdir().expect("tempdir");
        let template = dir.path().join("page.html");
        let values = dir.path().join("values.json");
        std::fs::write(&template, "<title>old</title>").expect("write");
        std::fs::write(&values, r#"{"TITLE": "New"}"#).expect("write");

        let config = pagewright_shared::parse_config(
            "[[fields]]\nfield = \"TITLE\"\nsearch_start_marker = \"<title>\"\nsearch_end_marker = \"</title>\"\nreplacement_start = \"<title>\"\nreplacement_end = \"</title>\"\n",
        )
        .expect("config");

        cmd_fill(&config, &template, &values, true).expect("fill");
        assert_eq!(
            std::fs::read_to_string(&template).expect("read"),
            "<title>New</title>"
        );
    }
}
