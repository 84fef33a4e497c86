//! Shared types, error model, and configuration for pagewright.
//!
//! This crate is the foundation depended on by all other pagewright crates.
//! It provides:
//! - [`PagewrightError`] — the unified error type
//! - Rule types ([`SegmentRule`], [`FieldRule`], [`TagRule`]) and config loading
//! - [`Diagnostic`] and the [`DiagnosticSink`] seam used by best-effort passes

pub mod config;
pub mod diagnostics;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DocumentWrappers, FieldRule, MarkdownConfig, PageConfig, SegmentRule, TagRule,
    config_dir, config_file_path, init_config, load_config, load_config_from, parse_config,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{MarkerRole, PagewrightError, Result};
