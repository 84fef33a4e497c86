//! Page-level workflows for pagewright.
//!
//! This crate ties together list conversion, marker tagging, and template
//! splicing into end-to-end operations (e.g., `build_page`).

pub mod meta;
pub mod pipeline;

pub use meta::format_meta_tags;
pub use pipeline::{BuildPageResult, build_page, fill_template};
