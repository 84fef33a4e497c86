//! Marker scanning and splicing over generated HTML.
//!
//! Two deliberately different error policies live here:
//! - [`replace_segment`] and [`apply_field_rules`] fail fast on any missing marker.
//! - [`replace_all_markers`] is best-effort and reports skipped rules to a sink.

pub mod bulk;
pub mod locate;
pub mod rules;
pub mod segment;

pub use bulk::replace_all_markers;
pub use locate::locate;
pub use rules::apply_field_rules;
pub use segment::{MarkerSpan, Segment, extract_segment, locate_segment, replace_segment};
