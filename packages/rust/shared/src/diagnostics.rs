//! Recoverable diagnostics reported by best-effort operations.
//!
//! Fail-fast operations return [`crate::PagewrightError`]; best-effort ones
//! keep going and hand what they skipped to a caller-supplied
//! [`DiagnosticSink`].

use std::fmt;

/// A recoverable condition noticed while rewriting content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A start marker had no end marker after it; the rest of that rule was skipped.
    UnmatchedStartMarker {
        start_marker: String,
        end_marker: String,
    },
    /// A tag rule with an empty marker was skipped.
    EmptyMarker {
        start_marker: String,
        end_marker: String,
    },
    /// A field rule had no value supplied; an empty value was substituted.
    MissingFieldValue { field: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedStartMarker {
                start_marker,
                end_marker,
            } => write!(
                f,
                "unmatched start marker '{start_marker}' found without corresponding end marker '{end_marker}'"
            ),
            Self::EmptyMarker {
                start_marker,
                end_marker,
            } => write!(
                f,
                "skipping tag rule with empty marker ('{start_marker}', '{end_marker}')"
            ),
            Self::MissingFieldValue { field } => {
                write!(f, "no value supplied for field '{field}', substituting empty text")
            }
        }
    }
}

/// Receives diagnostics from best-effort operations.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "recoverable diagnostic");
    }
}
