//! Occurrence lookup for literal markers.

/// Byte offset of the `n`th (1-based) occurrence of `marker` in `content`.
///
/// Matches never overlap: after a hit the scan resumes at the end of the
/// matched text, so `"aaaa"` holds two occurrences of `"aa"`, not three.
/// An empty marker or `n == 0` finds nothing.
pub fn locate(content: &str, marker: &str, n: usize) -> Option<usize> {
    if marker.is_empty() || n == 0 {
        return None;
    }
    content
        .match_indices(marker)
        .nth(n - 1)
        .map(|(offset, _)| offset)
}
