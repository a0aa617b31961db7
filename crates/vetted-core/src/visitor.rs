//! Path tracking for diagnostics keyed like `props[1].value`.

use std::fmt::Write;

// ============================================================================
// Path
// ============================================================================

#[derive(Clone, Copy, Debug)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// Render a segment stack (plus an optional trailing segment) as a key.
#[must_use]
pub fn render_path(path: &[PathSegment], extra: Option<PathSegment>) -> String {
    let mut out = String::new();
    let mut first = true;

    for seg in path.iter().copied().chain(extra) {
        match seg {
            PathSegment::Field(s) => {
                if !first {
                    out.push('.');
                }
                out.push_str(s);
            }
            PathSegment::Index(i) => {
                let _ = write!(out, "[{i}]");
            }
        }
        first = false;
    }

    out
}

/// Re-root a key produced by a nested session under `prefix`.
#[must_use]
pub fn prefix_key(prefix: &str, key: &str) -> String {
    match (prefix.is_empty(), key.is_empty()) {
        (true, _) => key.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) if key.starts_with('[') => format!("{prefix}{key}"),
        (false, false) => format!("{prefix}.{key}"),
    }
}

///
/// TESTS
///
