//! Sanitizers that turn arbitrary user text into safe identifiers and paths.
//!
//! Both functions are total: they never fail, they either produce a cleaned
//! value or signal rejection through a fallback / `None`.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Returns `true` if `c` may appear in a name produced by [`safe_name`].
fn is_name_byte(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Turns arbitrary text into a safe identifier-like name.
///
/// The value is trimmed, every run of characters outside `[A-Za-z0-9_.-]` is
/// collapsed into a single `_`, and leading/trailing `_` are stripped. If
/// nothing is left, `fallback` is returned instead.
pub fn safe_name(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut in_run = false;
    for c in trimmed.chars() {
        if is_name_byte(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    let stripped = out.trim_matches('_');
    if stripped.is_empty() {
        fallback.to_string()
    } else {
        stripped.to_string()
    }
}

/// Returns `true` if `s` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A validated, normalized POSIX-style relative path.
///
/// Only [`safe_rel_path`] constructs one, so holding a `RelPath` guarantees
/// the path has no absolute prefix, no drive letter, and no `..` or empty
/// segment.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct RelPath(String);

impl RelPath {
    /// Returns the path as a `/`-separated string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves this relative path under `root`.
    pub fn under(&self, root: &Path) -> PathBuf {
        self.0.split('/').fold(root.to_path_buf(), |acc, seg| acc.join(seg))
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates `value` as a relative path that stays under the generation root.
///
/// Backslashes are treated as separators. Rejects empty input, absolute
/// paths, drive-letter paths (`C:...`), and any path containing a `..` or an
/// empty segment. `.` segments are dropped during normalization.
pub fn safe_rel_path(value: &str) -> Option<RelPath> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }
    let raw = raw.replace('\\', "/");
    if raw.starts_with('/') || has_drive_prefix(&raw) {
        return None;
    }

    let mut segments = Vec::new();
    for seg in raw.split('/') {
        match seg {
            "" | ".." => return None,
            "." => continue,
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        return None;
    }
    Some(RelPath(segments.join("/")))
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_name_replaces_and_trims() {
        assert_eq!(safe_name("My Sig!", "sig"), "My_Sig");
    }

    #[test]
    fn safe_name_blank_uses_fallback() {
        assert_eq!(safe_name("   ", "sig"), "sig");
        assert_eq!(safe_name("", "txn_item"), "txn_item");
        assert_eq!(safe_name("!!!", "x"), "x");
    }

    #[test]
    fn safe_name_collapses_runs() {
        assert_eq!(safe_name("a  b\t\tc", "x"), "a_b_c");
        assert_eq!(safe_name("__keep_inner__", "x"), "keep_inner");
    }

    #[test]
    fn safe_name_keeps_dots_and_dashes() {
        assert_eq!(safe_name("v1.2-rc", "x"), "v1.2-rc");
    }

    #[test]
    fn safe_name_is_idempotent() {
        let once = safe_name(" weird name ($) ", "x");
        assert_eq!(safe_name(&once, "x"), once);
    }

    #[test]
    fn identifier_grammar() {
        assert!(is_identifier("clk"));
        assert!(is_identifier("_rst_n2"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("data[3:0]"));
    }

    #[test]
    fn rel_path_accepts_plain_relative() {
        assert_eq!(safe_rel_path("src/file.sv").unwrap().as_str(), "src/file.sv");
        assert_eq!(safe_rel_path("notes.txt").unwrap().as_str(), "notes.txt");
    }

    #[test]
    fn rel_path_normalizes_separators_and_dots() {
        assert_eq!(safe_rel_path("src\\top.sv").unwrap().as_str(), "src/top.sv");
        assert_eq!(safe_rel_path("./src/./top.sv").unwrap().as_str(), "src/top.sv");
    }

    #[test]
    fn rel_path_rejects_escapes() {
        assert!(safe_rel_path("../evil").is_none());
        assert!(safe_rel_path("src/../../evil").is_none());
        assert!(safe_rel_path("..\\evil").is_none());
    }

    #[test]
    fn rel_path_rejects_absolute_and_drive() {
        assert!(safe_rel_path("/etc/passwd").is_none());
        assert!(safe_rel_path("\\server\\share").is_none());
        assert!(safe_rel_path("C:/Windows").is_none());
        assert!(safe_rel_path("c:relative").is_none());
    }

    #[test]
    fn rel_path_rejects_empty_segments() {
        assert!(safe_rel_path("").is_none());
        assert!(safe_rel_path("   ").is_none());
        assert!(safe_rel_path("src//top.sv").is_none());
        assert!(safe_rel_path("src/").is_none());
        assert!(safe_rel_path(".").is_none());
    }

    #[test]
    fn rel_path_under_root() {
        let rel = safe_rel_path("src/top.sv").unwrap();
        let full = rel.under(Path::new("/out/proj"));
        assert_eq!(full, Path::new("/out/proj").join("src").join("top.sv"));
    }

    #[test]
    fn rel_path_serde_is_transparent() {
        let rel = safe_rel_path("a/b.sv").unwrap();
        assert_eq!(serde_json::to_string(&rel).unwrap(), "\"a/b.sv\"");
    }
}
