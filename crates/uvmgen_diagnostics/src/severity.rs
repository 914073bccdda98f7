//! How serious a diagnostic is.

use crate::code::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a [`Diagnostic`](crate::Diagnostic), least severe first.
///
/// Codes only ever produce `Warning` or `Error`; `Note` and `Help` exist for
/// follow-up lines a renderer may print beneath them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A suggested fix.
    Help,
    /// Extra context.
    Note,
    /// Something was skipped but the output is usable.
    Warning,
    /// Generation cannot proceed.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    /// The lowercase label used in rendered output and JSON.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Help => "help",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl From<Category> for Severity {
    fn from(category: Category) -> Self {
        match category {
            Category::Error => Severity::Error,
            Category::Warning => Severity::Warning,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_decides_severity() {
        assert_eq!(Severity::from(Category::Error), Severity::Error);
        assert_eq!(Severity::from(Category::Warning), Severity::Warning);
        assert!(!Severity::from(Category::Warning).is_error());
    }

    #[test]
    fn warnings_rank_below_errors() {
        let mut all = vec![Severity::Error, Severity::Help, Severity::Warning, Severity::Note];
        all.sort();
        assert_eq!(all.last(), Some(&Severity::Error));
        assert_eq!(all.first(), Some(&Severity::Help));
    }

    #[test]
    fn label_matches_json() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, format!("\"{}\"", Severity::Warning.label()));
    }
}
