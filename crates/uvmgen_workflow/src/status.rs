//! Per-unit workflow status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Readiness of one workflow unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// A prerequisite unit is absent from the snapshot.
    Blocked,
    /// Prerequisites are present; the unit is unsaved or incomplete.
    Ready,
    /// The unit is saved and every required field is filled.
    Complete,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Blocked => write!(f, "BLOCKED"),
            Status::Ready => write!(f, "READY"),
            Status::Complete => write!(f, "COMPLETE"),
        }
    }
}

/// Status plus what is missing and how to fix it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStatus {
    /// The readiness.
    pub status: Status,
    /// Missing prerequisite units (when blocked) or blank required fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    /// An actionable suggestion, empty when complete.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hint: String,
}

impl ModuleStatus {
    /// A complete unit.
    pub fn complete() -> Self {
        Self {
            status: Status::Complete,
            missing: Vec::new(),
            hint: String::new(),
        }
    }

    /// A ready unit with the given missing fields and hint.
    pub fn ready<S: Into<String>>(missing: impl IntoIterator<Item = S>, hint: &str) -> Self {
        Self {
            status: Status::Ready,
            missing: missing.into_iter().map(Into::into).collect(),
            hint: hint.to_string(),
        }
    }

    /// A blocked unit with the given absent prerequisites and hint.
    pub fn blocked<S: Into<String>>(missing: impl IntoIterator<Item = S>, hint: &str) -> Self {
        Self {
            status: Status::Blocked,
            missing: missing.into_iter().map(Into::into).collect(),
            hint: hint.to_string(),
        }
    }

    /// An always-available page.
    pub fn page() -> Self {
        Self {
            status: Status::Ready,
            missing: Vec::new(),
            hint: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_upper_case() {
        assert_eq!(Status::Blocked.to_string(), "BLOCKED");
        assert_eq!(Status::Ready.to_string(), "READY");
        assert_eq!(Status::Complete.to_string(), "COMPLETE");
    }

    #[test]
    fn constructors() {
        let st = ModuleStatus::blocked(["Interface"], "Define Interface first.");
        assert_eq!(st.status, Status::Blocked);
        assert_eq!(st.missing, vec!["Interface"]);
        let st = ModuleStatus::ready(Vec::<String>::new(), "x");
        assert!(st.missing.is_empty());
        assert_eq!(ModuleStatus::complete().hint, "");
    }

    #[test]
    fn json_skips_empty_parts() {
        let json = serde_json::to_string(&ModuleStatus::complete()).unwrap();
        assert_eq!(json, r#"{"status":"complete"}"#);
    }
}
