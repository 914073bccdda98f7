//! The error type for failures inside the generator itself.

use std::fmt;

/// Result of rendering or assembling an artifact.
///
/// `Err` means the generator could not produce the artifact at all, never
/// that the user's model was incomplete: incomplete models degrade to
/// defaults or produce diagnostics while the call still returns `Ok`.
pub type GenResult<T> = Result<T, InternalError>;

/// A renderer or assembly failure, optionally tagged with the artifact it
/// happened in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct InternalError {
    /// Generated file name, such as `top.sv`, once known.
    pub artifact: Option<String>,
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// A failure not yet attributed to an artifact.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            artifact: None,
            message: message.into(),
        }
    }

    /// Attributes the failure to `artifact` unless an inner caller already
    /// did.
    pub fn in_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact.get_or_insert_with(|| artifact.into());
        self
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.artifact {
            Some(artifact) => write!(f, "internal generator error in {artifact}: {}", self.message),
            None => write!(f, "internal generator error: {}", self.message),
        }
    }
}

impl From<fmt::Error> for InternalError {
    fn from(_: fmt::Error) -> Self {
        Self::new("failed to format generated text")
    }
}
