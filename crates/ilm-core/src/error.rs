use std::path::PathBuf;
use thiserror::Error;

/// A policy-authoring defect. Never retryable; surfaced to the author verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{lifecycle} lifecycle does not support phase [{phase}]")]
    UnsupportedPhase {
        lifecycle: &'static str,
        phase: String,
    },

    #[error("invalid action [{action}] defined in phase [{phase}]")]
    UnsupportedAction { action: String, phase: String },
}

impl ValidationError {
    /// Name of the offending phase. For an unsupported action this is the
    /// phase the action was declared in.
    pub fn phase(&self) -> &str {
        match self {
            ValidationError::UnsupportedPhase { phase, .. } => phase,
            ValidationError::UnsupportedAction { phase, .. } => phase,
        }
    }

    pub fn action(&self) -> Option<&str> {
        match self {
            ValidationError::UnsupportedPhase { .. } => None,
            ValidationError::UnsupportedAction { action, .. } => Some(action),
        }
    }
}

#[derive(Debug, Error)]
pub enum IlmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown lifecycle type: {0}")]
    UnknownLifecycleType(String),

    #[error("phase [{0}] is defined more than once")]
    DuplicatePhase(String),

    #[error("action [{action}] is defined more than once in phase [{phase}]")]
    DuplicateAction { action: String, phase: String },

    #[error("policy document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("unsupported policy document format '{0}': expected yaml, yml or json")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IlmError>;
