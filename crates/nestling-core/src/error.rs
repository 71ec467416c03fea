use crate::config::LimitKind;
use crate::model::ValidationIssue;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no layout strategy registered for `{kind}`")]
    UnknownStrategy { kind: String },

    #[error("no router registered under `{name}`")]
    UnknownRouter { name: String },

    #[error("no input adapter registered for `{kind}`")]
    UnknownInput { kind: String },

    #[error("{limit} limit exceeded: {actual} > {max}")]
    LimitExceeded {
        limit: LimitKind,
        actual: usize,
        max: usize,
    },

    #[error("invalid layout input: {} validation issue(s)", .issues.len())]
    InvalidInput { issues: Vec<ValidationIssue> },

    #[error("layout input JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification matching how a host is expected to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A missing registration: a programmer error, never retried.
    Configuration,
    /// A depth/node/children/edge threshold tripped under `LimitPolicy::Throw`.
    Limit,
    /// Structural defects in the input that the caller asked to treat as fatal.
    Validation,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnknownStrategy { .. }
            | Error::UnknownRouter { .. }
            | Error::UnknownInput { .. } => ErrorCategory::Configuration,
            Error::LimitExceeded { .. } => ErrorCategory::Limit,
            Error::InvalidInput { .. } | Error::Json(_) => ErrorCategory::Validation,
        }
    }
}
