use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },
    #[error("panel or test has an empty flat name")]
    EmptyFlatName,
    #[error("invalid hierarchy delimiter {0:?}")]
    InvalidDelimiter(char),
    #[error("{child:?} is not a descendant of panel {parent:?}")]
    InconsistentHierarchy { parent: String, child: String },
    #[error("invalid {field} format {format:?}")]
    InvalidFormat { field: &'static str, format: String },
    #[error("time axis invariant violated: {0}")]
    InvariantViolation(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimelineError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;
