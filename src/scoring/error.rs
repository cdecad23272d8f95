use thiserror::Error;

/// Errors the scorer surfaces to its caller.
///
/// Unknown team ids, duplicate ids and short lists are absorbed by the
/// scorer and never show up here. Only structurally wrong input does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl ScoreError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ScoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
