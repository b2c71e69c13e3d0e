use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Document root must be a JSON object")]
    RootNotObject,

    #[error("Unknown document dialect: {0}")]
    UnknownDialect(String),

    #[error("Invalid node path {pointer:?}: {message}")]
    InvalidPointer { pointer: String, message: String },
}

impl ModelError {
    pub fn invalid_pointer(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPointer {
            pointer: pointer.into(),
            message: message.into(),
        }
    }
}
