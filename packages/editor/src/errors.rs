//! Error types for the editor

use oasedit_model::ModelError;
use thiserror::Error;

use crate::marshall::MarshallError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Marshall error: {0}")]
    Marshall(#[from] MarshallError),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
