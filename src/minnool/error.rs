use crate::extract::DocumentFormat;
use crate::messages;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinnoolError {
    /// The file name does not end in one of the accepted extensions.
    #[error("{}", messages::UNSUPPORTED_FORMAT)]
    UnsupportedFormat { file_name: String },

    /// The parsing capability rejected a file of an accepted format.
    #[error("{}", .format.read_failed_message())]
    FormatRead {
        format: DocumentFormat,
        detail: String,
    },

    #[error("{} ({})", messages::IMPORT_IN_PROGRESS, .lock.display())]
    ImportInProgress { lock: PathBuf },

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, MinnoolError>;
