use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    NoChaptersFound(String),

    #[error("Invalid book: {0}")]
    InvalidBook(String),

    #[error("Invalid chapter: {0}")]
    InvalidChapter(String),

    #[error("Malformed slug: {0}")]
    MalformedSlug(String),

    #[error("Invalid substitution pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, PublishError>;
