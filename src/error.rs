use std::path::PathBuf;

use thiserror::Error;

use crate::model::EntityKind;

/// Failures of the load pipeline
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input CSV missing or unreadable; nothing has been written
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input CSV is empty or malformed; nothing has been written
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Database failure; the current restaurant's uncommitted batch is lost
    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("{kind} '{name}' was not reconciled")]
    Unresolved { kind: EntityKind, name: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("input contains no rows")]
    Empty,

    #[error("input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },
}
