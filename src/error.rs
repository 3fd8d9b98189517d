//! Error types for rating and rate-table loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or pricing a rating input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    /// A rating factor is outside its declared domain
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl RatingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RatingError::InvalidInput(message.into())
    }
}

/// Errors raised while loading rate tables or batch inputs from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}, record {record}: {message}", path.display())]
    Record {
        path: PathBuf,
        record: usize,
        message: String,
    },

    #[error("invalid rate tables: {0}")]
    InvalidTables(String),
}

impl LoadError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        LoadError::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn record(path: impl Into<PathBuf>, record: usize, message: impl ToString) -> Self {
        LoadError::Record {
            path: path.into(),
            record,
            message: message.to_string(),
        }
    }
}
