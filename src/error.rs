//! Error types for jurygraph

use crate::graph::GraphError;
use thiserror::Error;

/// Errors that can abort a run
#[derive(Error, Debug)]
pub enum JuryGraphError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Graph invariant violation
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// A column the schema requires is not in the header
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    /// A slot-count cell that is not a non-negative integer
    #[error("{file}: row {row}: invalid count '{value}' in column '{column}'")]
    InvalidCount {
        file: String,
        row: usize,
        column: String,
        value: String,
    },
}

pub type JuryGraphResult<T> = Result<T, JuryGraphError>;
