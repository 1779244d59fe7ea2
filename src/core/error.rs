use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the donor table
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Cannot read donor data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Donor data source {path} is empty")]
    Empty { path: PathBuf },
}

/// Errors raised while turning a donor row into model features
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Column '{field}' not found for donor on line {line}")]
    MissingField { field: String, line: usize },

    #[error("Column '{field}' for donor on line {line} is not a number: '{value}'")]
    InvalidNumber {
        field: String,
        line: usize,
        value: String,
    },
}

impl FeatureError {
    pub fn field(&self) -> &str {
        match self {
            FeatureError::MissingField { field, .. } => field,
            FeatureError::InvalidNumber { field, .. } => field,
        }
    }

    /// One-based line of the offending row in the donor file
    pub fn line(&self) -> usize {
        match self {
            FeatureError::MissingField { line, .. } => *line,
            FeatureError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Errors raised by a scoring model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Cannot read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned {actual} scores for {expected} rows")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Errors that abort a single recommendation query
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Non-fatal notice that a query ranked nobody
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyResultWarning {
    pub message: String,
}

impl Default for EmptyResultWarning {
    fn default() -> Self {
        Self {
            message: "No donors found. Please check the input data.".to_string(),
        }
    }
}

impl fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
