// error.rs - Error taxonomy for loading, configuration and the block pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by xoblocks
#[derive(Error, Debug)]
pub enum XoError {
    /// Malformed input: missing field, bad position, unsorted or too short chromosome
    #[error("Input format error in {context}: {reason}")]
    InputFormat { context: String, reason: String },

    /// Required column absent from the table header
    #[error("Input format error: required column '{column}' not found in header")]
    MissingColumn { column: String },

    /// Invalid configuration value, fatal before any chromosome is processed
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

impl XoError {
    /// Input-format error scoped to one chromosome
    pub fn chromosome(chrom_id: &str, reason: impl Into<String>) -> Self {
        XoError::InputFormat {
            context: format!("chromosome {}", chrom_id),
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        XoError::Configuration(reason.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        XoError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the input-format family (per-chromosome or whole-table)
    pub fn is_input_format(&self) -> bool {
        matches!(
            self,
            XoError::InputFormat { .. } | XoError::MissingColumn { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, XoError>;
