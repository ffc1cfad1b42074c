//! Error Taxonomy
//! Fatal failure modes shared by the loading and statistics layers.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    #[error("required column '{0}' is missing from the dataset")]
    SchemaMismatch(String),

    #[error("column '{column}' holds a non-numeric value: '{value}'")]
    ParseError { column: String, value: String },

    #[error("need at least {needed} data points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("duplicate borough in dataset: '{0}'")]
    DuplicateBorough(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
