use std::path::PathBuf;

use odot_vdf_core::model::preparation::PreparationError;

#[derive(thiserror::Error, Debug)]
pub enum VdfAppError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("Error writing to csv: {0}")]
    CsvWriteError(String),
    #[error("Failure preparing volume-delay attributes: {0}")]
    PreparationError(#[from] PreparationError),
}
