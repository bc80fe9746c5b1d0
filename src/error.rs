//! Error types for ifc-bauzustand.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading IFC files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the IFC file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The STEP format is invalid or malformed.
    #[error("invalid STEP format: {message}")]
    InvalidStep { message: String },

    /// The file declares a schema identifier the reader does not accept.
    #[error("unsupported schema '{schema}'")]
    UnsupportedSchema { schema: String },

    /// An entity refers to an instance that does not exist in the file.
    #[error("entity #{from} references missing entity #{target}")]
    DanglingReference { from: u64, target: u64 },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to format the smartview document.
    #[error("document formatting failed")]
    Format(#[from] std::fmt::Error),

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}

/// Errors that end a processing run before a smartview file is written.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no files selected")]
    NoFiles,

    #[error("no output path")]
    NoOutput,

    /// Custom attribution needs property sets plus construction and demolition properties.
    #[error("select property sets and properties for both construction and demolition phases (missing: {missing})")]
    IncompleteSelection { missing: &'static str },

    /// None of the selected properties carried a numeric phase.
    #[error("no phases found")]
    NoPhasesFound,

    #[error(transparent)]
    Export(#[from] ExportError),
}
