//! Error handling for stencil.
//! Defines the error type and result alias shared by the scaffolder and the
//! documentation pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for stencil operations.
///
/// Every variant is fatal for the current invocation. The only condition recovered
/// locally (a template missing from the catalog) is reported as a warning instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Template syntax or data error while rendering
    #[error("Template error: {0}.")]
    TemplateRenderError(#[from] minijinja::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// YAML could not be parsed
    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// The structure descriptor contains a value stencil does not understand
    #[error("Invalid structure entry '{path}': {reason}.")]
    StructureError { path: String, reason: String },

    /// A descriptor entry collides with something of another kind on disk
    #[error("Cannot create {expected} '{}': a {found} already exists.", .path.display())]
    EntryConflict {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    /// An external converter exited unsuccessfully
    #[error("Command `{command}` failed with {status}: {stderr}")]
    ExternalToolError {
        command: String,
        status: String,
        stderr: String,
    },

    /// A conversion step reported success but produced no file
    #[error("Expected output was not generated: '{}'.", .0.display())]
    MissingOutputError(PathBuf),

    /// Failure while walking a directory tree
    #[error("Failed to walk directory: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// Invalid include pattern in the pipeline configuration
    #[error("Invalid glob pattern: {0}.")]
    GlobError(#[from] globset::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
