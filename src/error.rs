//! Error handling for create-vue-template.
//! Defines the error type and result alias used throughout the application.
//!
//! The composition core (resolver and rewriter) never produces errors; every
//! variant here belongs to the surrounding layers: configuration loading,
//! catalog validation and tree materialization.

use std::io;
use thiserror::Error;

/// Custom error types for generator operations.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking the template tree
    #[error("Template traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents validation failures in user input
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents an inconsistent module catalog, e.g. two modules claiming one file
    #[error("Catalog error: {0}.")]
    CatalogError(String),

    /// Represents errors in processing ignore patterns
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(String),

    /// Represents errors raised while serializing the generated manifest
    #[error("Serialization error: {0}.")]
    SerializationError(#[from] serde_json::Error),

    /// Represents errors raised by the interactive prompt backend
    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("Output directory '{output_dir}' already exists and is not empty. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },
}

/// Convenience type alias for Results with [`GeneratorError`] as the error type.
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: GeneratorError) {
    eprintln!("{}", err);
    std::process::exit(1);
}
