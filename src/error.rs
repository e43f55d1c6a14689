//! Error handling for jstpack.
//! Defines the error type and result alias used throughout the pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, compiling or writing templates.
///
/// Missing sources and empty destinations are not errors: they are reported
/// as [`crate::processor::Warning`]s and the run continues.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Directory traversal failed
    #[error("Failed to walk '{path}': {message}.")]
    WalkError { path: PathBuf, message: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Invalid glob pattern in a source list
    #[error("Glob error: {0}.")]
    GlobError(String),

    /// The compiler rejected the template source
    #[error("Failed to compile '{}': {message}.", file.display())]
    CompileError { file: PathBuf, message: String },

    /// The compiled template failed while rendering
    #[error("Failed to render '{}': {message}.", file.display())]
    RenderError { file: PathBuf, message: String },
}

impl Error {
    /// Whether the error came out of the template compiler.
    pub fn is_compile_failure(&self) -> bool {
        matches!(self, Error::CompileError { .. } | Error::RenderError { .. })
    }
}

/// Convenience type alias for Results with jstpack's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
