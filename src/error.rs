//! Error handling for opfill.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for opfill operations.
///
/// Unresolved tags are deliberately absent: a path that does not resolve
/// leaves the tag in place and is reported as an observability event only.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A secret document is not syntactically valid JSON.
    #[error("Unable to parse JSON from {source_name}: {reason}.")]
    MalformedDocument { source_name: String, reason: String },

    /// Fetching a document from a secret backend failed.
    #[error("Secret source error: {0}.")]
    SourceError(String),

    /// The service account token could not be determined.
    #[error("Token error: {0}.")]
    TokenError(String),

    /// Neither local JSON files nor a 1Password vault and item were given.
    #[error("Missing secret source: {0}.")]
    MissingSource(String),
}

/// Convenience type alias for Results with opfill's Error as the error type.
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
