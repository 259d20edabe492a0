//! Error taxonomy for a generation run.
//!
//! Fatal errors abort before the output file is written; `MalformedIdentifier`
//! is recoverable during index building (log and skip the entry).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An identifier string in the comments document does not follow the
    /// ID-string grammar.
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// The assembly metadata path is missing or unreadable.
    #[error("assembly metadata not found: {}", .0.display())]
    AssemblyNotFound(PathBuf),

    /// A path supplied via --comments, --readme or --styles does not exist.
    /// Omitting the option entirely is not an error.
    #[error("input file not found: {}", .0.display())]
    OptionalInputNotFound(PathBuf),

    /// The output file exists and --overwrite was not given.
    #[error("output file already exists: {} (use --overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// The comments document is not well-formed XML or lacks the expected
    /// root structure.
    #[error("invalid comments document: {0}")]
    InvalidComments(String),

    /// The metadata snapshot could not be deserialized.
    #[error("invalid assembly metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
