//! Error types for ccrecap-core

use thiserror::Error;

/// Main error type for the ccrecap-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for ccrecap-core
pub type Result<T> = std::result::Result<T, Error>;
