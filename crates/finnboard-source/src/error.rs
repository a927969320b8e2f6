//! Error types for finnboard-source

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Malformed data at {location}: {message}")]
    Malformed {
        location: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
