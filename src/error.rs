//! Error types for pagechunk library.

use std::io;
use thiserror::Error;

/// Result type alias for pagechunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the serialization boundary.
///
/// Chunking itself never fails: missing elements, unresolvable ids and
/// unlocatable spans all degrade to best-effort output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Page or element input could not be deserialized.
    #[error("Invalid page data: {0}")]
    Json(String),

    /// Error during rendering of chunk output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => Error::Io(err.into()),
            _ => Error::Json(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Render("bad output".to_string());
        assert_eq!(err.to_string(), "Rendering error: bad output");

        let err = Error::Json("expected array".to_string());
        assert_eq!(err.to_string(), "Invalid page data: expected array");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
