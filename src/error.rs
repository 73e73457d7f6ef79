//! Crate & protocol level errors.
//!
//! All errors are detected at the pipeline boundary (decode, route, encode)
//! and returned to the delivery runtime. The core never retries or silently
//! swallows an error: retry and skip policy belong to the caller. No error
//! here is fatal to the process — only to the single message (or, for the
//! stream-level variants, the single connection) that triggered it.

use std::{io, result};
use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

/// Errors surfaced by the alphabet pipeline.
///
/// The first four variants are message-level: they condemn one frame and
/// nothing else. `IoError` and `MissingData` are stream-level and are only
/// produced by the delivery runtime.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// An error in the network.
    #[error("IO error: {0:?}")]
    IoError(io::ErrorKind),

    /// Payload length disagrees with the fixed vote layout, or a frame
    /// declared more bytes than were available.
    #[error("Malformed frame: expected {expected} bytes, got {actual}")]
    MalformedFrame { expected: usize, actual: usize },

    /// Decoded letter is not a member of the configured key universe.
    #[error("Invalid partition key: {0}")]
    InvalidKey(String),

    /// Routed key has no partition state behind it.
    #[error("No partition configured for key '{0}'")]
    UnknownPartition(char),

    /// Snapshot could not be rendered as an output frame.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Missing data or connection closed.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the error condemns only the message that produced it and
    /// the surrounding stream can continue.
    pub fn is_message_level(&self) -> bool {
        matches!(
            self,
            Error::MalformedFrame { .. }
                | Error::InvalidKey(_)
                | Error::UnknownPartition(_)
                | Error::Encoding(_)
        )
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_io_error() {
        let err = Error::IoError(io::ErrorKind::ConnectionRefused);
        assert_eq!(err, Error::IoError(io::ErrorKind::ConnectionRefused));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        let err: Error = io_err.into();
        assert_eq!(err, Error::IoError(io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_malformed_frame_display() {
        let err = Error::MalformedFrame {
            expected: 5,
            actual: 3,
        };
        let display = format!("{}", err);
        assert!(display.contains("expected 5"));
        assert!(display.contains("got 3"));
    }

    #[test]
    fn test_invalid_key_display() {
        let err = Error::InvalidKey("Z".to_string());
        assert!(format!("{}", err).contains("Invalid partition key"));
    }

    #[test]
    fn test_unknown_partition_display() {
        let err = Error::UnknownPartition('q');
        let display = format!("{}", err);
        assert!(display.contains("No partition configured"));
        assert!(display.contains('q'));
    }

    #[test]
    fn test_message_level_classification() {
        assert!(Error::MalformedFrame {
            expected: 5,
            actual: 0
        }
        .is_message_level());
        assert!(Error::InvalidKey("9".to_string()).is_message_level());
        assert!(Error::UnknownPartition('x').is_message_level());
        assert!(Error::Encoding("bad letter".to_string()).is_message_level());

        assert!(!Error::IoError(io::ErrorKind::BrokenPipe).is_message_level());
        assert!(!Error::MissingData("closed".to_string()).is_message_level());
        assert!(!Error::Config("empty universe".to_string()).is_message_level());
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(Error::MissingData("test".to_string()));
        assert!(err.to_string().contains("Missing data"));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::Encoding("non-ascii".to_string());
        assert_eq!(err, err.clone());
    }
}
