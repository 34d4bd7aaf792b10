//! Error types
//!
//! Every failure a note operation can produce, and the HTTP status it maps to.

use hyper::StatusCode;
use std::io;

pub type NoteResult<T> = Result<T, NoteError>;

#[derive(thiserror::Error, Debug)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(String),

    #[error("note already exists: {0}")]
    AlreadyExists(String),

    #[error("missing note name or content")]
    MissingFields,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl NoteError {
    /// Classify a filesystem error raised while operating on note `name`
    pub fn from_io(name: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(name.to_string()),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(name.to_string()),
            _ => Self::Io(err),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body sent to the client
    ///
    /// I/O details stay in the error log.
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Not Found",
            Self::AlreadyExists(_) => "Bad Request: Note already exists",
            Self::MissingFields => "Bad Request: Missing note name or content",
            Self::Io(_) => "Internal Server Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classification() {
        let err = NoteError::from_io("a.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, NoteError::NotFound(ref n) if n == "a.txt"));

        let err = NoteError::from_io("a.txt", io::Error::from(io::ErrorKind::AlreadyExists));
        assert!(matches!(err, NoteError::AlreadyExists(_)));

        let err = NoteError::from_io("a.txt", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, NoteError::Io(_)));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(NoteError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(NoteError::AlreadyExists("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(NoteError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            NoteError::Io(io::Error::other("disk")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_message_hides_io_detail() {
        let err = NoteError::Io(io::Error::other("secret path /var/x"));
        assert_eq!(err.client_message(), "Internal Server Error");
        assert!(err.to_string().contains("secret path"));
    }
}
