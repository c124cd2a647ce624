// src/errors.rs

// dependencies
use std::fmt;

// enum type to represent an error from the asset server
#[derive(Debug)]
pub enum ServeError {
    BadRequest,
    NotFound,
    Forbidden,
    Io(std::io::Error),
    Bind(String),
}

impl ServeError {
    // the HTTP status code a request failing with this error is answered with
    pub fn status(&self) -> u16 {
        match self {
            ServeError::BadRequest => 400,
            ServeError::NotFound => 404,
            ServeError::Forbidden => 403,
            ServeError::Io(_) | ServeError::Bind(_) => 500,
        }
    }
}

// implement the Display trait for the ServeError type
impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::BadRequest => write!(f, "400 Bad Request"),
            ServeError::NotFound => write!(f, "404 page not found"),
            ServeError::Forbidden => write!(f, "403 Forbidden"),
            ServeError::Io(err) => write!(f, "IO error: {}", err),
            ServeError::Bind(reason) => write!(f, "could not bind listener: {}", reason),
        }
    }
}

// implement the Error trait for the ServeError type
impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ServeError {
    fn from(err: std::io::Error) -> Self {
        ServeError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(ServeError::BadRequest.status(), 400);
        assert_eq!(ServeError::NotFound.status(), 404);
        assert_eq!(ServeError::Forbidden.status(), 403);
        assert_eq!(ServeError::Io(std::io::Error::other("disk gone")).status(), 500);
    }

    #[test]
    fn io_error_is_exposed_as_source() {
        let err = ServeError::from(std::io::Error::other("disk gone"));

        assert!(err.source().is_some());
        assert!(ServeError::NotFound.source().is_none());
        assert_eq!(err.to_string(), "IO error: disk gone");
    }
}
