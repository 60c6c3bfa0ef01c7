use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or manipulating session descriptions
#[derive(Error, Debug)]
pub enum Error {
    /// Missing `v=` line or unsupported protocol version
    #[error("Invalid SDP version")]
    InvalidVersion,

    /// Malformed line or attribute body
    #[error("Invalid SDP format: {0}")]
    InvalidFormat(String),

    /// The reader was asked for a line when none remain
    #[error("No SDP lines remaining")]
    Underrun,

    /// The session description violates a structural requirement
    #[error("Invalid session description: {0}")]
    InvalidSessionDescription(String),

    /// Parser error
    #[error("Parser error: {0}")]
    Parser(String),
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Error::Parser(format!("Parsing failed: {err}"))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::InvalidFormat(format!("invalid numeric field: {err}"))
    }
}
