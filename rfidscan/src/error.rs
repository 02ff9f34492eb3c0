// rfidscan/src/error.rs

use thiserror::Error;

use crate::config::store::Field;
use crate::types::StatusCode;

/// Crate-wide error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The reader answered the version probe with a sentinel value
    /// (0x00 or 0xFF), meaning nothing is listening on the bus.
    #[error("reader not responding: version register reads {version:#04x}")]
    NotResponding { version: u8 },

    #[error("reader reported status: {0}")]
    Status(StatusCode),

    #[error("invalid uid length: {0} bytes (expected 4..=10)")]
    InvalidUidLength(usize),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown operating mode: {0}")]
    UnknownMode(String),

    #[error("WRITE mode requires a payload")]
    MissingPayload,

    #[error("value for {field} too long: max {max} bytes, got {actual}")]
    FieldTooLong {
        field: Field,
        max: usize,
        actual: usize,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: Field, reason: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("storage image malformed: {0}")]
    Storage(String),

    #[error("unknown console command: {0}")]
    UnknownCommand(String),

    #[error("firmware update failed: {0}")]
    Update(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<StatusCode> for Error {
    fn from(code: StatusCode) -> Self {
        Error::Status(code)
    }
}

impl Error {
    /// Collapse an error raised during a block operation into the status
    /// code recorded for that block.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Status(code) => *code,
            Error::NotResponding { .. } => StatusCode::Timeout,
            _ => StatusCode::InternalError,
        }
    }
}
