use crate::response::{StatusCode, ValueKind};
use thiserror::Error;

/// Syntax errors in a domain name, in presentation or wire form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("empty label")]
    EmptyLabel,

    #[error("label exceeds 63 octets ({0})")]
    LabelTooLong(usize),

    #[error("name exceeds 255 octets ({0})")]
    NameTooLong(usize),

    #[error("invalid escape sequence")]
    BadEscape,

    #[error("wire name truncated")]
    Truncated,

    #[error("compression pointer in uncompressed name")]
    CompressionPointer,

    #[error("{0} trailing octets after root label")]
    TrailingData(usize),
}

/// Synchronous failures at submit time. The transaction is never created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Bad domain name '{name}': {reason}")]
    BadName { name: String, reason: NameError },

    #[error("Bad query type: {0}")]
    BadType(u16),

    #[error("Engine busy: {limit} transactions already outstanding")]
    EngineBusy { limit: usize },

    #[error("Engine has been shut down")]
    EngineShutDown,
}

/// Structural problems met while reading a response tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFault {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not {expected}")]
    WrongType {
        field: &'static str,
        expected: ValueKind,
    },

    #[error("field '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },

    #[error("unknown address family '{0}'")]
    UnknownAddressFamily(String),

    #[error("{family} address data has {len} octets")]
    MalformedAddressData { family: &'static str, len: usize },

    #[error("malformed owner name: {0}")]
    MalformedName(NameError),
}

/// Per-transaction failures reported after a `Completed` notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    #[error("No secure responses obtained")]
    NoSecureAnswers,

    #[error("Non existent domain name")]
    NonexistentDomain,

    #[error("No addresses found")]
    NoAddressesFound,

    #[error("Bad response status: {0}")]
    BadStatus(StatusCode),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeFault),
}

/// The notification mechanism failed independently of any DNS status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transport error {code}: {message}")]
pub struct TransportFailure {
    pub code: u32,
    pub message: String,
}

impl TransportFailure {
    /// getdns callback type for a failed callback.
    pub const CALLBACK_ERROR: u32 = 703;
    /// getdns callback type for a timed out callback.
    pub const CALLBACK_TIMEOUT: u32 = 702;

    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Self::CALLBACK_ERROR, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(Self::CALLBACK_TIMEOUT, message)
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid engine configuration: {0}")]
    ConfigInvalid(String),

    #[error("Event loop failure: {reason} ({abandoned} transactions abandoned)")]
    EventLoopFailure { reason: String, abandoned: usize },
}
