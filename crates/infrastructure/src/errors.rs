use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Timeout talking to {server} over {protocol}")]
    Timeout {
        server: SocketAddr,
        protocol: &'static str,
    },

    #[error("{protocol} I/O error with {server}: {reason}")]
    Io {
        server: SocketAddr,
        protocol: &'static str,
        reason: String,
    },

    #[error("Response too large: {size} bytes (max {max})")]
    ResponseTooLarge { size: usize, max: usize },

    #[error("Cannot build query: {0}")]
    QueryBuild(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Response id {received:#06x} does not match query id {expected:#06x}")]
    IdMismatch { expected: u16, received: u16 },

    #[error("All {attempted} upstream servers failed")]
    AllServersFailed { attempted: usize },
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }
}

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse fixture file: {0}")]
    Parse(String),

    #[error("Invalid fixture for '{name}': {reason}")]
    Invalid { name: String, reason: String },
}
