use failure::Fail;
use serde_json;
use std::io;
use std::result;

/// Bridge error type
#[derive(Debug, Fail)]
pub enum BridgeError {
    #[fail(display = "Timed out waiting for a response from the remote server")]
    Timeout,
    #[fail(display = "Connection error: {}", _0)]
    Connection(String),
    #[fail(display = "Connection closed without response")]
    ClosedWithoutResponse,
    #[fail(display = "Invalid command: {}", _0)]
    InvalidCommand(String),
    #[fail(display = "Bridge io-error: {}", _0)]
    IOError(io::Error),
    #[fail(display = "Command serialization/Deserialization error: {}", _0)]
    SerDeError(serde_json::error::Error),
}

impl BridgeError {
    /// Classifies a socket-level failure. Expired socket timeouts surface as
    /// `WouldBlock` on unix and `TimedOut` elsewhere.
    pub(crate) fn from_socket(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => BridgeError::Timeout,
            _ => BridgeError::Connection(error.to_string()),
        }
    }

    /// Like `from_socket`, for failures after the connection was established:
    /// a peer that hung up before answering counts as closed, even when the
    /// kernel reports it as a reset.
    pub(crate) fn from_exchange(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => BridgeError::ClosedWithoutResponse,
            _ => BridgeError::from_socket(error),
        }
    }
}

impl From<io::Error> for BridgeError {
    fn from(error: io::Error) -> Self {
        BridgeError::IOError(error)
    }
}

impl From<serde_json::error::Error> for BridgeError {
    fn from(error: serde_json::error::Error) -> Self {
        BridgeError::SerDeError(error)
    }
}

/// Bridge Result type
pub type Result<T> = result::Result<T, BridgeError>;
