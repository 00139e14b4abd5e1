//! Shared error type across tally crates.

use thiserror::Error;

/// Stable error codes, used in logs and startup diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Configuration rejected.
    BadConfig,
    /// Snapshot content could not be encoded or decoded.
    Snapshot,
    /// Filesystem or socket failure.
    Io,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::Snapshot => "SNAPSHOT",
            ClientCode::Io => "IO",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("snapshot: {0}")]
    Snapshot(String),
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TallyError::BadConfig(_) => ClientCode::BadConfig,
            TallyError::Snapshot(_) => ClientCode::Snapshot,
            TallyError::Io(_) => ClientCode::Io,
            TallyError::Internal(_) => ClientCode::Internal,
        }
    }
}

impl From<std::io::Error> for TallyError {
    fn from(e: std::io::Error) -> Self {
        TallyError::Io(e.to_string())
    }
}
