//! Error types for client operations.

use std::fmt;

use marlin_dsn::DsnError;

/// SQLSTATE reported for client-side failures with no server state.
pub const SQLSTATE_UNKNOWN: &str = "HY000";

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Error type for client operations.
#[derive(Debug)]
pub enum ClientError {
    /// DSN parse error.
    Dsn(DsnError),
    /// Driver error.
    Driver(mysql_async::Error),
    /// Configuration error.
    Config(String),
    /// Environment lookup error.
    Env(String),
}

impl ClientError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an environment lookup error.
    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    /// SQLSTATE associated with this error.
    ///
    /// Client-side failures carry the generic unknown state; server-side
    /// states surface through the driver error itself.
    pub fn sqlstate(&self) -> &'static str {
        SQLSTATE_UNKNOWN
    }

    /// Byte offset of the offending input, for DSN parse errors.
    pub fn dsn_offset(&self) -> Option<usize> {
        match self {
            Self::Dsn(e) => Some(e.offset),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dsn(e) => write!(f, "DSN error: {}", e),
            Self::Driver(e) => write!(f, "Driver error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Env(msg) => write!(f, "Environment error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dsn(e) => Some(e),
            Self::Driver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DsnError> for ClientError {
    fn from(err: DsnError) -> Self {
        Self::Dsn(err)
    }
}

impl From<mysql_async::Error> for ClientError {
    fn from(err: mysql_async::Error) -> Self {
        Self::Driver(err)
    }
}
