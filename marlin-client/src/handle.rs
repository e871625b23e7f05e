//! Connection handle: option target plus error sink.

use marlin_dsn::parse_dsn;
use tracing::debug;

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::{ClientError, ClientResult};

/// A connection handle.
///
/// Options accumulate on the handle (normally by way of a DSN), failures
/// are recorded on it, and [`connect`] turns it into a live
/// [`Connection`].
///
/// [`connect`]: ClientHandle::connect
#[derive(Debug, Default)]
pub struct ClientHandle {
    config: ClientConfig,
    last_error: Option<ClientError>,
}

impl ClientHandle {
    /// Create a handle with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle from an existing configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            last_error: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Record an error on the handle.
    pub fn set_error(&mut self, err: ClientError) {
        self.last_error = Some(err);
    }

    /// Last error recorded on this handle.
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Take and clear the last recorded error.
    pub fn take_error(&mut self) -> Option<ClientError> {
        self.last_error.take()
    }

    /// Parse `dsn` and apply every recognized option to this handle.
    ///
    /// `len` follows [`parse_dsn`]: `None` means the input ends at its
    /// first zero byte. A parse failure is recorded as the handle's last
    /// error and returned; options applied before the failure stay
    /// applied, leaving the handle partially configured.
    pub fn apply_dsn(&mut self, dsn: &[u8], len: Option<usize>) -> ClientResult<()> {
        match parse_dsn(dsn, len, &mut self.config) {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!(offset = err.offset, "DSN parse failed");
                self.set_error(ClientError::Dsn(err));
                Err(ClientError::Dsn(err))
            }
        }
    }

    /// Read a DSN from the environment variable `var` and apply it.
    pub fn apply_dsn_from_env(&mut self, var: &str) -> ClientResult<()> {
        let dsn = match std::env::var(var) {
            Ok(dsn) => dsn,
            Err(_) => {
                let msg = format!("environment variable not found: {}", var);
                self.set_error(ClientError::env(msg.clone()));
                return Err(ClientError::env(msg));
            }
        };
        self.apply_dsn(dsn.as_bytes(), None)
    }

    /// Establish a connection using the accumulated configuration.
    pub async fn connect(&self) -> ClientResult<Connection> {
        debug!(
            host = %self.config.host,
            port = self.config.port,
            database = ?self.config.database,
            "connecting"
        );
        let conn = mysql_async::Conn::new(self.config.to_opts()).await?;
        Ok(Connection::new(conn))
    }

    /// Parse `dsn`, then connect with whatever options it applied.
    ///
    /// Every connection parameter arrives through the DSN; there are no
    /// separate host/user/password arguments. A parse failure aborts
    /// before any network activity, leaving the error on the handle.
    pub async fn connect_via_dsn(
        &mut self,
        dsn: &[u8],
        len: Option<usize>,
    ) -> ClientResult<Connection> {
        self.apply_dsn(dsn, len)?;
        self.connect().await
    }
}
