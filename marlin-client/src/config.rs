//! Connection configuration assembled from DSN options.

use std::time::Duration;

use marlin_dsn::OptionSink;
use mysql_async::OptsBuilder;
use tracing::debug;

/// TLS mode for client connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    /// No TLS.
    #[default]
    Disabled,
    /// Prefer TLS but allow plaintext.
    Preferred,
    /// Require TLS.
    Required,
    /// Require TLS and verify the CA certificate.
    VerifyCa,
    /// Require TLS and verify the full certificate chain.
    VerifyIdentity,
}

impl SslMode {
    /// Parse from an option value.
    pub fn from_option(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "disabled" | "off" | "0" | "false" => Some(Self::Disabled),
            "preferred" => Some(Self::Preferred),
            "required" | "on" | "1" | "true" => Some(Self::Required),
            "verify_ca" | "verify-ca" => Some(Self::VerifyCa),
            "verify_identity" | "verify-identity" => Some(Self::VerifyIdentity),
            _ => None,
        }
    }

    /// Option-value spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Preferred => "preferred",
            Self::Required => "required",
            Self::VerifyCa => "verify_ca",
            Self::VerifyIdentity => "verify_identity",
        }
    }
}

/// Connection settings for a MariaDB or MySQL server.
///
/// Every field can be set through a DSN option via [`set_option`]; the
/// recognized vocabulary is listed there. Fields are public so callers
/// can also fill them directly or through the builder-style setters.
///
/// [`set_option`]: ClientConfig::set_option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server hostname or IP address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Username for authentication.
    pub user: Option<String>,
    /// Password for authentication.
    pub password: Option<String>,
    /// Initial database.
    pub database: Option<String>,
    /// Unix socket path, preferred over TCP when set.
    pub socket: Option<String>,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
    /// Read timeout.
    pub read_timeout: Option<Duration>,
    /// Write timeout.
    pub write_timeout: Option<Duration>,
    /// Connection character set.
    pub charset: Option<String>,
    /// Enable protocol compression.
    pub compress: bool,
    /// TLS mode.
    pub ssl_mode: SslMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: None,
            password: None,
            database: None,
            socket: None,
            connect_timeout: Some(Duration::from_secs(30)),
            read_timeout: None,
            write_timeout: None,
            charset: None,
            compress: false,
            ssl_mode: SslMode::default(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one named option to this configuration.
    ///
    /// Keys are matched case-insensitively. Recognized keys, with their
    /// ODBC-style aliases:
    ///
    /// - `host` / `server`
    /// - `port`
    /// - `user` / `uid` / `username`
    /// - `password` / `pwd`
    /// - `database` / `db`
    /// - `socket`
    /// - `connect_timeout`, `read_timeout`, `write_timeout` (seconds)
    /// - `charset`
    /// - `compress` (boolean; a bare key means on)
    /// - `ssl_mode` / `sslmode`
    ///
    /// Returns `true` when the option was recognized and applied. Unknown
    /// keys and unparseable values are ignored and return `false`.
    pub fn set_option(&mut self, key: &str, value: Option<&str>) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "host" | "server" => set_string_into(&mut self.host, value),
            "port" => match value.and_then(|v| v.parse::<u16>().ok()) {
                Some(port) => {
                    self.port = port;
                    true
                }
                None => {
                    debug!(key, "ignoring option with unparseable port");
                    false
                }
            },
            "user" | "uid" | "username" => set_string(&mut self.user, value),
            "password" | "pwd" => set_string(&mut self.password, value),
            "database" | "db" => set_string(&mut self.database, value),
            "socket" => set_string(&mut self.socket, value),
            "connect_timeout" => set_duration(&mut self.connect_timeout, value),
            "read_timeout" => set_duration(&mut self.read_timeout, value),
            "write_timeout" => set_duration(&mut self.write_timeout, value),
            "charset" => set_string(&mut self.charset, value),
            "compress" => {
                self.compress = flag_value(value);
                true
            }
            "ssl_mode" | "sslmode" => match value.and_then(SslMode::from_option) {
                Some(mode) => {
                    self.ssl_mode = mode;
                    true
                }
                None => {
                    debug!(key, "ignoring option with unknown TLS mode");
                    false
                }
            },
            _ => {
                debug!(key, "ignoring unknown option");
                false
            }
        }
    }

    /// Convert to a `mysql_async` options builder.
    pub fn to_opts(&self) -> OptsBuilder {
        let mut builder = OptsBuilder::default()
            .ip_or_hostname(&self.host)
            .tcp_port(self.port)
            .db_name(self.database.as_ref());

        if let Some(ref user) = self.user {
            builder = builder.user(Some(user));
        }
        if let Some(ref pass) = self.password {
            builder = builder.pass(Some(pass));
        }
        if let Some(ref socket) = self.socket {
            builder = builder.socket(Some(socket));
        }

        // Note: mysql_async's builder does not carry timeouts or charset;
        // timeouts belong at the pool/call level and the charset is
        // negotiated during the handshake.
        let _ = (self.connect_timeout, self.read_timeout, self.write_timeout);

        match self.ssl_mode {
            SslMode::Disabled => {
                builder = builder.prefer_socket(true);
            }
            SslMode::Preferred | SslMode::Required => {
                // mysql_async handles TLS via the ssl_opts builder
            }
            SslMode::VerifyCa | SslMode::VerifyIdentity => {
                // Would need ssl_opts with proper cert verification
            }
        }

        builder
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the Unix socket path.
    pub fn socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Enable or disable protocol compression.
    pub fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Set the TLS mode.
    pub fn ssl_mode(mut self, mode: SslMode) -> Self {
        self.ssl_mode = mode;
        self
    }
}

impl OptionSink for ClientConfig {
    fn apply_option(&mut self, key: &str, value: Option<&str>) -> bool {
        self.set_option(key, value)
    }
}

fn set_string(slot: &mut Option<String>, value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v.to_string());
            true
        }
        None => false,
    }
}

fn set_string_into(slot: &mut String, value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            *slot = v.to_string();
            true
        }
        None => false,
    }
}

fn set_duration(slot: &mut Option<Duration>, value: Option<&str>) -> bool {
    match value.and_then(|v| v.parse::<u64>().ok()) {
        Some(secs) => {
            *slot = Some(Duration::from_secs(secs));
            true
        }
        None => false,
    }
}

fn flag_value(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes"),
    }
}
