//! DSN-configured MariaDB/MySQL connection handles.
//!
//! This crate is the option-applier side of the DSN grammar in
//! `marlin-dsn`: a [`ClientHandle`] owns a [`ClientConfig`], DSN options
//! land in the config one pair at a time, and `connect` hands the result
//! to the `mysql_async` driver.
//!
//! ```rust,ignore
//! use marlin_client::ClientHandle;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut handle = ClientHandle::new();
//!     let mut conn = handle
//!         .connect_via_dsn(b"host=localhost;user=app;password={s3;cret}", None)
//!         .await?;
//!     conn.ping().await?;
//!     Ok(())
//! }
//! ```
//!
//! A failed parse leaves the handle partially configured and records the
//! failure (with its byte offset and SQLSTATE) on the handle.

pub mod config;
pub mod connection;
pub mod error;
pub mod handle;

pub use config::{ClientConfig, SslMode};
pub use connection::Connection;
pub use error::{ClientError, ClientResult, SQLSTATE_UNKNOWN};
pub use handle::ClientHandle;
