//! # Marlin
//!
//! DSN-driven connection configuration for MariaDB and MySQL servers.
//!
//! A connection is described by a single ODBC-style data source name: a
//! semicolon-separated sequence of `key=value` pairs (or bare keys). Values
//! containing separators or whitespace are quoted with curly braces, and a
//! literal `}` inside a quoted value is written as `}}`:
//!
//! ```text
//! host=db.example.com;port=3306;user=app;password={p;w}}d};database=orders
//! ```
//!
//! The `dsn` key is reserved: a DSN option pointing at another DSN would
//! recurse forever, so the parser always drops it.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use marlin::ClientHandle;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut handle = ClientHandle::new();
//!     let mut conn = handle
//!         .connect_via_dsn(b"host=localhost;user=app;password={s3;cret};database=orders", None)
//!         .await?;
//!     conn.ping().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - [`dsn`] — the DSN grammar: single-pass parser and writer
//! - [`client`] — connection configuration, handles, and entry points

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// DSN grammar: parser, writer, and escaping helpers.
pub mod dsn {
    pub use marlin_dsn::*;
}

/// Connection configuration, handles, and entry points.
pub mod client {
    pub use marlin_client::*;
}

// Re-export key types at the crate root
pub use marlin_client::{ClientConfig, ClientError, ClientHandle, ClientResult, Connection, SslMode};
pub use marlin_dsn::{DsnBuilder, DsnError, DsnResult, OptionSink, parse_dsn};
