//! ODBC-style DSN parsing and rendering.
//!
//! A data source name is a semicolon-separated sequence of `key=value`
//! pairs (or bare keys). Whitespace is insignificant outside quoted
//! values. A value containing `;`, `=`, `{`, or whitespace that must
//! survive the trip is enclosed in curly braces, and a literal `}` inside
//! a quoted value is doubled:
//!
//! ```text
//! host=db.example.com;compress;init={SET a=1;SET b=2};comment={closing }} brace}
//! ```
//!
//! Quoting does not nest: a `{` inside a quoted value is ordinary content.
//!
//! # Parsing
//!
//! [`parse_dsn`] feeds every recognized pair to an [`OptionSink`]; a
//! closure works too:
//!
//! ```rust
//! use marlin_dsn::parse_dsn;
//!
//! let mut pairs = Vec::new();
//! let mut sink = |key: &str, value: Option<&str>| {
//!     pairs.push((key.to_string(), value.map(str::to_string)));
//!     true
//! };
//! parse_dsn(b"host=localhost;port=3306", None, &mut sink).unwrap();
//! assert_eq!(pairs.len(), 2);
//! ```
//!
//! The key `dsn` is reserved and never reaches the sink: a DSN option
//! naming another DSN would recurse without end.
//!
//! # Rendering
//!
//! [`DsnBuilder`] goes the other way:
//!
//! ```rust
//! use marlin_dsn::DsnBuilder;
//!
//! let dsn = DsnBuilder::new()
//!     .pair("host", "localhost")
//!     .pair("init", "SET a=1;SET b=2")
//!     .finish();
//! assert_eq!(dsn, "host=localhost;init={SET a=1;SET b=2}");
//! ```

mod parser;
mod writer;

pub use parser::{OptionSink, RESERVED_KEY, is_reserved_key, parse_dsn};
pub use writer::{DsnBuilder, needs_quoting, quote_value};

use thiserror::Error;

/// Error raised when a DSN string violates the grammar.
///
/// The offset is zero-based and points into the parser's working buffer;
/// every collapsed `}}` escape before the offending byte shifts it one
/// position left of its place in the original input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("DSN parse error at byte {offset}")]
pub struct DsnError {
    /// Offset of the byte that violated the grammar.
    pub offset: usize,
}

/// Result type for DSN operations.
pub type DsnResult<T> = Result<T, DsnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DsnError { offset: 7 };
        assert_eq!(err.to_string(), "DSN parse error at byte 7");
    }
}
