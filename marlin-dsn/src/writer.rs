//! Rendering key/value pairs back into DSN wire format.

/// True when `value` cannot appear bare in a DSN.
///
/// Separators, braces, and whitespace all need the protection of a quoted
/// region to survive a round trip.
pub fn needs_quoting(value: &str) -> bool {
    value
        .bytes()
        .any(|b| matches!(b, b';' | b'=' | b'{' | b'}') || b.is_ascii_whitespace())
}

/// Wrap `value` in `{...}`, doubling every literal `}`.
///
/// The scanner consumes the first byte after `{` without inspecting it,
/// so a value whose first character is `}` does not survive a round trip;
/// build such values into an `init`-style statement instead of quoting
/// them directly.
pub fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('{');
    for c in value.chars() {
        out.push(c);
        if c == '}' {
            out.push('}');
        }
    }
    out.push('}');
    out
}

/// Builder that renders pairs into the semicolon-separated wire form.
///
/// Values are quoted only when the grammar requires it.
///
/// ```rust
/// use marlin_dsn::DsnBuilder;
///
/// let dsn = DsnBuilder::new()
///     .pair("host", "localhost")
///     .flag("compress")
///     .pair("init", "SET a=1;SET b=2")
///     .finish();
/// assert_eq!(dsn, "host=localhost;compress;init={SET a=1;SET b=2}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DsnBuilder {
    out: String,
}

impl DsnBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`, quoting the value when needed.
    pub fn pair(mut self, key: &str, value: &str) -> Self {
        self.separator();
        self.out.push_str(key);
        self.out.push('=');
        if needs_quoting(value) {
            self.out.push_str(&quote_value(value));
        } else {
            self.out.push_str(value);
        }
        self
    }

    /// Append a bare key with no value.
    pub fn flag(mut self, key: &str) -> Self {
        self.separator();
        self.out.push_str(key);
        self
    }

    fn separator(&mut self) {
        if !self.out.is_empty() {
            self.out.push(';');
        }
    }

    /// Render the accumulated DSN.
    pub fn finish(self) -> String {
        self.out
    }
}
