//! Single-pass DSN scanner.

use tracing::debug;

use crate::{DsnError, DsnResult};

/// Key reserved to stop a DSN option from naming another DSN.
///
/// Pairs whose key matches case-insensitively are dropped before they
/// reach the sink.
pub const RESERVED_KEY: &str = "dsn";

/// Check whether `key` is the reserved anti-recursion key.
pub fn is_reserved_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(RESERVED_KEY)
}

/// Receiver for the key/value pairs recognized in a DSN.
///
/// The returned flag reports whether the sink recognized the option. The
/// parser ignores it, so unknown keys never fail a parse.
pub trait OptionSink {
    /// Apply one configuration option.
    ///
    /// `value` is `None` when the pair carried no `=`.
    fn apply_option(&mut self, key: &str, value: Option<&str>) -> bool;
}

impl<F> OptionSink for F
where
    F: FnMut(&str, Option<&str>) -> bool,
{
    fn apply_option(&mut self, key: &str, value: Option<&str>) -> bool {
        self(key, value)
    }
}

/// Quoting state of the scanner.
///
/// Only one level is recognized; an opening brace while already quoted is
/// value content, not a nested quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    Unquoted,
    Quoted,
}

/// Parse a DSN and feed every recognized pair to `sink`, left to right.
///
/// With `len` of `None` the input ends at its first zero byte (or at the
/// end of the slice if there is none); `Some(n)` is capped at the slice
/// length. The input itself is never mutated: the scanner works on an
/// owned copy, so parsing the same bytes twice yields the same pairs.
///
/// Structural bytes outside quoting are `;`, `=`, `{`, and `}`; any of
/// the first three appearing before a key has started is an error carrying
/// the offset of the offending byte. An unmatched `}` outside quoting is
/// inert. Options applied before an error are not rolled back.
pub fn parse_dsn<S: OptionSink>(dsn: &[u8], len: Option<usize>, sink: &mut S) -> DsnResult<()> {
    let len = match len {
        Some(n) => n.min(dsn.len()),
        None => dsn.iter().position(|&b| b == 0).unwrap_or(dsn.len()),
    };
    debug!(dsn_len = len, "parse_dsn()");

    // Working copy with a zero sentinel; shrinks as escapes collapse.
    let mut buf = Vec::with_capacity(len + 1);
    buf.extend_from_slice(&dsn[..len]);
    buf.push(0);

    let mut end = len;
    let mut pos = 0usize;
    let mut key: Option<usize> = None;
    let mut val: Option<usize> = None;
    let mut quoting = Quoting::Unquoted;

    while pos <= end {
        // Whitespace is insignificant unless it sits inside braces.
        if buf[pos].is_ascii_whitespace() && quoting == Quoting::Unquoted {
            pos += 1;
            continue;
        }

        match buf[pos] {
            b'{' if quoting == Quoting::Unquoted => {
                if key.is_none() {
                    return Err(DsnError { offset: pos });
                }
                quoting = Quoting::Quoted;
                if pos < end {
                    pos += 1;
                    val = Some(pos);
                }
                // The byte now under the cursor is value content; the
                // shared advance below consumes it without inspection.
            }
            b'}' if quoting == Quoting::Quoted => {
                if key.is_none() {
                    return Err(DsnError { offset: pos });
                }
                if pos < end && buf[pos + 1] == b'}' {
                    // `}}` collapses to one literal `}`. The buffer
                    // shrinks with the logical end, so a probe at the end
                    // always lands on the sentinel, never a stale byte.
                    buf.remove(pos);
                    end -= 1;
                    pos += 2;
                    continue;
                }
                quoting = Quoting::Unquoted;
                buf[pos] = 0;
                pos += 1;
                continue;
            }
            b'=' if quoting == Quoting::Unquoted => {
                if key.is_none() {
                    return Err(DsnError { offset: pos });
                }
                buf[pos] = 0;
                pos += 1;
                if pos < end {
                    val = Some(pos);
                }
                continue;
            }
            b';' if quoting == Quoting::Unquoted => {
                if key.is_none() {
                    return Err(DsnError { offset: pos });
                }
                buf[pos] = 0;
                pos += 1;
                emit(&buf, key.take(), val.take(), sink);
                continue;
            }
            _ => {}
        }

        if key.is_none() && buf[pos] != 0 {
            key = Some(pos);
        }
        pos += 1;
    }

    // Input without a trailing `;` still flushes its last pair.
    if key.is_some() {
        emit(&buf, key, val, sink);
    }
    Ok(())
}

/// Hand one terminated pair to the sink, unless the key is reserved.
fn emit<S: OptionSink>(buf: &[u8], key: Option<usize>, val: Option<usize>, sink: &mut S) {
    let Some(key_start) = key else { return };
    let key_bytes = terminated(buf, key_start);
    if key_bytes.eq_ignore_ascii_case(RESERVED_KEY.as_bytes()) {
        debug!("dropping reserved `dsn` option");
        return;
    }
    let key_text = String::from_utf8_lossy(key_bytes);
    let val_text = val.map(|start| String::from_utf8_lossy(terminated(buf, start)));
    debug!(key = %key_text, has_value = val_text.is_some(), "applying option");
    sink.apply_option(&key_text, val_text.as_deref());
}

/// Slice from `start` to the next zero byte; the sentinel guarantees one.
fn terminated(buf: &[u8], start: usize) -> &[u8] {
    let stop = buf[start..]
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(buf.len() - start);
    &buf[start..start + stop]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    type Pairs = Vec<(String, Option<String>)>;

    fn collect(dsn: &[u8], len: Option<usize>) -> DsnResult<Pairs> {
        let mut pairs = Pairs::new();
        let mut sink = |key: &str, value: Option<&str>| {
            pairs.push((key.to_string(), value.map(str::to_string)));
            true
        };
        parse_dsn(dsn, len, &mut sink)?;
        Ok(pairs)
    }

    fn pair(key: &str, value: &str) -> (String, Option<String>) {
        (key.to_string(), Some(value.to_string()))
    }

    fn bare(key: &str) -> (String, Option<String>) {
        (key.to_string(), None)
    }

    #[test]
    fn test_parse_single_pair() {
        let pairs = collect(b"host=localhost", None).unwrap();
        assert_eq!(pairs, vec![pair("host", "localhost")]);
    }

    #[test]
    fn test_parse_pairs_in_order() {
        let pairs = collect(b"host=localhost;port=3306", None).unwrap();
        assert_eq!(pairs, vec![pair("host", "localhost"), pair("port", "3306")]);
    }

    #[test]
    fn test_parse_trailing_semicolon() {
        let pairs = collect(b"host=localhost;", None).unwrap();
        assert_eq!(pairs, vec![pair("host", "localhost")]);
    }

    #[test]
    fn test_parse_bare_trailing_key_flushed() {
        let pairs = collect(b"key1=val1;key2", None).unwrap();
        assert_eq!(pairs, vec![pair("key1", "val1"), bare("key2")]);
    }

    #[test]
    fn test_parse_bare_key_flag() {
        let pairs = collect(b"compress;host=h", None).unwrap();
        assert_eq!(pairs, vec![bare("compress"), pair("host", "h")]);
    }

    #[test]
    fn test_parse_trailing_equals_has_no_value() {
        // No bytes remain after `=`, so no value ever starts.
        let pairs = collect(b"key=", None).unwrap();
        assert_eq!(pairs, vec![bare("key")]);
    }

    #[test]
    fn test_parse_empty_value_before_semicolon() {
        let pairs = collect(b"key=;x=1", None).unwrap();
        assert_eq!(pairs, vec![pair("key", ""), pair("x", "1")]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(collect(b"", None).unwrap(), Pairs::new());
        assert_eq!(collect(b"   ", None).unwrap(), Pairs::new());
    }

    #[test]
    fn test_parse_reserved_key_dropped() {
        let pairs = collect(b"dsn=other;host=localhost", None).unwrap();
        assert_eq!(pairs, vec![pair("host", "localhost")]);
    }

    #[test]
    fn test_parse_reserved_key_case_insensitive() {
        let pairs = collect(b"host=h;DSN=x;Dsn={a;b};dSn", None).unwrap();
        assert_eq!(pairs, vec![pair("host", "h")]);
    }

    #[test]
    fn test_parse_quoted_value_keeps_separators() {
        let pairs = collect(b"init={SET a=1;SET b=2};host=h", None).unwrap();
        assert_eq!(pairs, vec![pair("init", "SET a=1;SET b=2"), pair("host", "h")]);
    }

    #[test]
    fn test_parse_quoted_value_keeps_whitespace() {
        let pairs = collect(b"k={ a b }", None).unwrap();
        assert_eq!(pairs, vec![pair("k", " a b ")]);
    }

    #[test]
    fn test_parse_brace_doubling() {
        let pairs = collect(b"opt={a;b=c}}d}", None).unwrap();
        assert_eq!(pairs, vec![pair("opt", "a;b=c}d")]);
    }

    #[test]
    fn test_parse_brace_doubling_before_final_close() {
        let pairs = collect(b"k={a}}b}", None).unwrap();
        assert_eq!(pairs, vec![pair("k", "a}b")]);
    }

    #[test]
    fn test_parse_consecutive_doubled_braces() {
        // The advance past a collapsed `}}` swallows the next byte, so the
        // second escape's first `}` becomes content and its second `}`
        // closes the quote; `b` is post-close junk and is dropped.
        let pairs = collect(b"k={a}}}}b};x=1", None).unwrap();
        assert_eq!(pairs, vec![pair("k", "a}}"), pair("x", "1")]);
    }

    #[test]
    fn test_parse_open_brace_inside_quotes_is_literal() {
        let pairs = collect(b"k={a{b}", None).unwrap();
        assert_eq!(pairs, vec![pair("k", "a{b")]);
    }

    #[test]
    fn test_parse_unclosed_brace_runs_to_end() {
        let pairs = collect(b"k={a;b", None).unwrap();
        assert_eq!(pairs, vec![pair("k", "a;b")]);
    }

    #[test]
    fn test_parse_unmatched_close_brace_is_inert() {
        let pairs = collect(b"a=x}y", None).unwrap();
        assert_eq!(pairs, vec![pair("a", "x}y")]);
    }

    #[test]
    fn test_parse_close_brace_may_start_a_key() {
        let pairs = collect(b"}k=v", None).unwrap();
        assert_eq!(pairs, vec![pair("}k", "v")]);
    }

    #[test]
    fn test_parse_whitespace_around_pairs() {
        // Leading whitespace never starts a key; bytes between a token and
        // its terminator are kept verbatim.
        let pairs = collect(b"  host=localhost ", None).unwrap();
        assert_eq!(pairs, vec![pair("host", "localhost ")]);
    }

    #[test]
    fn test_parse_space_before_equals_stays_in_key() {
        let pairs = collect(b"host =x", None).unwrap();
        assert_eq!(pairs, vec![pair("host ", "x")]);
    }

    #[test]
    fn test_parse_spaced_reserved_key_is_not_reserved() {
        // `dsn ` is a different key from `dsn` and is forwarded.
        let pairs = collect(b"dsn =x", None).unwrap();
        assert_eq!(pairs, vec![pair("dsn ", "x")]);
    }

    #[test]
    fn test_parse_second_equals_restarts_value() {
        let pairs = collect(b"a=b=c", None).unwrap();
        assert_eq!(pairs, vec![pair("a", "c")]);
    }

    #[test]
    fn test_parse_bytes_after_quoted_value_are_dropped() {
        let pairs = collect(b"a={x}y;b=1", None).unwrap();
        assert_eq!(pairs, vec![pair("a", "x"), pair("b", "1")]);
    }

    #[test]
    fn test_parse_empty_braces_yield_close_brace() {
        // The byte right after `{` is consumed blind, so `{}` never sees
        // its closer and the value runs to the next terminator.
        let pairs = collect(b"a={}", None).unwrap();
        assert_eq!(pairs, vec![pair("a", "}")]);
    }

    #[test]
    fn test_parse_value_without_key_errors() {
        assert_eq!(collect(b"=value", None), Err(DsnError { offset: 0 }));
    }

    #[test]
    fn test_parse_semicolon_without_key_errors() {
        assert_eq!(collect(b"a;;b", None), Err(DsnError { offset: 2 }));
        assert_eq!(collect(b";a=1", None), Err(DsnError { offset: 0 }));
    }

    #[test]
    fn test_parse_open_brace_without_key_errors() {
        assert_eq!(collect(b"{x}", None), Err(DsnError { offset: 0 }));
        assert_eq!(collect(b"a=1;{x}", None), Err(DsnError { offset: 4 }));
    }

    #[test]
    fn test_parse_error_offset_tracks_collapsed_buffer() {
        // The `}}` collapse shifts everything after it one byte left, so
        // the second `;` (offset 9 in the input) reports offset 8.
        assert_eq!(collect(b"k={a}}b};;", None), Err(DsnError { offset: 8 }));
    }

    #[test]
    fn test_parse_error_keeps_already_applied_options() {
        let mut pairs = Pairs::new();
        let mut sink = |key: &str, value: Option<&str>| {
            pairs.push((key.to_string(), value.map(str::to_string)));
            true
        };
        let err = parse_dsn(b"host=h;;port=3306", None, &mut sink).unwrap_err();
        assert_eq!(err.offset, 7);
        assert_eq!(pairs, vec![pair("host", "h")]);
    }

    #[test]
    fn test_parse_explicit_len_truncates() {
        let pairs = collect(b"host=a;junk", Some(6)).unwrap();
        assert_eq!(pairs, vec![pair("host", "a")]);
    }

    #[test]
    fn test_parse_explicit_len_capped_at_slice() {
        let pairs = collect(b"host=a", Some(64)).unwrap();
        assert_eq!(pairs, vec![pair("host", "a")]);
    }

    #[test]
    fn test_parse_len_none_stops_at_nul() {
        let pairs = collect(b"host=a\0port=3306", None).unwrap();
        assert_eq!(pairs, vec![pair("host", "a")]);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let dsn = b"host=h;opt={a}}b};flag";
        let first = collect(dsn, None).unwrap();
        let second = collect(dsn, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![pair("host", "h"), pair("opt", "a}b"), bare("flag")]);
    }

    #[test]
    fn test_parse_ignores_sink_result() {
        let mut calls = 0usize;
        let mut sink = |_: &str, _: Option<&str>| {
            calls += 1;
            false
        };
        parse_dsn(b"a=1;b=2", None, &mut sink).unwrap();
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_is_reserved_key() {
        assert!(is_reserved_key("dsn"));
        assert!(is_reserved_key("DSN"));
        assert!(is_reserved_key("Dsn"));
        assert!(!is_reserved_key("dsn2"));
        assert!(!is_reserved_key("dsn "));
    }
}
