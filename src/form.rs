//! The `application/x-www-form-urlencoded` encoding.
//!
//! Form encoding differs from percent-encoding in that a space is written as
//! `+` and only [`FORM_SAFE`] characters are left unencoded. On decoding,
//! consecutive octets are assembled into UTF-8.

use crate::{
    pct_enc::{self, Chunk, Chunks, DecodeOptions, EStr},
    table::{Table, FORM_SAFE},
    utf8, Error,
};
use alloc::{string::String, vec::Vec};
use core::str;

/// Options for [`encode`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct FormOptions {
    safe_set: Table,
}

impl FormOptions {
    /// Creates a new `FormOptions` with default configuration.
    pub const fn new() -> Self {
        Self {
            safe_set: Table::EMPTY,
        }
    }

    /// Sets extra characters to leave unencoded.
    ///
    /// This defaults to [`Table::EMPTY`].
    pub fn safe_set(mut self, value: Table) -> Self {
        self.safe_set = value;
        self
    }
}

/// Form-encodes a string.
///
/// A space becomes `+`, characters allowed by [`FORM_SAFE`] or the caller's
/// safe set are left unencoded, and every UTF-8 byte of any other character
/// is percent-encoded. A `%` is always encoded.
///
/// # Examples
///
/// ```
/// use uri_transform::form::{self, FormOptions};
///
/// assert_eq!(form::encode("hello world", &FormOptions::new()), "hello+world");
/// assert_eq!(form::encode("a+b=ü~", &FormOptions::new()), "a%2Bb%3D%C3%BC%7E");
/// ```
#[must_use]
pub fn encode(input: &str, opts: &FormOptions) -> String {
    encode_with(input, FORM_SAFE.or(opts.safe_set))
}

/// Form-encodes a component in which `delims` must not appear unencoded.
pub(crate) fn encode_component(input: &str, opts: &FormOptions, delims: Table) -> String {
    encode_with(input, FORM_SAFE.or(opts.safe_set).sub(delims))
}

fn encode_with(input: &str, safe: Table) -> String {
    let bytes = input.as_bytes();
    let mut buf = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        let (x, len) = utf8::next_code_point(bytes, i);
        if x == u32::from(b' ') {
            buf.push('+');
        } else if safe.allows_code_point(x) {
            buf.push_str(&input[i..i + len]);
        } else {
            pct_enc::push_encoded(&mut buf, x);
        }
        i += len;
    }
    buf
}

/// Decodes a form-encoded string, one pass or more.
///
/// In each pass, `+` becomes a space and a run of consecutive valid octets is
/// decoded as UTF-8, or as one character per byte if the run is not valid
/// UTF-8. An invalid octet leaves its `%` as is unless in strict mode.
///
/// Note that every pass converts `+` again, so decoding until stable turns a
/// `+` produced by an earlier pass into a space as well.
///
/// # Errors
///
/// Returns `Err` on an invalid percent-encoded octet in strict mode.
///
/// # Examples
///
/// ```
/// use uri_transform::{form, pct_enc::DecodeOptions};
///
/// let opts = DecodeOptions::new();
/// assert_eq!(form::decode("hello+world", &opts)?, "hello world");
/// assert_eq!(form::decode("%C3%BC%21", &opts)?, "ü!");
/// assert_eq!(form::decode("%FF%41", &opts)?, "\u{ff}A");
/// assert_eq!(form::decode("100%", &opts)?, "100%");
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn decode(input: &str, opts: &DecodeOptions) -> Result<String, Error> {
    opts.passes().try_apply(input, |s| {
        if opts.is_strict() {
            EStr::new(s)?;
        }
        Ok(decode_lenient(s))
    })
}

/// Decodes a single pass, passing invalid octets through.
pub(crate) fn decode_lenient(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut run = Vec::new();

    for chunk in Chunks::new(s) {
        match chunk {
            Chunk::PctEncoded(octet) => run.push(octet.value()),
            Chunk::Unencoded(s) => {
                flush_run(&mut buf, &mut run);
                buf.extend(s.chars().map(|ch| if ch == '+' { ' ' } else { ch }));
            }
            Chunk::BarePercent(_) => {
                flush_run(&mut buf, &mut run);
                buf.push('%');
            }
        }
    }
    flush_run(&mut buf, &mut run);
    buf
}

/// Appends a run of decoded bytes as UTF-8, falling back to one character
/// per byte when the run is not valid UTF-8.
fn flush_run(buf: &mut String, run: &mut Vec<u8>) {
    if run.is_empty() {
        return;
    }
    match str::from_utf8(run) {
        Ok(s) => buf.push_str(s),
        Err(_) => buf.extend(run.iter().copied().map(char::from)),
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_in_unencoded_runs() {
        assert_eq!(decode_lenient("+a++b+"), " a  b ");
        assert_eq!(decode_lenient("a%2B+b"), "a+ b");
        assert_eq!(decode_lenient(""), "");
    }

    #[test]
    fn runs_split_by_bare_percent() {
        assert_eq!(decode_lenient("%C3%%A9"), "\u{c3}%\u{a9}");
        assert_eq!(decode_lenient("%C3%A9%"), "é%");
    }
}
