//! Percent-encoding utilities from RFC 3986.
//!
//! The encoder walks its input by code point and escapes every UTF-8 byte of
//! a character that is not left unencoded. The decoder maps each
//! percent-encoded octet to the character with the same scalar value, so
//! that `%C3%A9` decodes to `"Ã©"` rather than `"é"`; use [`EStr::decode`]
//! when UTF-8 grouping is wanted.

mod options;

pub use options::{DecodeOptions, NormalizeOptions, Rfc3986Options};

use crate::{
    error::err,
    table::{Table, HEXDIG, RESERVED, UNRESERVED},
    utf8, Error,
};
use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// Percent-encodes a string.
///
/// A character is left unencoded if it is ASCII and allowed by the union of
/// [`UNRESERVED`], the extra characters of the context and the caller's safe
/// set, or if reserved characters are kept and it is [`RESERVED`]. Otherwise
/// every UTF-8 byte of it is encoded as an uppercase octet.
///
/// Unless `%` is re-encoded, valid percent-encoded octets are copied as is
/// and a `%` that does not start one is encoded as `%25`.
///
/// # Errors
///
/// Returns `Err` on an invalid percent-encoded octet in strict mode.
///
/// # Examples
///
/// ```
/// use uri_transform::pct_enc::{self, Rfc3986Options};
///
/// let opts = Rfc3986Options::new();
/// assert_eq!(pct_enc::encode(":/?#[]@", &opts)?, "%3A%2F%3F%23%5B%5D%40");
/// assert_eq!(pct_enc::encode("%20é", &opts)?, "%20%C3%A9");
/// assert_eq!(pct_enc::encode("%GG", &opts)?, "%25GG");
///
/// let opts = Rfc3986Options::new().reencode_percent(true);
/// assert_eq!(pct_enc::encode("%20", &opts)?, "%2520");
///
/// let opts = Rfc3986Options::new().strict(true);
/// assert!(pct_enc::encode("%GG", &opts).is_err());
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn encode(input: &str, opts: &Rfc3986Options) -> Result<String, Error> {
    if opts.strict && !opts.reencode_percent {
        EStr::new(input)?;
    }

    let safe = opts.context.safe_set().or(opts.safe_set);
    let bytes = input.as_bytes();
    let mut buf = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && !opts.reencode_percent {
            if is_pct_encoded_at(bytes, i) {
                buf.push_str(&input[i..i + 3]);
                i += 3;
            } else {
                buf.push_str(encode_byte(b'%'));
                i += 1;
            }
            continue;
        }

        let (x, len) = utf8::next_code_point(bytes, i);
        if safe.allows_code_point(x) || (opts.keep_reserved && RESERVED.allows_code_point(x)) {
            buf.push_str(&input[i..i + len]);
        } else {
            push_encoded(&mut buf, x);
        }
        i += len;
    }
    Ok(buf)
}

/// Decodes percent-encoded octets in a string, one pass or more.
///
/// In each pass, a valid octet is replaced with the character whose scalar
/// value equals the octet; bytes are not grouped into UTF-8 sequences.
/// An invalid octet leaves its `%` as is unless in strict mode.
///
/// # Errors
///
/// Returns `Err` on an invalid percent-encoded octet in strict mode.
///
/// # Examples
///
/// ```
/// use uri_transform::pct_enc::{self, DecodeOptions};
///
/// assert_eq!(pct_enc::decode("hello%20world", &DecodeOptions::new())?, "hello world");
/// assert_eq!(pct_enc::decode("%2f", &DecodeOptions::new())?, "/");
/// assert_eq!(pct_enc::decode("abc%", &DecodeOptions::new())?, "abc%");
/// assert_eq!(pct_enc::decode("%C3%A9", &DecodeOptions::new())?, "\u{c3}\u{a9}");
///
/// let opts = DecodeOptions::new().until_stable(true);
/// assert_eq!(pct_enc::decode("%252520", &opts)?, " ");
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn decode(input: &str, opts: &DecodeOptions) -> Result<String, Error> {
    opts.passes().try_apply(input, |s| {
        if opts.strict {
            EStr::new(s)?;
        }
        Ok(decode_lenient(s))
    })
}

/// Decodes a single pass, passing invalid octets through.
pub(crate) fn decode_lenient(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    for chunk in Chunks::new(s) {
        match chunk {
            Chunk::Unencoded(s) => buf.push_str(s),
            Chunk::PctEncoded(octet) => buf.push(char::from(octet.value())),
            Chunk::BarePercent(_) => buf.push('%'),
        }
    }
    buf
}

/// Normalizes percent-encoded octets in a string as in
/// [Section 6.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-6.2.2).
///
/// Octets of unreserved characters are decoded and the hexadecimal digits of
/// the remaining octets are uppercased. An invalid octet leaves its `%` as is
/// unless in strict mode.
///
/// Normalization is idempotent on any string that has no invalid octet.
///
/// # Errors
///
/// Returns `Err` on an invalid percent-encoded octet in strict mode.
///
/// # Examples
///
/// ```
/// use uri_transform::pct_enc::{self, NormalizeOptions};
///
/// let opts = NormalizeOptions::new();
/// assert_eq!(pct_enc::normalize("%2f%3a", &opts)?, "%2F%3A");
/// assert_eq!(pct_enc::normalize("%41%7e", &opts)?, "A~");
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn normalize(input: &str, opts: &NormalizeOptions) -> Result<String, Error> {
    if opts.strict {
        EStr::new(input)?;
    }

    let mut buf = String::with_capacity(input.len());
    for chunk in Chunks::new(input) {
        match chunk {
            Chunk::Unencoded(s) => buf.push_str(s),
            Chunk::PctEncoded(octet) => {
                let x = octet.value();
                if UNRESERVED.allows_ascii(x) {
                    buf.push(char::from(x));
                } else if opts.uppercase_hex {
                    buf.push_str(encode_byte(x));
                } else {
                    buf.push_str(octet.as_str());
                }
            }
            Chunk::BarePercent(_) => buf.push('%'),
        }
    }
    Ok(buf)
}

/// Percent-encodes a component in which `delims` must not appear unencoded.
///
/// Unlike [`encode`], every `%` is encoded unless the options allow it, and
/// characters in `delims` are encoded whatever the options say.
pub(crate) fn encode_component(
    input: &str,
    opts: &Rfc3986Options,
    delims: Table,
) -> Result<String, Error> {
    if opts.strict {
        EStr::new(input)?;
    }

    let safe = opts.context.safe_set().or(opts.safe_set).sub(delims);
    let reserved = if opts.keep_reserved {
        RESERVED.sub(delims)
    } else {
        Table::EMPTY
    };
    Ok(encode_unless(input, |x| {
        safe.allows_code_point(x) || reserved.allows_code_point(x)
    }))
}

/// Percent-encodes every code point for which `keep` returns `false`.
pub(crate) fn encode_unless(input: &str, mut keep: impl FnMut(u32) -> bool) -> String {
    let bytes = input.as_bytes();
    let mut buf = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        let (x, len) = utf8::next_code_point(bytes, i);
        if keep(x) {
            buf.push_str(&input[i..i + len]);
        } else {
            push_encoded(&mut buf, x);
        }
        i += len;
    }
    buf
}

/// Appends every UTF-8 byte of a code point, percent-encoded.
pub(crate) fn push_encoded(buf: &mut String, x: u32) {
    for &b in utf8::encode(x).iter() {
        buf.push_str(encode_byte(b));
    }
}

/// Returns the percent-encoded octet of a byte, with uppercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// use uri_transform::pct_enc::encode_byte;
///
/// assert_eq!(encode_byte(b' '), "%20");
/// assert_eq!(encode_byte(0xab), "%AB");
/// ```
#[must_use]
pub fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

#[inline]
pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    HEXDIG.allows_ascii(hi) && HEXDIG.allows_ascii(lo)
}

/// Checks whether a valid percent-encoded octet starts at index `i`.
#[inline]
pub(crate) const fn is_pct_encoded_at(bytes: &[u8], i: usize) -> bool {
    i + 2 < bytes.len() && bytes[i] == b'%' && is_hexdig_pair(bytes[i + 1], bytes[i + 2])
}

/// A valid percent-encoded octet, as written in the source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Octet<'a> {
    src: &'a str,
}

impl<'a> Octet<'a> {
    /// Returns the decoded byte.
    pub(crate) fn value(self) -> u8 {
        let s = self.src.as_bytes();
        OCTET_TABLE_HI[s[1] as usize] | OCTET_TABLE_LO[s[2] as usize]
    }

    /// Returns the source text, `%` included.
    pub(crate) fn as_str(self) -> &'a str {
        self.src
    }
}

/// An item returned by the [`Chunks`] iterator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Chunk<'a> {
    /// A nonempty subslice without `%`.
    Unencoded(&'a str),
    /// A valid percent-encoded octet.
    PctEncoded(Octet<'a>),
    /// A `%` that does not start a valid octet, with its index.
    BarePercent(usize),
}

/// An iterator splitting a string into unencoded runs and octets.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct Chunks<'a> {
    source: &'a str,
    index: usize,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, index: 0 }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let source = self.source;
        let bytes = source.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        let index = self.index;
        let (chunk, len) = if bytes[0] != b'%' {
            let len = bytes.iter().position(|&x| x == b'%').unwrap_or(bytes.len());
            (Chunk::Unencoded(&source[..len]), len)
        } else if is_pct_encoded_at(bytes, 0) {
            (Chunk::PctEncoded(Octet { src: &source[..3] }), 3)
        } else {
            (Chunk::BarePercent(index), 1)
        };

        self.source = &source[len..];
        self.index += len;
        Some(chunk)
    }
}

impl FusedIterator for Chunks<'_> {}

/// Percent-encoded string slices.
///
/// An `EStr` slice is a string in which every `%` starts a valid
/// percent-encoded octet. Strict modes of the codecs validate their input by
/// converting it to an `EStr` slice.
///
/// # Examples
///
/// ```
/// use uri_transform::{pct_enc::EStr, ErrorKind};
///
/// let s = EStr::new("%C2%A1Hola%21")?;
/// assert_eq!(s.decode().to_string().unwrap(), "¡Hola!");
///
/// let e = EStr::new("100%").unwrap_err();
/// assert_eq!(e.kind(), ErrorKind::InvalidPercentSequence);
/// assert_eq!(e.index(), 3);
/// # Ok::<_, uri_transform::Error>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice.
    ///
    /// # Errors
    ///
    /// Returns `Err` pointing to the first `%` that does not start a valid
    /// percent-encoded octet.
    pub fn new(s: &str) -> Result<&Self, Error> {
        for chunk in Chunks::new(s) {
            if let Chunk::BarePercent(index) = chunk {
                err!(index, InvalidPercentSequence);
            }
        }
        Ok(Self::new_validated(s))
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Checks whether the `EStr` slice is unencoded, i.e., does not contain `'%'`.
    #[must_use]
    pub fn is_unencoded(&self) -> bool {
        !self.inner.contains('%')
    }

    /// Returns an iterator used to decode the `EStr` slice.
    ///
    /// Unlike [`decode`], the iterator yields raw bytes which may be
    /// assembled into UTF-8.
    pub fn decode(&self) -> Decode<'_> {
        Decode {
            source: &self.inner,
        }
    }
}

impl AsRef<str> for EStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<EStr> for str {
    fn eq(&self, other: &EStr) -> bool {
        self == &other.inner
    }
}

impl Eq for EStr {}

impl Default for &EStr {
    fn default() -> Self {
        EStr::EMPTY
    }
}

/// An iterator used to decode an [`EStr`] slice.
///
/// This struct is created by [`EStr::decode`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Decode<'a> {
    source: &'a str,
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A percent-encoded octet, decoded (for example, `"%20"` decoded as `0x20`).
    PctDecoded(u8),
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunks = Chunks::new(self.source);
        let chunk = match chunks.next()? {
            Chunk::Unencoded(s) => DecodedChunk::Unencoded(s),
            Chunk::PctEncoded(octet) => DecodedChunk::PctDecoded(octet.value()),
            // Unreachable for a validated slice.
            Chunk::BarePercent(_) => DecodedChunk::Unencoded("%"),
        };
        self.source = chunks.source;
        Some(chunk)
    }
}

impl FusedIterator for Decode<'_> {}

impl<'a> Decode<'a> {
    /// Decodes the slice to bytes.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    #[must_use]
    pub fn to_bytes(self) -> Cow<'a, [u8]> {
        if !self.source.contains('%') {
            return Cow::Borrowed(self.source.as_bytes());
        }

        let mut buf = Vec::with_capacity(self.source.len());
        for chunk in self {
            match chunk {
                DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
                DecodedChunk::PctDecoded(x) => buf.push(x),
            }
        }
        Cow::Owned(buf)
    }

    /// Attempts to decode the slice to a UTF-8 string.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    ///
    /// # Errors
    ///
    /// Returns `Err` containing the decoded bytes if they are not valid UTF-8.
    pub fn to_string(self) -> Result<Cow<'a, str>, Vec<u8>> {
        match self.to_bytes() {
            Cow::Borrowed(bytes) => match str::from_utf8(bytes) {
                Ok(s) => Ok(Cow::Borrowed(s)),
                Err(_) => Err(bytes.to_vec()),
            },
            Cow::Owned(bytes) => String::from_utf8(bytes)
                .map(Cow::Owned)
                .map_err(|e| e.into_bytes()),
        }
    }

    /// Decodes the slice to a string, replacing any invalid UTF-8 sequences with
    /// [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
    ///
    /// [U+FFFD]: char::REPLACEMENT_CHARACTER
    #[must_use]
    pub fn to_string_lossy(self) -> Cow<'a, str> {
        match self.to_bytes() {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn chunks() {
        let chunks: Vec<_> = Chunks::new("a%2fb%%zz%4").collect();
        assert_eq!(
            chunks,
            vec![
                Chunk::Unencoded("a"),
                Chunk::PctEncoded(Octet { src: "%2f" }),
                Chunk::Unencoded("b"),
                Chunk::BarePercent(5),
                Chunk::BarePercent(6),
                Chunk::Unencoded("zz"),
                Chunk::BarePercent(9),
                Chunk::Unencoded("4"),
            ]
        );
        assert_eq!(Octet { src: "%2f" }.value(), b'/');
    }

    #[test]
    fn octet_table() {
        for x in 0..=255u8 {
            let s = encode_byte(x);
            assert!(is_pct_encoded_at(s.as_bytes(), 0));
            assert_eq!(Octet { src: s }.value(), x);
        }
    }
}
