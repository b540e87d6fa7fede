//! Conversion between IRIs and URIs.
//!
//! The conversion is a best-effort split between ASCII and non-ASCII
//! characters as described in
//! [Section 3 of RFC 3987](https://datatracker.ietf.org/doc/html/rfc3987/#section-3).
//! No validation of the IRI or URI syntax is performed.

use crate::pct_enc::{self, Chunk, Chunks, Octet};
use alloc::{string::String, vec::Vec};
use core::str;

/// Converts an IRI to a URI by percent-encoding every non-ASCII character.
///
/// # Examples
///
/// ```
/// use uri_transform::iri::iri_to_uri;
///
/// assert_eq!(iri_to_uri("https://example.com/ğ"), "https://example.com/%C4%9F");
/// assert_eq!(iri_to_uri("café?q=1"), "caf%C3%A9?q=1");
/// ```
#[must_use]
pub fn iri_to_uri(input: &str) -> String {
    pct_enc::encode_unless(input, |x| x < 128)
}

/// Converts a URI to an IRI by decoding percent-encoded UTF-8 sequences of
/// non-ASCII characters.
///
/// A maximal run of consecutive octets is decoded as a whole if it is valid
/// UTF-8 containing any non-ASCII character, ASCII octets in the run
/// included. Otherwise its first octet is kept verbatim and the rest of the
/// run is tried again. Octets of ASCII characters alone, such as `%2F`, and
/// invalid UTF-8 are never decoded.
///
/// For any string `s` without `%`, `uri_to_iri(&iri_to_uri(s)) == s`.
///
/// # Examples
///
/// ```
/// use uri_transform::iri::uri_to_iri;
///
/// assert_eq!(uri_to_iri("https://example.com/%C4%9F"), "https://example.com/ğ");
/// assert_eq!(uri_to_iri("%2F%20"), "%2F%20");
/// assert_eq!(uri_to_iri("%FF%C3%A9"), "%FFé");
/// ```
#[must_use]
pub fn uri_to_iri(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut run = Vec::new();

    for chunk in Chunks::new(input) {
        match chunk {
            Chunk::PctEncoded(octet) => run.push(octet),
            Chunk::Unencoded(s) => {
                flush_run(&mut buf, &mut run);
                buf.push_str(s);
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

fn flush_run(buf: &mut String, run: &mut Vec<Octet<'_>>) {
    let bytes: Vec<u8> = run.iter().map(|octet| octet.value()).collect();

    let mut start = 0;
    while start < run.len() {
        let kept = match str::from_utf8(&bytes[start..]) {
            Ok(s) if !s.is_ascii() => {
                buf.push_str(s);
                break;
            }
            // No shorter suffix has a non-ASCII character.
            Ok(_) => run.len() - start,
            // Every suffix starting at or before the invalid sequence runs into it.
            Err(e) => e.valid_up_to() + 1,
        };
        for octet in &run[start..start + kept] {
            buf.push_str(octet.as_str());
        }
        start += kept;
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_run_is_replaced_whole() {
        assert_eq!(uri_to_iri("%41%C3%A9"), "Aé");
        assert_eq!(uri_to_iri("%2F%C3%A9/x"), "/é/x");
    }

    #[test]
    fn ascii_only_run_is_kept() {
        assert_eq!(uri_to_iri("%41%42"), "%41%42");
        assert_eq!(uri_to_iri("%c3%a9"), "é");
        assert_eq!(uri_to_iri("%C3"), "%C3");
        assert_eq!(uri_to_iri("%C3%"), "%C3%");
    }

    #[test]
    fn invalid_sequence_skipped_once() {
        assert_eq!(uri_to_iri("%41%42%FF%C3%A9"), "%41%42%FFé");
        assert_eq!(uri_to_iri("%E6%B5%8B%E8%AF"), "%E6%B5%8B%E8%AF");
        assert_eq!(uri_to_iri("%E6%B5%8B%FF%C3%A9"), "%E6%B5%8B%FFé");
    }
}
