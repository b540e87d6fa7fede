//! Conversion between Unicode domains and punycode.
//!
//! The input is either a bare domain or a URL starting with `scheme://`.
//! In the latter case only the host is converted and spliced back into the
//! URL, leaving the rest of it untouched.
//!
//! The default converter, [`Punycode`], encodes each non-ASCII label on its
//! own and leaves everything else as is, so that [`punycode_to_domain`] undoes
//! [`domain_to_punycode`] exactly. [`Uts46`] applies the full IDNA mapping
//! instead and can be passed to the `_with` functions.

use crate::{
    error::err,
    table::{ALPHA, SCHEME},
    Error,
};
use alloc::{borrow::Cow, string::String};
use core::ops::Range;
use idna::{
    punycode,
    uts46::{self, AsciiDenyList, DnsLength, Hyphens},
};

/// A converter between Unicode domains and their ASCII forms.
///
/// Implementations return `None` when a domain is rejected.
pub trait Idna {
    /// Converts a domain to its ASCII form, e.g., `"münchen.de"` to
    /// `"xn--mnchen-3ya.de"`.
    fn to_ascii(&self, domain: &str) -> Option<String>;

    /// Converts a domain to its Unicode form, e.g., `"xn--mnchen-3ya.de"` to
    /// `"münchen.de"`.
    fn to_unicode(&self, domain: &str) -> Option<String>;
}

const ACE_PREFIX: &str = "xn--";

/// A converter that punycode-encodes labels without mapping them.
///
/// Labels are separated by `.` or its ideographic and fullwidth forms, all of
/// which are written back as `.`. A label is encoded with an `xn--` prefix
/// only if it has a non-ASCII character, and decoded only if it starts with
/// `xn--`. Case is preserved. Anything up to an `@` is left untouched, so that
/// an email address keeps its local part.
///
/// # Examples
///
/// ```
/// use uri_transform::domain::{Idna, Punycode};
///
/// assert_eq!(Punycode.to_ascii("Bücher.Example").unwrap(), "xn--Bcher-kva.Example");
/// assert_eq!(Punycode.to_unicode("xn--Bcher-kva.Example").unwrap(), "Bücher.Example");
/// let email = Punycode.to_ascii("user@例え。テスト").unwrap();
/// assert_eq!(email, "user@xn--r8jz45g.xn--zckzah");
/// assert!(Punycode.to_unicode("xn--a!b").is_none());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Punycode;

fn is_label_separator(ch: char) -> bool {
    matches!(ch, '.' | '\u{3002}' | '\u{ff0e}' | '\u{ff61}')
}

/// Maps every label of a domain with `f`, keeping the local part of an
/// email address.
fn map_labels(
    domain: &str,
    mut f: impl FnMut(&str, &mut String) -> Option<()>,
) -> Option<String> {
    let mut buf = String::with_capacity(domain.len());
    let domain = match domain.split_once('@') {
        Some((local, domain)) => {
            buf.push_str(local);
            buf.push('@');
            domain
        }
        None => domain,
    };

    for (i, label) in domain.split(is_label_separator).enumerate() {
        if i != 0 {
            buf.push('.');
        }
        f(label, &mut buf)?;
    }
    Some(buf)
}

impl Idna for Punycode {
    fn to_ascii(&self, domain: &str) -> Option<String> {
        map_labels(domain, |label, buf| {
            if label.is_ascii() {
                buf.push_str(label);
            } else {
                buf.push_str(ACE_PREFIX);
                buf.push_str(&punycode::encode_str(label)?);
            }
            Some(())
        })
    }

    fn to_unicode(&self, domain: &str) -> Option<String> {
        map_labels(domain, |label, buf| {
            match label.strip_prefix(ACE_PREFIX) {
                Some(encoded) => buf.push_str(&punycode::decode_to_string(encoded)?),
                None => buf.push_str(label),
            }
            Some(())
        })
    }
}

/// A converter backed by [UTS #46] processing of the `idna` crate.
///
/// Characters forbidden in URL hosts are rejected and hyphens are allowed
/// anywhere in a label. Labels are mapped as well as converted, so
/// `"Example.COM"` becomes `"example.com"`.
///
/// [UTS #46]: https://www.unicode.org/reports/tr46/
#[derive(Clone, Copy, Debug, Default)]
pub struct Uts46;

impl Idna for Uts46 {
    fn to_ascii(&self, domain: &str) -> Option<String> {
        uts46::Uts46::new()
            .to_ascii(
                domain.as_bytes(),
                AsciiDenyList::URL,
                Hyphens::Allow,
                DnsLength::Ignore,
            )
            .ok()
            .map(Cow::into_owned)
    }

    fn to_unicode(&self, domain: &str) -> Option<String> {
        let (s, result) =
            uts46::Uts46::new().to_unicode(domain.as_bytes(), AsciiDenyList::URL, Hyphens::Allow);
        result.ok().map(|()| s.into_owned())
    }
}

/// Returns the length of `scheme "://"` at the start of the input.
fn scheme_prefix_len(bytes: &[u8]) -> Option<usize> {
    let (&first, rest) = bytes.split_first()?;
    if !ALPHA.allows_ascii(first) {
        return None;
    }
    let len = 1 + rest.iter().take_while(|&&x| SCHEME.allows_ascii(x)).count();
    bytes[len..].starts_with(b"://").then_some(len + 3)
}

/// Locates the host of a URL.
///
/// Returns `None` if the input does not start with `scheme "://"`, in which
/// case it is taken as a bare domain by the converters of this module.
///
/// The host starts after the first `@` if it comes before any `/`, and ends
/// at the first `/`, `?` or `#`, or at a `:` followed by a digit. The
/// returned range may be empty.
///
/// # Examples
///
/// ```
/// use uri_transform::domain::host_span;
///
/// let s = "https://user:pass@münchen.de:8080/path";
/// assert_eq!(&s[host_span(s).unwrap()], "münchen.de");
///
/// assert_eq!(host_span("http://example.com?q"), Some(7..18));
/// assert_eq!(host_span("münchen.de"), None);
/// ```
#[must_use]
pub fn host_span(input: &str) -> Option<Range<usize>> {
    let bytes = input.as_bytes();
    let mut start = scheme_prefix_len(bytes)?;

    let rest = &input[start..];
    if let Some(at) = rest.find('@') {
        if rest.find('/').map_or(true, |slash| at < slash) {
            start += at + 1;
        }
    }

    let end = (start..bytes.len())
        .find(|&i| match bytes[i] {
            b'/' | b'?' | b'#' => true,
            b':' => i > start && bytes.get(i + 1).is_some_and(u8::is_ascii_digit),
            _ => false,
        })
        .unwrap_or(bytes.len());
    Some(start..end)
}

fn convert_host(
    input: &str,
    mut f: impl FnMut(&str) -> Option<String>,
) -> Result<String, Error> {
    let span = host_span(input).unwrap_or(0..input.len());
    let host = &input[span.clone()];
    if host.is_empty() {
        return Ok(String::from(input));
    }

    let Some(converted) = f(host) else {
        err!(span.start, DomainConversion);
    };

    let mut buf = String::with_capacity(input.len() + converted.len());
    buf.push_str(&input[..span.start]);
    buf.push_str(&converted);
    buf.push_str(&input[span.end..]);
    Ok(buf)
}

/// Converts a Unicode domain, or the host of a URL, to punycode with the
/// [`Punycode`] converter.
///
/// # Errors
///
/// Returns `Err` if the converter rejects the domain, with the index at
/// which the domain starts.
///
/// # Examples
///
/// ```
/// use uri_transform::domain::domain_to_punycode;
///
/// assert_eq!(domain_to_punycode("münchen.de")?, "xn--mnchen-3ya.de");
/// assert_eq!(
///     domain_to_punycode("https://münchen.de/straße?q=ü")?,
///     "https://xn--mnchen-3ya.de/straße?q=ü"
/// );
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn domain_to_punycode(input: &str) -> Result<String, Error> {
    domain_to_punycode_with(input, &Punycode)
}

/// Converts a Unicode domain, or the host of a URL, to punycode with the
/// given converter.
///
/// # Errors
///
/// Returns `Err` if the converter rejects the domain.
pub fn domain_to_punycode_with<I: Idna + ?Sized>(input: &str, idna: &I) -> Result<String, Error> {
    convert_host(input, |host| idna.to_ascii(host))
}

/// Converts a punycode domain, or the host of a URL, to Unicode with the
/// [`Punycode`] converter.
///
/// # Errors
///
/// Returns `Err` if the converter rejects the domain, with the index at
/// which the domain starts.
///
/// # Examples
///
/// ```
/// use uri_transform::domain::punycode_to_domain;
///
/// assert_eq!(punycode_to_domain("xn--mnchen-3ya.de")?, "münchen.de");
/// assert_eq!(punycode_to_domain("http://xn--mnchen-3ya.de:80/")?, "http://münchen.de:80/");
/// assert_eq!(punycode_to_domain("example.com")?, "example.com");
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn punycode_to_domain(input: &str) -> Result<String, Error> {
    punycode_to_domain_with(input, &Punycode)
}

/// Converts a punycode domain, or the host of a URL, to Unicode with the
/// given converter.
///
/// # Errors
///
/// Returns `Err` if the converter rejects the domain.
pub fn punycode_to_domain_with<I: Idna + ?Sized>(input: &str, idna: &I) -> Result<String, Error> {
    convert_host(input, |host| idna.to_unicode(host))
}
