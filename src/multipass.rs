//! Multi-pass drivers for single-pass string transforms.
//!
//! The drivers work with any transform, for example the encoders and decoders
//! of this crate wrapped in closures:
//!
//! ```
//! use uri_transform::{multipass, pct_enc::{self, Rfc3986Options}};
//!
//! let opts = Rfc3986Options::new().reencode_percent(true);
//! let s = multipass::try_apply_n_times("a b", 3, |s| pct_enc::encode(s, &opts))?;
//! assert_eq!(s, "a%252520b");
//! # Ok::<_, uri_transform::Error>(())
//! ```

use crate::pct_enc::{Chunk, Chunks};
use alloc::string::String;
use core::convert::Infallible;

/// How many times a transform is applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Passes {
    /// Exactly the given number of passes.
    Times(usize),
    /// Passes until the output equals the input of the pass, capped at
    /// `max_iterations` passes.
    UntilStable {
        /// The maximum number of passes.
        max_iterations: usize,
    },
}

impl Passes {
    /// Applies a transform according to `self`.
    pub fn apply(self, input: &str, mut f: impl FnMut(&str) -> String) -> String {
        match self.try_apply(input, |s| Ok::<_, Infallible>(f(s))) {
            Ok(s) => s,
            Err(e) => match e {},
        }
    }

    /// Applies a fallible transform according to `self`, stopping at the
    /// first error.
    ///
    /// # Errors
    ///
    /// Returns the first error returned by `f`.
    pub fn try_apply<E>(
        self,
        input: &str,
        f: impl FnMut(&str) -> Result<String, E>,
    ) -> Result<String, E> {
        match self {
            Self::Times(n) => try_apply_n_times(input, n, f),
            Self::UntilStable { max_iterations } => {
                try_apply_until_stable(input, f, max_iterations)
            }
        }
    }
}

/// Applies a transform `n` times.
///
/// Zero passes return a copy of the input.
///
/// # Examples
///
/// ```
/// use uri_transform::multipass;
///
/// assert_eq!(multipass::apply_n_times("a", 3, |s| format!("<{s}>")), "<<<a>>>");
/// ```
pub fn apply_n_times(input: &str, n: usize, mut f: impl FnMut(&str) -> String) -> String {
    Passes::Times(n).apply(input, &mut f)
}

/// Applies a fallible transform `n` times, stopping at the first error.
///
/// # Errors
///
/// Returns the first error returned by `f`.
pub fn try_apply_n_times<E>(
    input: &str,
    n: usize,
    mut f: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    let mut result = String::from(input);
    for _ in 0..n {
        result = f(&result)?;
    }
    Ok(result)
}

/// Applies a transform until its output equals its input, running at most
/// `max_iterations` passes.
///
/// If the cap is hit without reaching a fixed point, the output of the last
/// pass is returned. The returned value is always the output of some pass,
/// unless `max_iterations` is zero, in which case the input is returned.
///
/// # Examples
///
/// ```
/// use uri_transform::multipass;
///
/// let halve = |s: &str| s[..s.len() / 2].to_owned();
/// assert_eq!(multipass::apply_until_stable("abcdefgh", halve, 10), "");
/// assert_eq!(multipass::apply_until_stable("abcdefgh", halve, 2), "ab");
///
/// // Never stabilizes.
/// let flip = |s: &str| if s == "x" { "y".to_owned() } else { "x".to_owned() };
/// assert_eq!(multipass::apply_until_stable("x", flip, 3), "y");
/// ```
pub fn apply_until_stable(
    input: &str,
    mut f: impl FnMut(&str) -> String,
    max_iterations: usize,
) -> String {
    Passes::UntilStable { max_iterations }.apply(input, &mut f)
}

/// Applies a fallible transform until its output equals its input, running
/// at most `max_iterations` passes and stopping at the first error.
///
/// # Errors
///
/// Returns the first error returned by `f`.
pub fn try_apply_until_stable<E>(
    input: &str,
    mut f: impl FnMut(&str) -> Result<String, E>,
    max_iterations: usize,
) -> Result<String, E> {
    let mut result = String::from(input);
    for _ in 0..max_iterations {
        let next = f(&result)?;
        if next == result {
            break;
        }
        result = next;
    }
    Ok(result)
}

/// Alternates the case of the hexadecimal digits of percent-encoded octets.
///
/// The octet with an even index (counting from zero) gets a lowercase first
/// digit and an uppercase second digit, and the reverse for an odd index.
/// Everything else, including a `%` that does not start a valid octet, is
/// left untouched. The decoded value never changes.
///
/// # Examples
///
/// ```
/// use uri_transform::multipass::mixed_case_percent;
///
/// assert_eq!(mixed_case_percent("%AB%CD%ef"), "%aB%Cd%eF");
/// assert_eq!(mixed_case_percent("a%2F%%3a"), "a%2F%%3a");
/// ```
#[must_use]
pub fn mixed_case_percent(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut k = 0;

    for chunk in Chunks::new(input) {
        match chunk {
            Chunk::Unencoded(s) => buf.push_str(s),
            Chunk::PctEncoded(octet) => {
                let s = octet.as_str().as_bytes();
                let (hi, lo) = (char::from(s[1]), char::from(s[2]));
                let (hi, lo) = if k % 2 == 0 {
                    (hi.to_ascii_lowercase(), lo.to_ascii_uppercase())
                } else {
                    (hi.to_ascii_uppercase(), lo.to_ascii_lowercase())
                };
                buf.push('%');
                buf.push(hi);
                buf.push(lo);
                k += 1;
            }
            Chunk::BarePercent(_) => buf.push('%'),
        }
    }
    buf
}
