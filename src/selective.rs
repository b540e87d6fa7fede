//! Encoders driven by an explicit set of characters.
//!
//! Unlike [`pct_enc::encode`](crate::pct_enc::encode), these encoders treat
//! `%` like any other character.

use crate::{
    pct_enc,
    table::{Table, ALNUM, RESERVED},
};
use alloc::{collections::BTreeSet, string::String};

/// Options for [`selective_encode`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct SelectiveOptions<'a> {
    chars_to_encode: &'a str,
    keep_reserved: bool,
}

impl<'a> SelectiveOptions<'a> {
    /// Creates a new `SelectiveOptions` with default configuration.
    pub const fn new() -> Self {
        Self {
            chars_to_encode: "",
            keep_reserved: false,
        }
    }

    /// Sets the characters to encode, ASCII or not.
    ///
    /// This defaults to the empty string.
    pub fn chars_to_encode(mut self, value: &'a str) -> Self {
        self.chars_to_encode = value;
        self
    }

    /// Sets whether to leave reserved characters unencoded even if they are
    /// to be encoded.
    ///
    /// This defaults to `false`.
    pub fn keep_reserved(mut self, value: bool) -> Self {
        self.keep_reserved = value;
        self
    }
}

/// Options for [`encode_non_alnum`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct NonAlnumOptions {
    keep_reserved: bool,
}

impl NonAlnumOptions {
    /// Creates a new `NonAlnumOptions` with default configuration.
    pub const fn new() -> Self {
        Self {
            keep_reserved: false,
        }
    }

    /// Sets whether to leave reserved characters unencoded.
    ///
    /// This defaults to `false`.
    pub fn keep_reserved(mut self, value: bool) -> Self {
        self.keep_reserved = value;
        self
    }
}

/// Options for [`encode_except_safe_set`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct SafeSetOptions {
    safe_set: Table,
}

impl SafeSetOptions {
    /// Creates a new `SafeSetOptions` with the given safe set.
    pub const fn new(safe_set: Table) -> Self {
        Self { safe_set }
    }

    /// Sets the characters to leave unencoded.
    pub fn safe_set(mut self, value: Table) -> Self {
        self.safe_set = value;
        self
    }
}

/// A set of arbitrary characters.
struct CharSet {
    ascii: Table,
    non_ascii: BTreeSet<u32>,
}

impl CharSet {
    fn new(s: &str) -> Self {
        Self {
            ascii: Table::from_ascii(s),
            non_ascii: s.chars().filter(|ch| !ch.is_ascii()).map(u32::from).collect(),
        }
    }

    fn contains(&self, x: u32) -> bool {
        if x < 128 {
            self.ascii.allows_code_point(x)
        } else {
            self.non_ascii.contains(&x)
        }
    }
}

/// Percent-encodes only the given characters.
///
/// Every character in the set is encoded unless reserved characters are kept
/// and it is reserved; all other characters are left as is.
///
/// # Examples
///
/// ```
/// use uri_transform::selective::{selective_encode, SelectiveOptions};
///
/// let opts = SelectiveOptions::new().chars_to_encode(" é&");
/// assert_eq!(selective_encode("a b&é/", &opts), "a%20b%26%C3%A9/");
///
/// let opts = opts.keep_reserved(true);
/// assert_eq!(selective_encode("a b&é/", &opts), "a%20b&%C3%A9/");
/// ```
#[must_use]
pub fn selective_encode(input: &str, opts: &SelectiveOptions<'_>) -> String {
    let set = CharSet::new(opts.chars_to_encode);
    pct_enc::encode_unless(input, |x| {
        !set.contains(x) || (opts.keep_reserved && RESERVED.allows_code_point(x))
    })
}

/// Percent-encodes every character except ASCII letters and digits.
///
/// Reserved characters are left unencoded if they are kept.
///
/// # Examples
///
/// ```
/// use uri_transform::selective::{encode_non_alnum, NonAlnumOptions};
///
/// assert_eq!(encode_non_alnum("a-b/ü", &NonAlnumOptions::new()), "a%2Db%2F%C3%BC");
///
/// let opts = NonAlnumOptions::new().keep_reserved(true);
/// assert_eq!(encode_non_alnum("a-b/ü", &opts), "a%2Db/%C3%BC");
/// ```
#[must_use]
pub fn encode_non_alnum(input: &str, opts: &NonAlnumOptions) -> String {
    let keep = if opts.keep_reserved {
        ALNUM.or(RESERVED)
    } else {
        ALNUM
    };
    pct_enc::encode_unless(input, |x| keep.allows_code_point(x))
}

/// Percent-encodes every character except ASCII ones in the safe set.
///
/// An empty safe set encodes every character.
///
/// # Examples
///
/// ```
/// use uri_transform::{
///     selective::{encode_except_safe_set, SafeSetOptions},
///     table::UNRESERVED,
///     Table,
/// };
///
/// let opts = SafeSetOptions::new(UNRESERVED);
/// assert_eq!(encode_except_safe_set("a~b%", &opts), "a~b%25");
///
/// let opts = SafeSetOptions::new(Table::EMPTY);
/// assert_eq!(encode_except_safe_set("ab", &opts), "%61%62");
/// ```
#[must_use]
pub fn encode_except_safe_set(input: &str, opts: &SafeSetOptions) -> String {
    pct_enc::encode_unless(input, |x| opts.safe_set.allows_code_point(x))
}
