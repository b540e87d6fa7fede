//! Character tables from RFC 3986 and the form encoding.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

/// A table specifying a set of ASCII characters.
///
/// Membership testing is a single bit test. Non-ASCII characters are never
/// members of a table.
///
/// # Examples
///
/// ```
/// use uri_transform::table::{Table, UNRESERVED};
///
/// let table = UNRESERVED.or(Table::new(b"!"));
/// assert!(table.allows('!'));
/// assert!(table.allows('~'));
/// assert!(!table.allows(' '));
/// assert!(!table.allows('é'));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Table(u64, u64);

impl Table {
    /// A table that allows nothing.
    pub const EMPTY: Self = Self(0, 0);

    /// Creates a table that only allows the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "cannot allow non-ASCII byte");
            table |= 1u128 << *cur;
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Creates a table that allows the ASCII characters of a string.
    ///
    /// Non-ASCII characters are ignored.
    #[must_use]
    pub fn from_ascii(s: &str) -> Self {
        s.bytes()
            .filter(u8::is_ascii)
            .fold(Self::EMPTY, |table, x| table.or(Self::new(&[x])))
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the characters allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the characters allowed
    /// by `self` but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the table is a subset of another, i.e., `other`
    /// allows at least all the characters allowed by `self`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    /// Checks whether the given byte is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_ascii(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether the given character is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, ch: char) -> bool {
        self.allows_code_point(ch as u32)
    }

    #[inline]
    pub(crate) const fn allows_code_point(self, x: u32) -> bool {
        x < 128 && self.allows_ascii(x as u8)
    }

    /// Returns the number of characters allowed by the table.
    #[must_use]
    pub const fn len(self) -> usize {
        (self.0.count_ones() + self.1.count_ones()) as usize
    }

    /// Checks whether the table allows nothing.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0 && self.1 == 0
    }

    /// Returns an iterator over the characters allowed by the table,
    /// in ascending order.
    pub fn chars(self) -> impl Iterator<Item = char> {
        (0..128u8).filter(move |&x| self.allows_ascii(x)).map(char::from)
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`, case-insensitive.
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `ALPHA / DIGIT`
pub const ALNUM: Table = ALPHA.or(DIGIT);

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALNUM.or(new(b"+-."));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALNUM.or(new(b"-._~"));

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// Characters allowed in a path segment besides unreserved ones:
/// `sub-delims / ":" / "@"`.
pub const PATH_SEGMENT_EXTRA: Table = SUB_DELIMS.or(new(b":@"));

/// Characters allowed in a path besides unreserved ones:
/// `sub-delims / ":" / "@" / "/"`.
pub const PATH_EXTRA: Table = PATH_SEGMENT_EXTRA.or(new(b"/"));

/// Characters allowed in a query besides unreserved ones:
/// `sub-delims / ":" / "@" / "/" / "?"`.
pub const QUERY_EXTRA: Table = PATH_SEGMENT_EXTRA.or(new(b"/?"));

/// Characters allowed in a fragment besides unreserved ones; same as [`QUERY_EXTRA`].
pub const FRAGMENT_EXTRA: Table = QUERY_EXTRA;

/// Characters left unencoded by `application/x-www-form-urlencoded`:
/// `ALPHA / DIGIT / "*" / "-" / "." / "_"`.
pub const FORM_SAFE: Table = ALNUM.or(new(b"*-._"));

/// The URI component in which a string is to be encoded.
///
/// The context selects the characters that are left unencoded in addition
/// to [`UNRESERVED`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Context {
    /// A whole path, `/` included.
    Path,
    /// A single path segment, `/` excluded.
    PathSegment,
    /// A query component.
    Query,
    /// A fragment component.
    Fragment,
    /// No particular component: only unreserved characters are safe.
    #[default]
    Full,
}

impl Context {
    /// Returns the characters allowed in this context besides unreserved ones.
    #[must_use]
    pub const fn extra(self) -> Table {
        match self {
            Self::Path => PATH_EXTRA,
            Self::PathSegment => PATH_SEGMENT_EXTRA,
            Self::Query => QUERY_EXTRA,
            Self::Fragment => FRAGMENT_EXTRA,
            Self::Full => Table::EMPTY,
        }
    }

    /// Returns all the characters left unencoded in this context.
    #[must_use]
    pub const fn safe_set(self) -> Table {
        UNRESERVED.or(self.extra())
    }

    /// Returns the name of the context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::PathSegment => "pathSegment",
            Self::Query => "query",
            Self::Fragment => "fragment",
            Self::Full => "full",
        }
    }
}
