//! Parsing and building of query strings.
//!
//! A query string is a list of `key=value` pairs separated by `&`. Keys may
//! repeat and the order of pairs is preserved.
//!
//! # Examples
//!
//! ```
//! use uri_transform::query::{self, BuildOptions, Pair, ParseOptions, QueryMode};
//!
//! let pairs = query::parse("?b=2&a=1&a", &ParseOptions::new());
//! assert_eq!(pairs, [Pair::new("b", "2"), Pair::new("a", "1"), Pair::new("a", "")]);
//!
//! let opts = BuildOptions::new().sort(true).mode(QueryMode::Form);
//! assert_eq!(query::build(&pairs, &opts)?, "a=1&a=&b=2");
//! # Ok::<_, uri_transform::Error>(())
//! ```

use crate::{
    form::{self, FormOptions},
    pct_enc::{self, Rfc3986Options},
    table::{Context, Table},
    Error,
};
use alloc::{string::String, vec::Vec};

/// The codec used for the keys and values of a query string.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum QueryMode {
    /// Percent-encoding.
    #[default]
    Percent,
    /// The `application/x-www-form-urlencoded` encoding, with `+` as space.
    Form,
}

/// A key/value pair in a query string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pair {
    /// The key.
    pub key: String,
    /// The value, empty if absent.
    pub value: String,
}

impl Pair {
    /// Creates a new pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Options for [`parse`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct ParseOptions {
    mode: QueryMode,
}

impl ParseOptions {
    /// Creates a new `ParseOptions` with default configuration.
    pub const fn new() -> Self {
        Self {
            mode: QueryMode::Percent,
        }
    }

    /// Sets the codec with which keys and values are decoded.
    ///
    /// This defaults to [`QueryMode::Percent`].
    pub fn mode(mut self, value: QueryMode) -> Self {
        self.mode = value;
        self
    }
}

/// Parses a query string into key/value pairs.
///
/// A single leading `?` is stripped and empty segments between `&` are
/// skipped. A segment without `=` gives an empty value; otherwise the value
/// is everything after the first `=`. Keys and values are decoded once,
/// leniently.
///
/// # Examples
///
/// ```
/// use uri_transform::query::{self, Pair, ParseOptions, QueryMode};
///
/// let pairs = query::parse("a=1&&b=x=y&c=", &ParseOptions::new());
/// assert_eq!(pairs, [Pair::new("a", "1"), Pair::new("b", "x=y"), Pair::new("c", "")]);
///
/// let opts = ParseOptions::new().mode(QueryMode::Form);
/// assert_eq!(query::parse("q=hello+w%C3%B6rld", &opts), [Pair::new("q", "hello wörld")]);
///
/// assert!(query::parse("?", &ParseOptions::new()).is_empty());
/// ```
#[must_use]
pub fn parse(input: &str, opts: &ParseOptions) -> Vec<Pair> {
    let input = input.strip_prefix('?').unwrap_or(input);
    let decode: fn(&str) -> String = match opts.mode {
        QueryMode::Percent => pct_enc::decode_lenient,
        QueryMode::Form => form::decode_lenient,
    };

    input
        .split('&')
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let (key, value) = seg.split_once('=').unwrap_or((seg, ""));
            Pair {
                key: decode(key),
                value: decode(value),
            }
        })
        .collect()
}

/// How keys and values are encoded by [`build`].
///
/// The options given to a variant are used as they are: in particular,
/// [`Rfc3986Options::new`] encodes in [`Context::Full`]. Use
/// [`percent_query`](Self::percent_query) to start from the default options.
///
/// Whatever the options, [`build`] encodes `%`, `&`, `=` and `?` in keys
/// and values, and `+` as well with form encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Policy {
    /// Percent-encoding with the given options.
    Percent(Rfc3986Options),
    /// Form encoding with the given options.
    Form(FormOptions),
}

impl Default for Policy {
    /// Percent-encoding in [`Context::Query`].
    fn default() -> Self {
        Self::Percent(Rfc3986Options::new().context(Context::Query))
    }
}

const PERCENT_DELIMS: Table = Table::new(b"%&=?");
const FORM_DELIMS: Table = PERCENT_DELIMS.or(Table::new(b"+"));

impl Policy {
    /// Creates a percent-encoding policy from the default options in
    /// [`Context::Query`], further configured by `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_transform::{query::{self, BuildOptions, Pair, Policy}, Table};
    ///
    /// let policy = Policy::percent_query(|opts| opts.safe_set(Table::new(b"|")));
    /// let opts = BuildOptions::new().policy(policy);
    /// assert_eq!(query::build(&[Pair::new("a/b|c", "")], &opts)?, "a/b|c=");
    /// # Ok::<_, uri_transform::Error>(())
    /// ```
    pub fn percent_query(f: impl FnOnce(Rfc3986Options) -> Rfc3986Options) -> Self {
        Self::Percent(f(Rfc3986Options::new().context(Context::Query)))
    }

    fn encode(&self, s: &str) -> Result<String, Error> {
        match self {
            Self::Percent(opts) => pct_enc::encode_component(s, opts, PERCENT_DELIMS),
            Self::Form(opts) => Ok(form::encode_component(s, opts, FORM_DELIMS)),
        }
    }
}

/// Options for [`build`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct BuildOptions {
    sort: bool,
    policy: Policy,
}

impl BuildOptions {
    /// Creates a new `BuildOptions` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to sort the pairs by key.
    ///
    /// The sort is stable and compares keys byte by byte.
    /// This defaults to `false`.
    pub fn sort(mut self, value: bool) -> Self {
        self.sort = value;
        self
    }

    /// Sets the encoding policy, replacing any options set before.
    ///
    /// This defaults to [`Policy::default`].
    pub fn policy(mut self, value: Policy) -> Self {
        self.policy = value;
        self
    }

    /// Sets the encoding policy to the default options of a codec.
    pub fn mode(self, value: QueryMode) -> Self {
        self.policy(match value {
            QueryMode::Percent => Policy::default(),
            QueryMode::Form => Policy::Form(FormOptions::new()),
        })
    }
}

/// Builds a query string from key/value pairs.
///
/// Every pair is written as `key=value`, even when the value is empty, and
/// pairs are joined with `&`. No leading `?` is written.
///
/// Keys and values are encoded so that [`parse`] with the matching
/// [`QueryMode`] gives them back: `%` is always encoded, as are the
/// delimiters listed on [`Policy`]. With percent-encoding this holds for
/// ASCII keys and values, since [`parse`] decodes octets one byte per
/// character.
///
/// # Errors
///
/// Returns `Err` on an invalid percent-encoded octet in a key or value if
/// the policy is strict.
///
/// # Examples
///
/// ```
/// use uri_transform::query::{self, BuildOptions, Pair, ParseOptions, Policy};
/// use uri_transform::pct_enc::Rfc3986Options;
///
/// let pairs = [Pair::new("a b", "c/d?e#f&g=%41")];
/// let built = query::build(&pairs, &BuildOptions::new())?;
/// assert_eq!(built, "a%20b=c/d%3Fe%23f%26g%3D%2541");
/// assert_eq!(query::parse(&built, &ParseOptions::new()), pairs);
///
/// let opts = BuildOptions::new().policy(Policy::Percent(Rfc3986Options::new()));
/// assert_eq!(query::build(&pairs, &opts)?, "a%20b=c%2Fd%3Fe%23f%26g%3D%2541");
///
/// let opts = BuildOptions::new().policy(Policy::percent_query(|opts| opts.strict(true)));
/// assert!(query::build(&[Pair::new("%", "")], &opts).is_err());
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn build(pairs: &[Pair], opts: &BuildOptions) -> Result<String, Error> {
    let mut pairs: Vec<&Pair> = pairs.iter().collect();
    if opts.sort {
        pairs.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));
    }

    let mut buf = String::new();
    for (i, pair) in pairs.into_iter().enumerate() {
        if i != 0 {
            buf.push('&');
        }
        buf.push_str(&opts.policy.encode(&pair.key)?);
        buf.push('=');
        buf.push_str(&opts.policy.encode(&pair.value)?);
    }
    Ok(buf)
}
