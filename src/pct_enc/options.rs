use crate::{
    multipass::Passes,
    table::{Context, Table},
};

/// Options for [`encode`](super::encode).
///
/// # Examples
///
/// ```
/// use uri_transform::{pct_enc::{self, Rfc3986Options}, Context, Table};
///
/// let opts = Rfc3986Options::new().context(Context::PathSegment);
/// assert_eq!(pct_enc::encode("a/b:c@d", &opts)?, "a%2Fb:c@d");
///
/// let opts = Rfc3986Options::new().safe_set(Table::new(b"!"));
/// assert_eq!(pct_enc::encode("a b!c", &opts)?, "a%20b!c");
/// # Ok::<_, uri_transform::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[must_use]
pub struct Rfc3986Options {
    pub(super) context: Context,
    pub(super) keep_reserved: bool,
    pub(super) safe_set: Table,
    pub(super) reencode_percent: bool,
    pub(super) strict: bool,
}

impl Rfc3986Options {
    /// Creates a new `Rfc3986Options` with default configuration.
    pub const fn new() -> Self {
        Self {
            context: Context::Full,
            keep_reserved: false,
            safe_set: Table::EMPTY,
            reencode_percent: false,
            strict: false,
        }
    }

    /// Sets the URI component whose extra characters are left unencoded.
    ///
    /// This defaults to [`Context::Full`].
    pub fn context(mut self, value: Context) -> Self {
        self.context = value;
        self
    }

    /// Sets whether to leave reserved characters unencoded.
    ///
    /// This defaults to `false`.
    pub fn keep_reserved(mut self, value: bool) -> Self {
        self.keep_reserved = value;
        self
    }

    /// Sets extra characters to leave unencoded.
    ///
    /// This defaults to [`Table::EMPTY`].
    pub fn safe_set(mut self, value: Table) -> Self {
        self.safe_set = value;
        self
    }

    /// Sets whether to encode `%` even when it starts a percent-encoded octet.
    ///
    /// This defaults to `false`, in which case existing octets are copied
    /// as is and encoding is idempotent.
    pub fn reencode_percent(mut self, value: bool) -> Self {
        self.reencode_percent = value;
        self
    }

    /// Sets whether to fail on an invalid percent-encoded octet instead of
    /// encoding its `%` as `%25`.
    ///
    /// This defaults to `false`. Has no effect when `%` is re-encoded.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }
}

/// Options for [`decode`](super::decode) and [`form::decode`](crate::form::decode).
///
/// # Examples
///
/// ```
/// use uri_transform::pct_enc::{self, DecodeOptions};
///
/// let opts = DecodeOptions::new().until_stable(true).max_iterations(1);
/// assert_eq!(pct_enc::decode("%252520", &opts)?, "%2520");
/// # Ok::<_, uri_transform::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct DecodeOptions {
    pub(super) times: usize,
    pub(super) until_stable: bool,
    pub(super) max_iterations: usize,
    pub(super) strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// Creates a new `DecodeOptions` with default configuration.
    pub const fn new() -> Self {
        Self {
            times: 1,
            until_stable: false,
            max_iterations: 10,
            strict: false,
        }
    }

    /// Sets the number of decoding passes.
    ///
    /// This defaults to `1`. Zero is treated as `1`.
    /// Ignored when [`until_stable`](Self::until_stable) is set.
    pub fn times(mut self, value: usize) -> Self {
        self.times = value;
        self
    }

    /// Sets whether to decode until the output stops changing.
    ///
    /// This defaults to `false`.
    pub fn until_stable(mut self, value: bool) -> Self {
        self.until_stable = value;
        self
    }

    /// Sets the maximum number of passes when decoding until stable.
    ///
    /// This defaults to `10`. Zero is treated as `1`.
    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = value;
        self
    }

    /// Sets whether to fail on an invalid percent-encoded octet instead of
    /// passing its `%` through.
    ///
    /// This defaults to `false`.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Returns the effective passes.
    #[must_use]
    pub fn passes(&self) -> Passes {
        if self.until_stable {
            Passes::UntilStable {
                max_iterations: self.max_iterations.max(1),
            }
        } else {
            Passes::Times(self.times.max(1))
        }
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }
}

/// Options for [`normalize`](super::normalize).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct NormalizeOptions {
    pub(super) uppercase_hex: bool,
    pub(super) strict: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizeOptions {
    /// Creates a new `NormalizeOptions` with default configuration.
    pub const fn new() -> Self {
        Self {
            uppercase_hex: true,
            strict: false,
        }
    }

    /// Sets whether to uppercase the hexadecimal digits of octets that stay encoded.
    ///
    /// This defaults to `true`.
    pub fn uppercase_hex(mut self, value: bool) -> Self {
        self.uppercase_hex = value;
        self
    }

    /// Sets whether to fail on an invalid percent-encoded octet.
    ///
    /// This defaults to `false`.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }
}
