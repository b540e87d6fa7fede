//! A report of twelve transformations of one input.
//!
//! [`generate`] runs the codecs of this crate side by side on the same
//! input, so that a caller can compare how a string looks under each of
//! them. Every [`Variant`] carries a trace of the steps that produced it.
//!
//! | Id | Transformation                                             |
//! |----|------------------------------------------------------------|
//! | 1  | Percent-encoding in the configured context                 |
//! | 2  | Same as 1, reserved characters kept                        |
//! | 3  | Form encoding                                              |
//! | 4  | Selective encoding of the configured characters            |
//! | 5  | Encoding of everything but letters and digits              |
//! | 6  | Encoding of everything but the configured safe set         |
//! | 7  | Percent-encoding repeated `encode_n` times, `%` included   |
//! | 8  | Same as 1, hexadecimal digits in alternating case          |
//! | 9  | Percent-decoding, once                                     |
//! | 10 | Percent-decoding until stable                              |
//! | 11 | Normalization followed by percent-encoding                 |
//! | 12 | Punycode conversion of a Unicode domain, if any            |

use crate::{
    domain,
    form::{self, FormOptions},
    multipass,
    pct_enc::{self, DecodeOptions, NormalizeOptions, Rfc3986Options},
    selective::{self, NonAlnumOptions, SafeSetOptions, SelectiveOptions},
    table::{Context, Table, GEN_DELIMS, UNRESERVED},
    Error,
};
use alloc::{format, string::String, vec, vec::Vec};

#[cfg(feature = "serde")]
use serde::{ser::SerializeMap, ser::SerializeStruct, Serialize, Serializer};

/// Configuration for [`generate`].
///
/// # Examples
///
/// ```
/// use uri_transform::{variant::{self, VariantConfig}, Context};
///
/// let config = VariantConfig::new()
///     .context(Context::Query)
///     .selective_chars("&=")
///     .encode_n(3);
/// let report = variant::generate("a=b&c d", &config)?;
/// assert_eq!(report[0].value, "a=b&c%20d");
/// assert_eq!(report[3].value, "a%3Db%26c d");
/// assert_eq!(report[6].value, "a=b&c%252520d");
/// # Ok::<_, uri_transform::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct VariantConfig {
    selective_chars: String,
    safe_set: Table,
    encode_n: usize,
    max_decode_iterations: usize,
    context: Context,
    keep_reserved: bool,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantConfig {
    /// Creates a new `VariantConfig` with default configuration.
    pub const fn new() -> Self {
        Self {
            selective_chars: String::new(),
            safe_set: UNRESERVED,
            encode_n: 2,
            max_decode_iterations: 10,
            context: Context::Full,
            keep_reserved: false,
        }
    }

    /// Sets the characters encoded by variant 4.
    ///
    /// This defaults to the empty string.
    pub fn selective_chars(mut self, value: impl Into<String>) -> Self {
        self.selective_chars = value.into();
        self
    }

    /// Sets the characters left unencoded by variant 6.
    ///
    /// This defaults to [`UNRESERVED`].
    pub fn safe_set(mut self, value: Table) -> Self {
        self.safe_set = value;
        self
    }

    /// Sets the number of encoding passes of variant 7.
    ///
    /// This defaults to `2`.
    pub fn encode_n(mut self, value: usize) -> Self {
        self.encode_n = value;
        self
    }

    /// Sets the maximum number of decoding passes of variant 10.
    ///
    /// This defaults to `10`.
    pub fn max_decode_iterations(mut self, value: usize) -> Self {
        self.max_decode_iterations = value;
        self
    }

    /// Sets the context of the percent-encoding variants.
    ///
    /// This defaults to [`Context::Full`].
    pub fn context(mut self, value: Context) -> Self {
        self.context = value;
        self
    }

    /// Sets whether reserved characters are kept by variants 4, 5 and 11.
    ///
    /// This defaults to `false`.
    pub fn keep_reserved(mut self, value: bool) -> Self {
        self.keep_reserved = value;
        self
    }
}

/// A transformation of the input, with a trace of how it was produced.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Variant {
    /// The identifier of the transformation, from 1 to 12.
    pub id: u8,
    /// A human-readable description of the transformation.
    pub label: String,
    /// The transformed string.
    pub value: String,
    /// The steps applied to the input, in order.
    pub trace: Vec<Step>,
}

/// A step of a transformation: the name of the operation applied and the
/// options it was applied with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// The name of the operation.
    pub name: &'static str,
    /// The options of the operation, in order.
    pub params: Vec<(&'static str, Param)>,
}

impl Step {
    /// Creates a step without options.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }

    /// Adds an option to the step.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Into<Param>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Returns the value of the option with the given name, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }
}

/// The value of an option in a [`Step`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Param {
    /// A flag.
    Bool(bool),
    /// A count.
    Int(usize),
    /// A string.
    Str(String),
    /// An encoding context.
    Context(Context),
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<usize> for Param {
    fn from(value: usize) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<Context> for Param {
    fn from(value: Context) -> Self {
        Self::Context(value)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Step {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct Params<'a>(&'a [(&'static str, Param)]);

        impl Serialize for Params<'_> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (k, v) in self.0 {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }

        let mut s = serializer.serialize_struct("Step", 2)?;
        s.serialize_field("name", self.name)?;
        s.serialize_field("params", &Params(&self.params))?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Param {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_u64(*n as u64),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Context(c) => c.serialize(serializer),
        }
    }
}

/// Checks whether the input looks like a bare domain name.
fn is_bare_domain(s: &str) -> bool {
    s.contains('.')
        && !s
            .chars()
            .any(|ch| ch.is_whitespace() || ch == '%' || GEN_DELIMS.allows(ch))
}

/// Checks whether the host of a URL, or a bare domain, has any non-ASCII
/// character.
fn has_unicode_domain(input: &str) -> bool {
    let host = match domain::host_span(input) {
        Some(span) => &input[span],
        None if is_bare_domain(input) => input,
        None => return false,
    };
    !host.is_ascii()
}

/// Generates the twelve variants of an input, in order of their ids.
///
/// # Errors
///
/// Returns `Err` if the input has a Unicode domain that cannot be converted
/// to punycode.
///
/// # Examples
///
/// ```
/// use uri_transform::variant::{self, VariantConfig};
///
/// let report = variant::generate("hello world", &VariantConfig::new())?;
/// assert_eq!(report.len(), 12);
/// assert_eq!(report[0].value, "hello%20world");
/// assert_eq!(report[2].value, "hello+world");
/// assert_eq!(report[11].value, "hello world");
///
/// let report = variant::generate("https://münchen.de/", &VariantConfig::new())?;
/// assert_eq!(report[11].value, "https://xn--mnchen-3ya.de/");
/// # Ok::<_, uri_transform::Error>(())
/// ```
pub fn generate(input: &str, config: &VariantConfig) -> Result<[Variant; 12], Error> {
    let context = config.context;
    let keep_reserved = config.keep_reserved;

    let canonical_opts = Rfc3986Options::new().context(context);
    let canonical = pct_enc::encode(input, &canonical_opts)?;

    let keep_reserved_opts = canonical_opts.keep_reserved(true);

    let selective_opts = SelectiveOptions::new()
        .chars_to_encode(&config.selective_chars)
        .keep_reserved(keep_reserved);

    let multi_opts = canonical_opts.reencode_percent(true);
    let multi = multipass::try_apply_n_times(input, config.encode_n, |s| {
        pct_enc::encode(s, &multi_opts)
    })?;

    let stable_opts = DecodeOptions::new()
        .until_stable(true)
        .max_iterations(config.max_decode_iterations);

    let normalized = pct_enc::normalize(input, &NormalizeOptions::new())?;
    let normalized_opts = canonical_opts.keep_reserved(keep_reserved);

    let punycode = if has_unicode_domain(input) {
        Variant {
            id: 12,
            label: String::from("Domain → Punycode"),
            value: domain::domain_to_punycode(input)?,
            trace: vec![Step::new("domain::domain_to_punycode")],
        }
    } else {
        Variant {
            id: 12,
            label: String::from("Domain → Punycode (no Unicode domain detected)"),
            value: String::from(input),
            trace: vec![Step::new("domain::domain_to_punycode").param("skipped", true)],
        }
    };

    Ok([
        Variant {
            id: 1,
            label: String::from("RFC3986 canonical"),
            value: canonical.clone(),
            trace: vec![Step::new("pct_enc::encode")
                .param("context", context)
                .param("keep_reserved", false)],
        },
        Variant {
            id: 2,
            label: String::from("RFC3986 keep-reserved"),
            value: pct_enc::encode(input, &keep_reserved_opts)?,
            trace: vec![Step::new("pct_enc::encode")
                .param("context", context)
                .param("keep_reserved", true)],
        },
        Variant {
            id: 3,
            label: String::from("Form encode (space → +)"),
            value: form::encode(input, &FormOptions::new()),
            trace: vec![Step::new("form::encode")],
        },
        Variant {
            id: 4,
            label: if config.selective_chars.is_empty() {
                String::from("Selective encode [(none)]")
            } else {
                format!("Selective encode [{}]", config.selective_chars)
            },
            value: selective::selective_encode(input, &selective_opts),
            trace: vec![Step::new("selective::selective_encode")
                .param("chars_to_encode", config.selective_chars.as_str())
                .param("keep_reserved", keep_reserved)],
        },
        Variant {
            id: 5,
            label: String::from("Encode non-alphanumeric"),
            value: selective::encode_non_alnum(
                input,
                &NonAlnumOptions::new().keep_reserved(keep_reserved),
            ),
            trace: vec![
                Step::new("selective::encode_non_alnum").param("keep_reserved", keep_reserved),
            ],
        },
        Variant {
            id: 6,
            label: String::from("Encode except safe set"),
            value: selective::encode_except_safe_set(input, &SafeSetOptions::new(config.safe_set)),
            trace: vec![Step::new("selective::encode_except_safe_set")
                .param("safe_set", format!("[{} chars]", config.safe_set.len()))],
        },
        Variant {
            id: 7,
            label: format!("Multi-encode (N={})", config.encode_n),
            value: multi,
            trace: vec![Step::new("multipass::apply_n_times")
                .param("n", config.encode_n)
                .param("encoder", "pct_enc::encode")
                .param("context", context)
                .param("reencode_percent", true)],
        },
        Variant {
            id: 8,
            label: String::from("Mixed-case percent"),
            value: multipass::mixed_case_percent(&canonical),
            trace: vec![
                Step::new("pct_enc::encode").param("context", context),
                Step::new("multipass::mixed_case_percent"),
            ],
        },
        Variant {
            id: 9,
            label: String::from("Decode once"),
            value: pct_enc::decode(input, &DecodeOptions::new())?,
            trace: vec![Step::new("pct_enc::decode").param("times", 1usize)],
        },
        Variant {
            id: 10,
            label: format!("Decode until stable (max {})", config.max_decode_iterations),
            value: pct_enc::decode(input, &stable_opts)?,
            trace: vec![Step::new("pct_enc::decode")
                .param("until_stable", true)
                .param("max_iterations", config.max_decode_iterations)],
        },
        Variant {
            id: 11,
            label: String::from("Normalize → encode"),
            value: pct_enc::encode(&normalized, &normalized_opts)?,
            trace: vec![
                Step::new("pct_enc::normalize").param("uppercase_hex", true),
                Step::new("pct_enc::encode")
                    .param("context", context)
                    .param("keep_reserved", keep_reserved),
            ],
        },
        punycode,
    ])
}
