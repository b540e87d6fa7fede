/// Detailed cause of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// Reported only in strict mode. The error index points to the percent
    /// character "%" of the octet.
    InvalidPercentSequence,
    /// The host could not be converted by the IDNA converter.
    ///
    /// The error index points to the first byte of the host.
    DomainConversion,
}

/// An error occurred when transforming a string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Error {
    pub(crate) index: usize,
    pub(crate) kind: ErrorKind,
}

impl Error {
    /// Returns the byte index in the input at which the error occurred.
    ///
    /// For multi-pass decoding, the index refers to the input of the pass
    /// that failed.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[cfg(feature = "impl-error")]
impl crate::StdError for Error {}

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(crate::Error {
            index: $index,
            kind: crate::ErrorKind::$kind,
        })
    };
}

pub(crate) use err;
