#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

//! A configurable URI/IRI transformation engine following IETF [RFC 3986]
//! and [RFC 3987].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986
//! [RFC 3987]: https://datatracker.ietf.org/doc/html/rfc3987
//!
//! The crate is made of small codecs that each take an input string and an
//! immutable options record:
//!
//! - [`pct_enc`]: percent-encoding, decoding and normalization.
//! - [`form`]: `application/x-www-form-urlencoded` encoding and decoding.
//! - [`selective`]: encoders driven by an explicit set of characters.
//! - [`multipass`]: generic N-times and until-stable drivers.
//! - [`iri`] and [`domain`]: IRI/URI conversion and punycode domains.
//! - [`query`]: query string parsing and building.
//!
//! The [`variant`] module composes all of them into a fixed report of twelve
//! labeled transformations of a single input.
//!
//! # Examples
//!
//! ```
//! use uri_transform::pct_enc::{self, DecodeOptions, Rfc3986Options};
//!
//! let encoded = pct_enc::encode("hello world", &Rfc3986Options::new())?;
//! assert_eq!(encoded, "hello%20world");
//!
//! let decoded = pct_enc::decode("%2520", &DecodeOptions::new().times(2))?;
//! assert_eq!(decoded, " ");
//! # Ok::<_, uri_transform::Error>(())
//! ```
//!
//! # Feature flags
//!
//! - `std` (default): Enables `std` support. This includes [`Error`]
//!   implementations and the `std` feature of `idna`.
//!
//! - `impl-error`: Implements the `Error` trait for [`Error`] without `std`,
//!   requiring Rust 1.81 or later.
//!
//! - `serde`: Implements `Serialize` for the report types so that they can be
//!   rendered by a frontend.
//!
//! [`Error`]: crate::Error

extern crate alloc;

pub mod domain;
mod error;
mod fmt;
pub mod form;
pub mod iri;
pub mod multipass;
pub mod pct_enc;
pub mod query;
pub mod selective;
pub mod table;
pub mod utf8;
pub mod variant;

pub use error::{Error, ErrorKind};
pub use table::{Context, Table};

#[cfg(all(feature = "impl-error", not(feature = "std")))]
use core::error::Error as StdError;
#[cfg(feature = "std")]
use std::error::Error as StdError;
