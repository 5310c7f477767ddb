//! `Accept-Encoding` content negotiation
//!
//! This crate decides, from the `Accept-Encoding` field a client sent, which content codings a
//! server should try and in which order. It honors quality values, the `*` wildcard and the
//! special `identity` coding as described in
//! [RFC 9110 Section 12.5.3](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.3).
//!
//! It does not compress anything: the caller receives the candidates one at a time through a
//! [`Handler`] and stops negotiation as soon as it has produced a response.
//!
//! # Example
//!
//! ```
//! use micro_encoding::protocol::{is_disallowed_in_wildcard, is_wildcard, Coding};
//! use micro_encoding::{handler_fn, negotiate};
//!
//! let mut chosen = None;
//! let accepted = negotiate(
//!     "br;q=0, gzip;q=0.5, *",
//!     &mut handler_fn(|coding: &Coding| {
//!         // this server can only produce gzip or plain text
//!         let accept = coding.to_string();
//!         if accept == "gzip" || is_wildcard(&accept) && !is_disallowed_in_wildcard(&accept, "gzip") {
//!             chosen = Some("gzip");
//!         } else if accept.is_empty() || is_wildcard(&accept) && !is_disallowed_in_wildcard(&accept, "") {
//!             chosen = Some("identity");
//!         } else {
//!             return false;
//!         }
//!         true
//!     }),
//! );
//!
//! // `*` has the highest quality and does not exclude gzip
//! assert!(accepted);
//! assert_eq!(chosen, Some("gzip"));
//! ```
//!
//! Most servers only need [`Negotiator::select`]:
//!
//! ```
//! use micro_encoding::protocol::{ContentCoding, NegotiateError};
//! use micro_encoding::Negotiator;
//!
//! let negotiator = Negotiator::default();
//! let supported = [ContentCoding::Br, ContentCoding::Gzip, ContentCoding::Identity];
//!
//! assert_eq!(negotiator.select("gzip, br;q=0.8", &supported), Ok(ContentCoding::Gzip));
//! assert_eq!(negotiator.select("zstd", &supported), Ok(ContentCoding::Identity));
//! assert_eq!(negotiator.select("zstd, identity;q=0", &supported), Err(NegotiateError::NotAcceptable));
//! ```
//!
//! # Architecture
//!
//! Data flows one way, nothing is kept between calls:
//!
//! - [`codec`]: the [`Tokenizer`](codec::Tokenizer) scans the raw value into tokens and the
//!   [`Quality`](codec::Quality) decoder turns weights into fixed-point numbers
//! - [`Negotiator`]: resolves the tokens into [`Preferences`](protocol::Preferences), ordered by
//!   descending quality, duplicates removed, the wildcard carrying the codings it excludes
//! - [`handler`]: dispatches every acceptable candidate to a [`Handler`]
//! - [`protocol`]: the data types and error types
//!
//! # Malformed input
//!
//! Negotiation never fails. Entries that are not tokens are skipped, entries with a malformed or
//! out of range weight are dropped, duplicates are ignored. The only failure a caller sees is no
//! candidate being accepted, which is usually answered with [`not_acceptable`].
//!
//! A missing or empty `Accept-Encoding` field only offers identity. It is not read as `*`, so a
//! server that wants to compress for such clients has to decide that itself.

pub mod codec;
pub mod handler;
pub mod protocol;

mod negotiator;
pub use negotiator::negotiate;
pub use negotiator::Negotiator;
pub use negotiator::NegotiatorBuilder;

mod request;
pub use request::clear_encoding;
pub use request::not_acceptable;

pub use handler::handler_fn;
pub use handler::Handler;
