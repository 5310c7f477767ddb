//! Negotiation data types.
//!
//! - [`Coding`]: a resolved candidate, the wildcard carrying its [`Exclusions`]
//! - [`Preference`] / [`Preferences`]: candidates with their quality, in preference order
//! - [`ContentCoding`]: the codings a server can produce
//! - [`NegotiateError`], [`NegotiatorBuildError`]: error types

mod coding;
pub use coding::is_disallowed_in_wildcard;
pub use coding::is_wildcard;
pub use coding::Coding;
pub use coding::Exclusions;
pub use coding::IDENTITY;
pub use coding::WILDCARD;

mod preference;
pub use preference::Preference;
pub use preference::Preferences;

mod content_coding;
pub use content_coding::ContentCoding;

mod error;
pub use error::NegotiateError;
pub use error::NegotiatorBuildError;

/// The request field this crate negotiates on
pub const ACCEPT_ENCODING: http::HeaderName = http::header::ACCEPT_ENCODING;
