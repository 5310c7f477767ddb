//! Resolution of an `Accept-Encoding` value into an ordered candidate list.
//!
//! Resolution follows [RFC 9110 Section 12.5.3](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.3):
//!
//! 1. Entries with a malformed weight are dropped, entries without one get `q=1`.
//! 2. `identity` becomes [`Coding::Identity`], `*` becomes [`Coding::Wildcard`].
//! 3. The first entry for a coding wins, later ones are ignored whatever their weight.
//! 4. Every `q=0` coding is added to the wildcard's [`Exclusions`](crate::protocol::Exclusions).
//! 5. The list is stably sorted by descending quality, so equally weighted codings keep the
//!    client's order.
//! 6. Unless `identity` was listed or `*;q=0` was sent, identity is appended with the lowest
//!    acceptable quality, so "no encoding" is always a last resort.
//!
//! A missing field, or one that is empty, only accepts identity. It is not treated as `*`.
//!
//! The number of entries considered is unlimited unless [`NegotiatorBuilder::max_codings`] is set.

use http::Request;
use tracing::{debug, trace, warn};

use crate::codec::{Quality, Token, Tokenizer};
use crate::handler::{Handler, handler_fn};
use crate::protocol::{
    ACCEPT_ENCODING, Coding, ContentCoding, Exclusions, IDENTITY, NegotiateError, NegotiatorBuildError, Preference,
    Preferences, WILDCARD,
};

/// Resolves `Accept-Encoding` values and dispatches the result.
///
/// A `Negotiator` holds configuration only, every call works on its own state, so one instance
/// can be shared freely between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Negotiator {
    case_insensitive: bool,
    max_codings: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct NegotiatorBuilder {
    case_insensitive: bool,
    max_codings: Option<usize>,
}

impl NegotiatorBuilder {
    fn new() -> Self {
        Self { case_insensitive: false, max_codings: None }
    }

    /// Match `identity` ignoring ASCII case and lower-case every coding name before duplicates
    /// are detected. Off by default.
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Entries beyond this count are ignored. Unlimited by default.
    pub fn max_codings(mut self, max_codings: usize) -> Self {
        self.max_codings = Some(max_codings);
        self
    }

    pub fn build(self) -> Result<Negotiator, NegotiatorBuildError> {
        if self.max_codings == Some(0) {
            return Err(NegotiatorBuildError::InvalidMaxCodings);
        }
        Ok(Negotiator { case_insensitive: self.case_insensitive, max_codings: self.max_codings })
    }
}

impl Negotiator {
    pub fn builder() -> NegotiatorBuilder {
        NegotiatorBuilder::new()
    }

    /// Resolves a field value into candidates, ordered by preference.
    pub fn resolve(&self, accept_encoding: &str) -> Preferences {
        self.resolve_bytes(accept_encoding.as_bytes())
    }

    /// Like [`resolve`](Self::resolve) for a raw field value.
    pub fn resolve_bytes(&self, accept_encoding: &[u8]) -> Preferences {
        let mut value = accept_encoding.trim_ascii();
        if value.is_empty() {
            value = IDENTITY.as_bytes();
        }

        let mut resolver = Resolver::new(self);
        let mut tokens = Tokenizer::from_bytes(value).peekable();
        let mut seen = 0;

        while let Some(token) = tokens.next() {
            let Token::Coding(name) = token else {
                continue;
            };

            let quality = match tokens.peek() {
                Some(Token::InvalidWeight) => {
                    tokens.next();
                    trace!(coding = name, "ignoring coding with malformed weight");
                    continue;
                }
                Some(&Token::Weight(weight)) => {
                    tokens.next();
                    Quality::decode(weight)
                }
                _ => Quality::MAX,
            };

            seen += 1;
            if let Some(max_codings) = self.max_codings
                && seen > max_codings
            {
                warn!(max_codings, "too many accept-encoding entries, ignoring the rest");
                break;
            }

            resolver.push(name, quality);
        }

        let preferences = resolver.finish();
        debug!(preferences = %preferences, "resolved accept-encoding");
        preferences
    }

    /// Resolves `accept_encoding` and offers the acceptable candidates to `handler` in order.
    ///
    /// Returns `true` when the handler accepted one of them. When it returns `false` the caller
    /// would usually answer with [`not_acceptable`](crate::not_acceptable).
    pub fn negotiate<H: Handler + ?Sized>(&self, accept_encoding: &str, handler: &mut H) -> bool {
        self.resolve(accept_encoding).dispatch(handler)
    }

    /// Negotiates on the `Accept-Encoding` fields of `req`.
    ///
    /// Several fields are combined into one list. Without any field only identity is offered.
    pub fn negotiate_request<B, H: Handler + ?Sized>(&self, req: &Request<B>, handler: &mut H) -> bool {
        let mut values = req.headers().get_all(ACCEPT_ENCODING).iter();

        let preferences = match (values.next(), values.next()) {
            (None, _) => self.resolve_bytes(&[]),
            (Some(value), None) => self.resolve_bytes(value.as_bytes()),
            (Some(first), Some(second)) => {
                let mut combined = Vec::from(first.as_bytes());
                for value in [second].into_iter().chain(values) {
                    combined.push(b',');
                    combined.extend_from_slice(value.as_bytes());
                }
                self.resolve_bytes(&combined)
            }
        };

        preferences.dispatch(handler)
    }

    /// Picks the coding to respond with among `supported`.
    ///
    /// Candidates are tried in the client's order of preference. A named candidate or identity
    /// needs the same coding in `supported`; the wildcard takes the first entry of `supported`
    /// it does not exclude.
    pub fn select(&self, accept_encoding: &str, supported: &[ContentCoding]) -> Result<ContentCoding, NegotiateError> {
        let mut selected = None;

        self.negotiate(
            accept_encoding,
            &mut handler_fn(|coding: &Coding| {
                selected = supported.iter().copied().find(|content_coding| content_coding.satisfies(coding));
                selected.is_some()
            }),
        );

        selected.ok_or(NegotiateError::NotAcceptable)
    }
}

/// Resolves with the default [`Negotiator`], see [`Negotiator::negotiate`].
pub fn negotiate<H: Handler + ?Sized>(accept_encoding: &str, handler: &mut H) -> bool {
    Negotiator::default().negotiate(accept_encoding, handler)
}

/// Working state of a single resolution.
struct Resolver {
    case_insensitive: bool,
    preferences: Vec<Preference>,
    identity_listed: bool,
    wildcard_excluded: bool,
    exclusions: Exclusions,
    wildcard_index: Option<usize>,
}

impl Resolver {
    fn new(negotiator: &Negotiator) -> Self {
        Self {
            case_insensitive: negotiator.case_insensitive,
            preferences: Vec::new(),
            identity_listed: false,
            wildcard_excluded: false,
            exclusions: Exclusions::default(),
            wildcard_index: None,
        }
    }

    fn is_identity(&self, name: &str) -> bool {
        if self.case_insensitive { name.eq_ignore_ascii_case(IDENTITY) } else { name == IDENTITY }
    }

    fn push(&mut self, name: &str, quality: Quality) {
        let coding = if self.is_identity(name) {
            self.identity_listed = true;
            Coding::Identity
        } else if name == WILDCARD {
            if quality.is_zero() {
                self.wildcard_excluded = true;
            }
            Coding::Wildcard(Exclusions::default())
        } else if self.case_insensitive {
            Coding::Named(name.to_ascii_lowercase())
        } else {
            Coding::Named(name.to_owned())
        };

        if self.preferences.iter().any(|preference| preference.coding().name() == coding.name()) {
            trace!(coding = name, "ignoring duplicate coding");
            return;
        }

        if quality.is_zero() {
            self.exclusions.push(coding.name());
        }

        if coding.is_wildcard() {
            self.wildcard_index = Some(self.preferences.len());
        }

        self.preferences.push(Preference::new(coding, quality));
    }

    fn finish(mut self) -> Preferences {
        if let Some(index) = self.wildcard_index {
            *self.preferences[index].coding_mut() = Coding::Wildcard(self.exclusions);
        }

        // stable, equal qualities keep the order of the header
        self.preferences.sort_by(|a, b| b.quality().cmp(&a.quality()));

        if !self.identity_listed && !self.wildcard_excluded {
            self.preferences.push(Preference::new(Coding::Identity, Quality::MIN));
        }

        Preferences::new(self.preferences)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    /// Every candidate offered to a handler that never accepts.
    fn offered(negotiator: &Negotiator, accept_encoding: &str) -> Vec<String> {
        let mut offered = Vec::new();
        let accepted = negotiator.negotiate(
            accept_encoding,
            &mut handler_fn(|coding: &Coding| {
                offered.push(coding.to_string());
                false
            }),
        );
        assert!(!accepted);
        offered
    }

    fn assert_offered(accept_encoding: &str, expected: &[&str]) {
        assert_eq!(offered(&Negotiator::default(), accept_encoding), expected, "accept-encoding {accept_encoding:?}");
    }

    #[test]
    fn test_order() {
        assert_offered("", &[""]);
        assert_offered("  ", &[""]);
        assert_offered("gzip", &["gzip", ""]);
        assert_offered("gzip, deflate, br", &["gzip", "deflate", "br", ""]);
        assert_offered("gzip, deflate;q=0.5, br;q=0.9", &["gzip", "br", "deflate", ""]);
        assert_offered("gzip;q=0.1, deflate;q=0.1, br;q=0.1", &["gzip", "deflate", "br", ""]);
    }

    #[test]
    fn test_malformed_weight_drops_entry() {
        assert_offered("gzip, deflate;q=0.5, br;q=1.9", &["gzip", "deflate", ""]);
        assert_offered("identity, gzip, deflate;q=0.5, br;q=1.9", &["", "gzip", "deflate"]);
        assert_offered("identity;q=2", &[""]);
    }

    #[test]
    fn test_identity() {
        assert_offered("identity", &[""]);
        assert_offered("gzip, br, identity;q=0", &["gzip", "br"]);
        assert_offered("identity;q=0.5, gzip", &["gzip", ""]);
        assert_offered("gzip;q=0.5, identity;q=0.6", &["", "gzip"]);
    }

    #[test]
    fn test_wildcard() {
        assert_offered("*", &["*", ""]);
        assert_offered("gzip, *, br", &["gzip", "*", "br", ""]);
        assert_offered("gzip, *, br;q=0, bzip;q=0", &["gzip", "*;br;bzip", ""]);
        assert_offered("gzip, br, identity;q=0, *", &["gzip", "br", "*;"]);
        assert_offered("br;q=0, *;q=0.5", &["*;br", ""]);
    }

    #[test]
    fn test_wildcard_excluded() {
        assert_offered("*;q=0", &[]);
        assert_offered("gzip, *;q=0", &["gzip"]);
        assert_offered("*, *;q=0", &["*"]);
        assert_offered("*;q=0, identity", &[""]);
    }

    #[test]
    fn test_duplicates() {
        assert_offered("*, *", &["*", ""]);
        assert_offered("gzip;q=0.5, gzip", &["gzip", ""]);
        assert_offered("gzip, gzip;q=0, *", &["gzip", "*", ""]);
        assert_offered("identity;q=0.5, identity;q=0, *", &["*", ""]);
    }

    #[test]
    fn test_case_sensitive_by_default() {
        assert_offered("GZIP, gzip", &["GZIP", "gzip", ""]);
        assert_offered("IDENTITY;q=0", &[""]);
    }

    #[test]
    fn test_case_insensitive() {
        let negotiator = Negotiator::builder().case_insensitive(true).build().unwrap();
        assert_eq!(offered(&negotiator, "GZIP, gzip;q=0, Br"), ["gzip", "br", ""]);
        assert_eq!(offered(&negotiator, "Identity;q=0, *"), ["*;"]);
    }

    #[test]
    fn test_resolved_list_keeps_zero_quality_entries() {
        let preferences = Negotiator::default().resolve("gzip, *, br;q=0, bzip;q=0");

        let entries: Vec<_> =
            preferences.iter().map(|preference| (preference.coding().to_string(), preference.quality().value())).collect();
        assert_eq!(
            entries,
            [
                ("gzip".to_owned(), 1000),
                ("*;br;bzip".to_owned(), 1000),
                ("br".to_owned(), 0),
                ("bzip".to_owned(), 0),
                (String::new(), 1),
            ]
        );
    }

    #[test]
    fn test_resolved_list_is_sorted() {
        let preferences = Negotiator::default().resolve("a;q=0.2, b, c;q=0, d;q=0.7, e;q=0.2, f;q=1.0, *;q=0.05");
        let qualities: Vec<_> = preferences.iter().map(|preference| preference.quality()).collect();
        // the implicit identity is appended after sorting
        assert!(qualities[..qualities.len() - 1].windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(preferences.acceptable().map(ToString::to_string).collect::<Vec<_>>(), [
            "b", "f", "d", "a", "e", "*;c", ""
        ]);
    }

    #[test]
    fn test_max_codings() {
        let negotiator = Negotiator::builder().max_codings(2).build().unwrap();
        assert_eq!(offered(&negotiator, "gzip, br, deflate"), ["gzip", "br", ""]);
        // malformed entries do not count
        assert_eq!(offered(&negotiator, "gzip;q=5, br, deflate"), ["br", "deflate", ""]);

        assert_eq!(Negotiator::builder().max_codings(0).build(), Err(NegotiatorBuildError::InvalidMaxCodings));
    }

    #[test]
    fn test_unlimited_by_default() {
        let mut codings: Vec<_> = (0..100).map(|index| format!("c{index}")).collect();

        codings.push("identity;q=0".to_owned());
        let offered = offered(&Negotiator::default(), &codings.join(", "));
        assert_eq!(offered.len(), 100);
        assert_eq!(offered.last().map(String::as_str), Some("c99"));

        codings.pop();
        codings.push("*".to_owned());
        codings.push("gzip;q=0".to_owned());
        let offered = self::offered(&Negotiator::default(), &codings.join(", "));
        assert_eq!(offered[100..], ["*;gzip", ""]);
    }

    #[test]
    fn test_resolve_bytes() {
        let preferences = Negotiator::default().resolve_bytes(b"gz\xe9ip, br");
        assert_eq!(preferences.acceptable().map(ToString::to_string).collect::<Vec<_>>(), ["gz", "br", ""]);
    }

    #[test]
    fn test_handler_stops_dispatch() {
        let mut offered = Vec::new();
        let accepted = negotiate(
            "br, gzip;q=0.8",
            &mut handler_fn(|coding: &Coding| {
                offered.push(coding.to_string());
                coding.name() == "gzip"
            }),
        );
        assert!(accepted);
        assert_eq!(offered, ["br", "gzip"]);
    }

    #[test]
    fn test_negotiate_request() {
        let negotiator = Negotiator::default();
        let collect = |req: &Request<()>| {
            let mut offered = Vec::new();
            negotiator.negotiate_request(
                req,
                &mut handler_fn(|coding: &Coding| {
                    offered.push(coding.to_string());
                    false
                }),
            );
            offered
        };

        let req = Request::builder().body(()).unwrap();
        assert_eq!(collect(&req), [""]);

        let req = Request::builder().header(ACCEPT_ENCODING, "gzip;q=0.5, br").body(()).unwrap();
        assert_eq!(collect(&req), ["br", "gzip", ""]);

        let mut req = Request::builder().header(ACCEPT_ENCODING, "gzip").body(()).unwrap();
        req.headers_mut().append(ACCEPT_ENCODING, HeaderValue::from_static("br;q=0, *"));
        req.headers_mut().append(ACCEPT_ENCODING, HeaderValue::from_static("identity;q=0.1"));
        assert_eq!(collect(&req), ["gzip", "*;br", ""]);
    }

    #[test]
    fn test_select() {
        let supported = [ContentCoding::Zstd, ContentCoding::Br, ContentCoding::Gzip, ContentCoding::Identity];
        let negotiator = Negotiator::default();

        assert_eq!(negotiator.select("", &supported), Ok(ContentCoding::Identity));
        assert_eq!(negotiator.select("", &[ContentCoding::Gzip]), Err(NegotiateError::NotAcceptable));
        assert_eq!(negotiator.select("gzip, br", &supported), Ok(ContentCoding::Gzip));
        assert_eq!(negotiator.select("gzip;q=0.5, br", &supported), Ok(ContentCoding::Br));
        assert_eq!(negotiator.select("compress, gzip", &supported), Ok(ContentCoding::Gzip));
        assert_eq!(negotiator.select("compress", &supported), Ok(ContentCoding::Identity));
        assert_eq!(negotiator.select("*", &supported), Ok(ContentCoding::Zstd));
        assert_eq!(negotiator.select("zstd;q=0, *", &supported), Ok(ContentCoding::Br));
        assert_eq!(negotiator.select("gzip;q=0.5, identity;q=0.6", &supported), Ok(ContentCoding::Identity));
        assert_eq!(negotiator.select("identity;q=0", &supported), Err(NegotiateError::NotAcceptable));
        assert_eq!(negotiator.select("*;q=0", &supported), Err(NegotiateError::NotAcceptable));
        assert_eq!(negotiator.select("br", &[ContentCoding::Gzip]), Err(NegotiateError::NotAcceptable));
    }
}
