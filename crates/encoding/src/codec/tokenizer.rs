//! Lexical scanner for the `Accept-Encoding` field value.
//!
//! The grammar is the one from [RFC 9110 Section 12.5.3](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.3):
//!
//! ```text
//! Accept-Encoding  = #( codings [ weight ] )
//! codings          = content-coding / "identity" / "*"
//! weight           = OWS ";" OWS "q=" qvalue
//! qvalue           = ( "0" [ "." 0*3DIGIT ] ) / ( "1" [ "." 0*3("0") ] )
//! ```
//!
//! The scanner never fails. A segment that does not start with a token is skipped up to the
//! next `,`, and a weight clause that does not match `qvalue` (or is followed by anything but
//! `,` or the end of input) is reported as [`Token::InvalidWeight`] before scanning resumes
//! after the next `,`.

use tracing::trace;
use TokenizerState::*;

/// List delimiter between entries
const DELIM: u8 = b',';

/// Delimiter between a coding and its weight clause
const WEIGHT_DELIM: u8 = b';';

/// Literal that must open a weight clause
const QVALUE_PREFIX: &[u8] = b"q=";

/// Longest accepted spelling of the maximum quality
const QVALUE_ONE: &[u8] = b"1.000";

/// Maximum number of fractional digits in a quality value
const QVALUE_MAX_DIGITS: usize = 3;

/// A single lexical item of an `Accept-Encoding` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A coding name, `*` or `identity` included.
    Coding(&'a str),
    /// The text of a grammatically valid quality value, without the `q=` prefix.
    Weight(&'a str),
    /// A weight clause was present but malformed.
    InvalidWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenizerState {
    /// Looking for the next coding name
    List,
    /// A coding was just emitted, an optional weight clause may follow
    Weight,
    /// End of input reached
    Done,
}

/// Restartable scanner producing [`Token`]s from a raw field value.
///
/// The tokenizer is an [`Iterator`]; it yields `None` once the input is exhausted and keeps
/// yielding `None` afterwards.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    src: &'a [u8],
    pos: usize,
    state: TokenizerState,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over a field value.
    pub fn new(src: &'a str) -> Self {
        Self::from_bytes(src.as_bytes())
    }

    /// Creates a tokenizer over raw field bytes, which may contain `obs-text`.
    pub fn from_bytes(src: &'a [u8]) -> Self {
        Self { src, pos: 0, state: List }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn accept(&mut self, predicate: impl Fn(u8) -> bool) -> bool {
        match self.peek() {
            Some(b) if predicate(b) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn accept_byte(&mut self, expected: u8) -> bool {
        self.accept(|b| b == expected)
    }

    fn accept_run(&mut self, predicate: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.accept(&predicate) {}
        self.pos - start
    }

    /// Accepts the longest prefix of `literal`, returning how many bytes matched.
    fn accept_prefix(&mut self, literal: &[u8]) -> usize {
        literal.iter().take_while(|&&expected| self.accept_byte(expected)).count()
    }

    fn skip_ows(&mut self) {
        self.accept_run(is_ows);
    }

    /// Resynchronizes on the next entry: everything up to and including the next `,`.
    fn skip_entry(&mut self) {
        self.accept_run(|b| b != DELIM);
        self.accept_byte(DELIM);
    }

    fn text(&self, start: usize, end: usize) -> &'a str {
        let bytes = &self.src[start..end];
        debug_assert!(bytes.is_ascii());
        // SAFETY: callers only slice ranges made of tchar or qvalue bytes, which are all ASCII
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    fn scan_list(&mut self) -> Option<Token<'a>> {
        loop {
            self.skip_ows();

            let start = self.pos;
            if self.accept_run(is_tchar) > 0 {
                self.state = Weight;
                return Some(Token::Coding(self.text(start, self.pos)));
            }

            if self.peek().is_none() {
                self.state = Done;
                return None;
            }

            trace!(offset = start, "skipping malformed accept-encoding entry");
            self.skip_entry();
        }
    }

    fn scan_weight(&mut self) -> Option<Token<'a>> {
        self.skip_ows();

        if !self.accept_byte(WEIGHT_DELIM) {
            // anything after a coding other than a weight clause is ignored up to the next entry
            self.skip_entry();
            return self.scan_list();
        }

        self.skip_ows();

        if self.accept_prefix(QVALUE_PREFIX) == QVALUE_PREFIX.len() {
            let start = self.pos;

            if self.accept_byte(b'0') {
                if self.accept_byte(b'.') {
                    for _ in 0..QVALUE_MAX_DIGITS {
                        self.accept(|b| b.is_ascii_digit());
                    }
                }
                return Some(self.finish_weight(start));
            } else if self.accept_prefix(QVALUE_ONE) > 0 {
                return Some(self.finish_weight(start));
            }
        }

        Some(self.invalid_weight())
    }

    /// A valid quality value must be the last thing in its entry.
    fn finish_weight(&mut self, start: usize) -> Token<'a> {
        let end = self.pos;

        self.skip_ows();

        if self.accept_byte(DELIM) || self.peek().is_none() {
            self.state = List;
            return Token::Weight(self.text(start, end));
        }

        self.invalid_weight()
    }

    fn invalid_weight(&mut self) -> Token<'a> {
        trace!(offset = self.pos, "malformed accept-encoding weight");
        self.skip_entry();
        self.state = List;
        Token::InvalidWeight
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            List => self.scan_list(),
            Weight => self.scan_weight(),
            Done => None,
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Optional whitespace: `SP` or `HTAB`
#[inline]
fn is_ows(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// `tchar` from RFC 9110 Section 5.6.2
#[inline]
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~')
}
