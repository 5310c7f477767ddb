use std::fmt;
use std::str::FromStr;

use crate::protocol::{Coding, NegotiateError};

/// The content codings a server is able to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCoding {
    /// Gzip encoding.
    Gzip,
    /// Deflate encoding.
    Deflate,
    /// Brotli encoding.
    Br,
    /// Zstd encoding.
    Zstd,
    /// No encoding.
    Identity,
}

impl ContentCoding {
    /// Returns the registered name of the coding, `identity` included.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentCoding::Gzip => "gzip",
            ContentCoding::Deflate => "deflate",
            ContentCoding::Br => "br",
            ContentCoding::Zstd => "zstd",
            ContentCoding::Identity => "identity",
        }
    }

    /// Returns the value for a `Content-Encoding` response header, `None` for identity.
    pub fn header_value(self) -> Option<&'static str> {
        match self {
            ContentCoding::Identity => None,
            coding => Some(coding.as_str()),
        }
    }

    /// Returns whether a negotiated candidate may be served with this coding.
    pub fn satisfies(self, candidate: &Coding) -> bool {
        candidate.accepts(self.header_value().unwrap_or_default())
    }
}

impl fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a coding name, ignoring ASCII case. `x-gzip` is an alias of `gzip`.
impl FromStr for ContentCoding {
    type Err = NegotiateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coding = match s.to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => ContentCoding::Gzip,
            "deflate" => ContentCoding::Deflate,
            "br" => ContentCoding::Br,
            "zstd" => ContentCoding::Zstd,
            "identity" => ContentCoding::Identity,
            _ => return Err(NegotiateError::unknown_coding(s)),
        };
        Ok(coding)
    }
}
