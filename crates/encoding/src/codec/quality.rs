//! Fixed-point quality values.
//!
//! A quality value ("q-value") is a number in `[0, 1]` with at most three decimals, kept here as
//! an integer in `[0, 1000]`.

use std::fmt;

/// Positional multipliers of the (up to three) fractional digits
const MULTIPLIERS: [u16; 3] = [100, 10, 1];

/// A quality value scaled by 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u16);

impl Quality {
    /// `q=0`, the coding is not acceptable
    pub const ZERO: Quality = Quality(0);

    /// The lowest acceptable quality, used for the implicit identity fallback
    pub const MIN: Quality = Quality(1);

    /// `q=1`, also the quality of an entry without a weight clause
    pub const MAX: Quality = Quality(1000);

    /// Creates a quality from its value scaled by 1000, `None` when above 1000.
    pub const fn new(value: u16) -> Option<Self> {
        if value > Self::MAX.0 { None } else { Some(Self(value)) }
    }

    /// Returns the quality scaled by 1000.
    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Decodes the text of a weight token.
    ///
    /// The text must already be a valid `qvalue`, which the tokenizer guarantees: either `1`
    /// optionally followed by `.` and zeros, or `0` optionally followed by `.` and up to three
    /// digits. Missing trailing digits count as zeros.
    pub(crate) fn decode(weight: &str) -> Self {
        let bytes = weight.as_bytes();

        if bytes.first() == Some(&b'1') {
            return Self::MAX;
        }

        if bytes.len() < 2 {
            return Self::ZERO;
        }

        let value = bytes[2..].iter().zip(MULTIPLIERS).map(|(digit, multiplier)| u16::from(digit - b'0') * multiplier).sum();

        Self(value)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::MAX
    }
}

/// Formats as a q-value, e.g. `1`, `0.5` or `0.125`.
impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000 => f.write_str("1"),
            0 => f.write_str("0"),
            value => {
                let fraction = format!("{value:03}");
                write!(f, "0.{}", fraction.trim_end_matches('0'))
            }
        }
    }
}
