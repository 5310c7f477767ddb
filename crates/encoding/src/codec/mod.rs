//! Wire-level handling of the `Accept-Encoding` field value.
//!
//! - [`Tokenizer`] turns the raw value into a stream of [`Token`]s, recovering from malformed
//!   entries by skipping to the next `,`
//! - [`Quality`] is the fixed-point form of a validated weight token

mod quality;
mod tokenizer;

pub use quality::Quality;
pub use tokenizer::Token;
pub use tokenizer::Tokenizer;
