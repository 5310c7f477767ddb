//! Negotiates each argument as an `Accept-Encoding` value:
//!
//! ```text
//! cargo run --example negotiate -- "gzip;q=0.5, br" "*;q=0" ""
//! ```

use micro_encoding::protocol::ContentCoding;
use micro_encoding::Negotiator;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let negotiator = match Negotiator::builder().case_insensitive(true).build() {
        Ok(negotiator) => negotiator,
        Err(e) => {
            error!(cause = %e, "invalid negotiator configuration");
            return;
        }
    };

    let supported = [ContentCoding::Zstd, ContentCoding::Br, ContentCoding::Gzip, ContentCoding::Deflate, ContentCoding::Identity];

    for accept_encoding in std::env::args().skip(1) {
        match negotiator.select(&accept_encoding, &supported) {
            Ok(coding) => info!(accept_encoding = %accept_encoding, %coding, "selected content coding"),
            Err(e) => info!(accept_encoding = %accept_encoding, cause = %e, "responding 406"),
        }
    }
}
