//! Helpers at the `http` request/response boundary.

use http::{Request, Response, StatusCode};
use tracing::debug;

use crate::protocol::ACCEPT_ENCODING;

/// Removes every `Accept-Encoding` field from `req`.
///
/// Anything negotiating on the request afterwards only gets identity. Useful when a handler
/// further down the chain must not encode the response again.
pub fn clear_encoding<B>(req: &mut Request<B>) {
    if req.headers_mut().remove(ACCEPT_ENCODING).is_some() {
        debug!("cleared accept-encoding from request");
    }
}

/// Sets the status of `resp` to `406 Not Acceptable`.
pub fn not_acceptable<B>(resp: &mut Response<B>) {
    *resp.status_mut() = StatusCode::NOT_ACCEPTABLE;
}
