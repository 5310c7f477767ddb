//! Handing resolved candidates to the caller.
//!
//! A [`Handler`] is offered each acceptable candidate in preference order until it reports that
//! it has produced a response.

use tracing::trace;

use crate::protocol::{Coding, Preferences};

/// Reacts to a negotiated candidate.
///
/// `handle` returns `true` when no further candidates are needed, usually because the response
/// has been written in (or on behalf of) that coding, and `false` to be offered the next one.
#[cfg_attr(test, mockall::automock)]
pub trait Handler {
    fn handle(&mut self, coding: &Coding) -> bool;
}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn handle(&mut self, coding: &Coding) -> bool {
        (**self).handle(coding)
    }
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> Handler for HandlerFn<F>
where
    F: FnMut(&Coding) -> bool,
{
    fn handle(&mut self, coding: &Coding) -> bool {
        (self.f)(coding)
    }
}

/// Wraps a closure into a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: FnMut(&Coding) -> bool,
{
    HandlerFn { f }
}

/// Offers every candidate with a non-zero quality to `handler`, in order.
///
/// Returns `true` as soon as the handler does, `false` when the list is exhausted.
pub fn dispatch<H: Handler + ?Sized>(preferences: &Preferences, handler: &mut H) -> bool {
    for coding in preferences.acceptable() {
        trace!(coding = %coding, "offering content coding");
        if handler.handle(coding) {
            return true;
        }
    }

    trace!("no content coding was accepted by the handler");
    false
}

impl Preferences {
    /// See [`dispatch`].
    pub fn dispatch<H: Handler + ?Sized>(&self, handler: &mut H) -> bool {
        dispatch(self, handler)
    }
}
