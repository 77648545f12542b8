//! Sleep abstraction for timeouts and retry backoff.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Source of delays. Browser builds use `gloo-timers`; tests substitute a
/// recording fake so backoff can be asserted without waiting.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// `setTimeout`-backed timer.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

#[cfg(feature = "csr")]
impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}
