//! Minimum-display delay on the browser event loop.

use std::future::Future;
use std::time::Duration;

use catscan_core::Timer;

/// [`Timer`] backed by `setTimeout` through `gloo-timers`.
///
/// Yields to the browser, so the page keeps painting (and the
/// processing overlay keeps animating) while it waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }
}
