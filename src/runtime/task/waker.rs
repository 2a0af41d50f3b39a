//! Waker used when polling task bodies.
//!
//! Tasks are driven synchronously by `resume`, so wake-ups carry no
//! information: the driver always polls again until the task is done.

use std::sync::Arc;
use std::task::{Wake, Waker};

struct NoopWaker;

impl Wake for NoopWaker {
    fn wake(self: Arc<Self>) {}

    fn wake_by_ref(self: &Arc<Self>) {}
}

/// A waker that ignores every wake-up.
pub(crate) fn noop_waker() -> Waker {
    Waker::from(Arc::new(NoopWaker))
}
