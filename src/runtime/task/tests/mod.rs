//! Task 单元测试
//!
//! Shared helpers for the task test modules.


use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::util::trace::set_trace_hook;

thread_local! {
    static CAPTURES: Cell<usize> = const { Cell::new(0) };
}

fn counting_hook() -> String {
    CAPTURES.with(|c| c.set(c.get() + 1));
    "captured-trace".to_string()
}

/// Install a counting trace hook on this thread and reset the counter.
pub(super) fn count_captures() {
    crate::util::logger::init_test();
    CAPTURES.with(|c| c.set(0));
    set_trace_hook(counting_hook);
}

pub(super) fn captures() -> usize {
    CAPTURES.with(Cell::get)
}

/// Pends `remaining` times, then completes.
pub(super) struct YieldTimes {
    remaining: usize,
}

pub(super) fn yield_times(remaining: usize) -> YieldTimes {
    YieldTimes { remaining }
}

impl Future for YieldTimes {
    type Output = ();

    fn poll(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<()> {
        if self.remaining == 0 {
            Poll::Ready(())
        } else {
            self.remaining -= 1;
            Poll::Pending
        }
    }
}

/// Increments a shared counter when dropped.
pub(super) struct DropSentinel(pub Rc<Cell<usize>>);

impl Drop for DropSentinel {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
