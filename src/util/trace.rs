//! Diagnostic trace capture.
//!
//! Tasks call [`capture_trace`] once when a body completes with an error
//! that carries no explicit trace. The text is opaque to the rest of the
//! crate.

use std::backtrace::Backtrace;
use std::cell::Cell;

/// Signature of a replacement capture routine.
pub type TraceHook = fn() -> String;

thread_local! {
    static TRACE_HOOK: Cell<Option<TraceHook>> = const { Cell::new(None) };
}

/// Render the current call stack, or run the installed hook.
pub fn capture_trace() -> String {
    match TRACE_HOOK.with(Cell::get) {
        Some(hook) => hook(),
        None => Backtrace::force_capture().to_string(),
    }
}

/// Replace the capture routine on the current thread.
///
/// Returns the previously installed hook.
pub fn set_trace_hook(hook: TraceHook) -> Option<TraceHook> {
    TRACE_HOOK.with(|cell| cell.replace(Some(hook)))
}

/// Restore the default capture routine on the current thread.
pub fn reset_trace_hook() {
    TRACE_HOOK.with(|cell| cell.set(None));
}
