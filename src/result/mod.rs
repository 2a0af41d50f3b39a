//! Value-or-error container produced by every task.
//!
//! An [`Expected`] starts empty, is filled exactly once by the owning task's
//! completion logic, and is read-only afterwards.

pub mod outcome;


pub use outcome::{ErrorTag, ErrorWrapper, Outcome, VoidTag, EERROR, EVOID};

use std::fmt;

/// Internal storage: empty until the producing task completes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<V, E> {
    Empty,
    Value(V),
    Error(E),
}

impl<V, E> Default for Slot<V, E> {
    fn default() -> Self {
        Slot::Empty
    }
}

/// Holds exactly one of a success value or an error, plus the diagnostic
/// trace recorded when the error was created.
///
/// For tasks without a success payload use `V = ()`: [`Expected::value`]
/// then yields `Some(&())` on success and [`Expected::succeeded`] is the
/// boolean flag.
#[derive(Clone, PartialEq, Eq)]
pub struct Expected<V, E> {
    slot: Slot<V, E>,
    trace: String,
}

impl<V, E> Default for Expected<V, E> {
    fn default() -> Self {
        Self {
            slot: Slot::Empty,
            trace: String::new(),
        }
    }
}

impl<V, E> Expected<V, E> {
    /// Create an empty container.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container already holding a value.
    pub fn from_value(value: V) -> Self {
        let mut expected = Self::new();
        expected.set_value(value);
        expected
    }

    /// Create a container already holding an error with the given trace.
    pub fn from_error(
        error: E,
        trace: impl Into<String>,
    ) -> Self {
        let mut expected = Self::new();
        expected.set_error(error);
        expected.set_trace(trace);
        expected
    }

    /// Record the success value.
    ///
    /// # Panics
    ///
    /// Panics if the container already holds a value or an error.
    pub fn set_value(
        &mut self,
        value: V,
    ) {
        assert!(self.is_empty(), "set_value on a completed Expected");
        self.slot = Slot::Value(value);
        self.trace.clear();
    }

    /// Record the error. The trace is attached separately with
    /// [`Expected::set_trace`].
    ///
    /// # Panics
    ///
    /// Panics if the container already holds a value or an error.
    pub fn set_error(
        &mut self,
        error: E,
    ) {
        assert!(self.is_empty(), "set_error on a completed Expected");
        self.slot = Slot::Error(error);
    }

    /// Attach or overwrite the diagnostic trace.
    pub fn set_trace(
        &mut self,
        trace: impl Into<String>,
    ) {
        self.trace = trace.into();
    }

    /// The success value, if any.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        match &self.slot {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The error, if any.
    #[inline]
    pub fn error(&self) -> Option<&E> {
        match &self.slot {
            Slot::Error(error) => Some(error),
            _ => None,
        }
    }

    /// The diagnostic trace. Empty unless an error was recorded.
    #[inline]
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// Whether a success value was recorded.
    #[inline]
    pub fn succeeded(&self) -> bool {
        matches!(self.slot, Slot::Value(_))
    }

    /// Whether an error was recorded.
    #[inline]
    pub fn failed(&self) -> bool {
        matches!(self.slot, Slot::Error(_))
    }

    /// Whether nothing was recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.slot, Slot::Empty)
    }

    /// Move the success value out, leaving the container empty.
    pub(crate) fn take_value(&mut self) -> Option<V> {
        match std::mem::take(&mut self.slot) {
            Slot::Value(value) => Some(value),
            other => {
                self.slot = other;
                None
            }
        }
    }

    /// Move the error and its trace out, leaving the container empty.
    pub(crate) fn take_error(&mut self) -> Option<(E, String)> {
        match std::mem::take(&mut self.slot) {
            Slot::Error(error) => Some((error, std::mem::take(&mut self.trace))),
            other => {
                self.slot = other;
                None
            }
        }
    }

    /// Convert into a standard `Result`, dropping the trace.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn into_result(self) -> Option<Result<V, E>> {
        match self.slot {
            Slot::Value(value) => Some(Ok(value)),
            Slot::Error(error) => Some(Err(error)),
            Slot::Empty => None,
        }
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for Expected<V, E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut s = f.debug_struct("Expected");
        match &self.slot {
            Slot::Empty => s.field("state", &"empty"),
            Slot::Value(value) => s.field("value", value),
            Slot::Error(error) => s.field("error", error),
        };
        if !self.trace.is_empty() {
            s.field("trace_len", &self.trace.len());
        }
        s.finish()
    }
}
