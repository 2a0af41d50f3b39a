//! Completion values a task body returns, and the tags that pick a channel.

use std::ops::BitOr;

/// How a task body finished.
///
/// `Err` gets a trace captured by the task at completion time; `Traced`
/// carries a caller-supplied trace and skips capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V, E> {
    /// Success with a value.
    Ok(V),
    /// Failure; the trace is captured on completion.
    Err(E),
    /// Failure with an explicit trace.
    Traced {
        /// The error payload.
        error: E,
        /// Diagnostic text recorded verbatim.
        trace: String,
    },
}

impl<V, E> Outcome<V, E> {
    /// Whether this is the success branch.
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// Whether this is either error branch.
    #[inline]
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V, E> {
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(error) => Outcome::Err(error),
        }
    }
}

impl<V, E> From<ErrorWrapper<E>> for Outcome<V, E> {
    fn from(wrapper: ErrorWrapper<E>) -> Self {
        match wrapper.trace {
            Some(trace) => Outcome::Traced {
                error: wrapper.error,
                trace,
            },
            None => Outcome::Err(wrapper.error),
        }
    }
}

impl<E> From<VoidTag> for Outcome<(), E> {
    fn from(_: VoidTag) -> Self {
        Outcome::Ok(())
    }
}

/// Marker for successful completion without a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoidTag;

/// The [`VoidTag`] value.
pub const EVOID: VoidTag = VoidTag;

/// Marker that routes a payload to the error channel.
///
/// Needed when the success and error types coincide, e.g. a
/// `Task<i32, i32>` body returning `EERROR.bind(code).into()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorTag;

/// The [`ErrorTag`] value.
pub const EERROR: ErrorTag = ErrorTag;

impl ErrorTag {
    /// Bind an error payload to the tag.
    #[inline]
    pub fn bind<E>(
        self,
        error: E,
    ) -> ErrorWrapper<E> {
        ErrorWrapper::new(error)
    }
}

impl<E> BitOr<E> for ErrorTag {
    type Output = ErrorWrapper<E>;

    fn bitor(
        self,
        error: E,
    ) -> ErrorWrapper<E> {
        self.bind(error)
    }
}

/// An error payload explicitly marked as belonging to the error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorWrapper<E> {
    error: E,
    trace: Option<String>,
}

impl<E> ErrorWrapper<E> {
    /// Wrap an error payload.
    #[inline]
    pub fn new(error: E) -> Self {
        Self { error, trace: None }
    }

    /// Attach an explicit trace, suppressing capture on completion.
    pub fn with_trace(
        mut self,
        trace: impl Into<String>,
    ) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// The wrapped payload.
    #[inline]
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Unwrap the payload.
    #[inline]
    pub fn into_inner(self) -> E {
        self.error
    }
}
