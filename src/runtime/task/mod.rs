//! Eagerly started, suspendable tasks producing an [`Expected`].
//!
//! A task body is an async block that receives a [`Cx`] and returns an
//! [`Outcome`]. The body starts running the moment the task is created and
//! runs until it completes or awaits a dependency that is not finished yet.
//! Awaiting a failed dependency finishes the awaiting task with the same
//! error and trace; the rest of its body never runs.
//!
//! A [`Cx`] belongs to the task it was handed to. Awaiting through it while
//! some other task is being polled, e.g. after moving it into a helper task,
//! is a contract violation and panics.
//!
//! Only awaits on other tasks are suspension points. Awaiting any other
//! future that returns `Pending` leaves the task [`TaskState::Suspended`]
//! and `run` polls it again in a loop; the optional
//! [`RunConfig::resume_limit`] is the only guard against such a body never
//! finishing.
//!
//! ```rust
//! use expected::{Outcome, Task};
//!
//! fn parse(text: &'static str) -> Task<i32, String> {
//!     Task::new(move |_cx| async move {
//!         match text.parse::<i32>() {
//!             Ok(n) => Outcome::Ok(n),
//!             Err(e) => Outcome::Err(e.to_string()),
//!         }
//!     })
//! }
//!
//! let doubled = Task::new(|cx| async move {
//!     let n = cx.wait(parse("21")).await;
//!     Outcome::Ok(n * 2)
//! });
//! assert_eq!(doubled.run().value(), Some(&42));
//! ```

mod waker;
pub mod wait;

#[cfg(test)]
mod tests;

pub use wait::{Cx, Wait};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use tracing::{debug, trace, warn};

use crate::result::{Expected, Outcome};
use crate::util::config::RunConfig;
use crate::util::error::RunError;
use crate::util::trace::capture_trace;
use wait::PropagationSlot;

/// Unique task identifier.
///
/// `TaskId(0)` is reserved for empty tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TaskId(pub usize);

impl TaskId {
    /// Get the inner value.
    #[inline]
    pub fn inner(&self) -> usize {
        self.0
    }

    fn next() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
        TaskId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

thread_local! {
    static POLLING: Cell<TaskId> = const { Cell::new(TaskId(0)) };
}

/// ID of the task whose body is being polled on this thread, `TaskId(0)`
/// outside any poll.
pub(crate) fn polling_task() -> TaskId {
    POLLING.with(Cell::get)
}

/// Marks a task as the one being polled and restores the previous one on
/// drop, including during unwinding.
struct PollGuard {
    previous: TaskId,
}

impl PollGuard {
    fn enter(task: TaskId) -> Self {
        Self {
            previous: POLLING.with(|cell| cell.replace(task)),
        }
    }
}

impl Drop for PollGuard {
    fn drop(&mut self) {
        POLLING.with(|cell| cell.set(self.previous));
    }
}

impl From<usize> for TaskId {
    fn from(val: usize) -> Self {
        Self(val)
    }
}

impl From<TaskId> for usize {
    fn from(val: TaskId) -> Self {
        val.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Task state as seen from outside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// No computation: default-constructed, moved from, or already consumed.
    Empty,
    /// Waiting on a dependency that has not finished.
    ///
    /// A body awaiting a future that is not a task also reports this state
    /// while that future is pending; such awaits are outside the suspension
    /// contract and are only bounded by [`RunConfig::resume_limit`].
    Suspended,
    /// Completed with a value.
    Succeeded,
    /// Completed with an error, directly or by propagation.
    Failed,
}

impl TaskState {
    /// Whether the task reached a terminal state.
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

type Body<V, E> = Pin<Box<dyn Future<Output = Outcome<V, E>>>>;

/// A suspendable computation producing an [`Expected<V, E>`].
///
/// Move-only: the in-progress computation has a single owner. Dropping a
/// task releases its computation whether or not it finished.
pub struct Task<V, E> {
    id: TaskId,
    name: String,
    body: Option<Body<V, E>>,
    slot: PropagationSlot<E>,
    result: Expected<V, E>,
    capture_traces: bool,
    resume_limit: Option<usize>,
    resumes: usize,
}

impl<V, E> fmt::Debug for Task<V, E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state())
            .field("resumes", &self.resumes)
            .finish()
    }
}

impl<V, E> Default for Task<V, E> {
    fn default() -> Self {
        Self {
            id: TaskId::default(),
            name: String::new(),
            body: None,
            slot: Rc::new(RefCell::new(None)),
            result: Expected::new(),
            capture_traces: true,
            resume_limit: None,
            resumes: 0,
        }
    }
}

impl<V: 'static, E: 'static> Task<V, E> {
    /// Create a task with the default configuration and start its body.
    pub fn new<F, Fut>(body: F) -> Self
    where
        F: FnOnce(Cx<E>) -> Fut,
        Fut: Future<Output = Outcome<V, E>> + 'static,
    {
        TaskBuilder::new().spawn(body)
    }

    /// A task that has already finished with `outcome`.
    pub fn ready(outcome: Outcome<V, E>) -> Self {
        Self::new(move |_cx| async move { outcome })
    }

    /// A task that has already succeeded with `value`.
    pub fn succeed(value: V) -> Self {
        Self::ready(Outcome::Ok(value))
    }

    /// A task that has already failed with `error`.
    pub fn fail(error: E) -> Self {
        Self::ready(Outcome::Err(error))
    }
}

impl<V, E> Task<V, E> {
    /// Get the task ID.
    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Get the task name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of times the body has been polled.
    #[inline]
    pub fn resume_count(&self) -> usize {
        self.resumes
    }

    /// Get the current state.
    pub fn state(&self) -> TaskState {
        if self.body.is_some() {
            TaskState::Suspended
        } else if self.result.succeeded() {
            TaskState::Succeeded
        } else if self.result.failed() {
            TaskState::Failed
        } else {
            TaskState::Empty
        }
    }

    /// Whether the task reached a terminal state.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.state().is_done()
    }

    /// The result recorded so far; empty while suspended.
    #[inline]
    pub fn result(&self) -> &Expected<V, E> {
        &self.result
    }

    /// Poll the body once and return the resulting state.
    ///
    /// Does nothing on a task that is done or empty.
    pub fn resume(&mut self) -> TaskState {
        let Some(body) = self.body.as_mut() else {
            return self.state();
        };

        self.resumes += 1;
        let waker = waker::noop_waker();
        let mut cx = Context::from_waker(&waker);

        let polled = {
            let _guard = PollGuard::enter(self.id);
            body.as_mut().poll(&mut cx)
        };

        match polled {
            Poll::Ready(outcome) => {
                self.body = None;
                if self.slot.borrow().is_some() {
                    panic!(
                        "{} ({}) completed while holding an adopted dependency error",
                        self.id, self.name
                    );
                }
                self.complete(outcome);
            }
            Poll::Pending => {
                let adopted = self.slot.borrow_mut().take();
                if let Some((error, trace)) = adopted {
                    self.body = None;
                    self.result.set_error(error);
                    self.result.set_trace(trace);
                    debug!(task = %self.id, name = %self.name, "task failed by propagation");
                }
            }
        }

        self.state()
    }

    /// Drive the task until it finishes and return its result.
    ///
    /// Resumes back to back with no waiting: a body pending on something
    /// other than a task is polled again immediately, bounded only by
    /// [`RunConfig::resume_limit`].
    ///
    /// # Panics
    ///
    /// Panics on an empty task or when the configured resume limit is hit;
    /// see [`Task::try_run`] for the non-panicking form.
    pub fn run(self) -> Expected<V, E> {
        match self.try_run() {
            Ok(result) => result,
            Err(err) => panic!("{}", err),
        }
    }

    /// Drive the task until it finishes and return its result, reporting
    /// driver contract violations instead of panicking.
    pub fn try_run(mut self) -> Result<Expected<V, E>, RunError> {
        if self.state() == TaskState::Empty {
            return Err(RunError::EmptyTask);
        }

        let mut resumes = 0;
        while !self.is_done() && !self.result.failed() {
            if let Some(limit) = self.resume_limit {
                if resumes >= limit {
                    warn!(task = %self.id, name = %self.name, limit, "resume limit reached");
                    return Err(RunError::ResumeLimitExceeded {
                        task: self.id,
                        name: self.name,
                        limit,
                    });
                }
            }
            self.resume();
            resumes += 1;
        }

        Ok(self.result)
    }

    fn complete(
        &mut self,
        outcome: Outcome<V, E>,
    ) {
        match outcome {
            Outcome::Ok(value) => {
                self.result.set_value(value);
                debug!(task = %self.id, name = %self.name, "task succeeded");
            }
            Outcome::Err(error) => {
                self.result.set_error(error);
                if self.capture_traces {
                    self.result.set_trace(capture_trace());
                }
                debug!(task = %self.id, name = %self.name, "task failed");
            }
            Outcome::Traced { error, trace } => {
                self.result.set_error(error);
                self.result.set_trace(trace);
                debug!(task = %self.id, name = %self.name, "task failed with explicit trace");
            }
        }
    }
}

/// Task builder for constructing tasks with a name and configuration.
#[derive(Debug, Default)]
pub struct TaskBuilder {
    name: Option<String>,
    config: RunConfig,
}

impl TaskBuilder {
    /// Create a new task builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the task name.
    #[inline]
    pub fn name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Use the given configuration.
    #[inline]
    pub fn config(
        mut self,
        config: RunConfig,
    ) -> Self {
        self.config = config;
        self
    }

    /// Create the task and run its body up to the first suspension point.
    pub fn spawn<V, E, F, Fut>(
        self,
        body: F,
    ) -> Task<V, E>
    where
        V: 'static,
        E: 'static,
        F: FnOnce(Cx<E>) -> Fut,
        Fut: Future<Output = Outcome<V, E>> + 'static,
    {
        let id = TaskId::next();
        let slot: PropagationSlot<E> = Rc::new(RefCell::new(None));
        let future = body(Cx::new(id, Rc::clone(&slot)));

        let mut task = Task {
            id,
            name: self.name.unwrap_or(self.config.default_task_name),
            body: Some(Box::pin(future)),
            slot,
            result: Expected::new(),
            capture_traces: self.config.capture_traces,
            resume_limit: self.config.resume_limit,
            resumes: 0,
        };
        trace!(task = %task.id, name = %task.name, "task created");

        task.resume();
        task
    }
}
