//! Awaiting one task from inside another.
//!
//! [`Cx::wait`] hands control to a dependency. When the dependency fails,
//! its error and trace are moved into the awaiting task's propagation slot
//! and the returned future never resolves, so no statement after the await
//! runs. The owning task notices the slot after the poll and finishes with
//! that error.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tracing::debug;

use super::{polling_task, Task, TaskId, TaskState};

/// Error and trace adopted from a failed dependency.
pub(crate) type PropagationSlot<E> = Rc<RefCell<Option<(E, String)>>>;

/// Await context handed to a task body.
///
/// Only tasks sharing the body's error type `E` can be awaited.
pub struct Cx<E> {
    task: TaskId,
    slot: PropagationSlot<E>,
}

impl<E> Cx<E> {
    pub(crate) fn new(
        task: TaskId,
        slot: PropagationSlot<E>,
    ) -> Self {
        Self { task, slot }
    }

    /// ID of the task owning this context.
    #[inline]
    pub fn task_id(&self) -> TaskId {
        self.task
    }

    /// Await `dependency`, resolving to its success value.
    ///
    /// If the dependency fails, the awaiting task adopts its error and trace
    /// and its body is not resumed again.
    ///
    /// # Panics
    ///
    /// The returned future panics when polled while another task is being
    /// polled, e.g. after this context was moved into a helper task.
    pub fn wait<V>(
        &self,
        dependency: Task<V, E>,
    ) -> Wait<V, E> {
        Wait {
            dependency,
            slot: Rc::clone(&self.slot),
            awaiting: self.task,
            adopted: false,
        }
    }
}

impl<E> Clone for Cx<E> {
    fn clone(&self) -> Self {
        Self {
            task: self.task,
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<E> fmt::Debug for Cx<E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Cx").field("task", &self.task).finish()
    }
}

/// Future returned by [`Cx::wait`].
#[must_use = "a dependency only runs when its Wait is awaited"]
pub struct Wait<V, E> {
    dependency: Task<V, E>,
    slot: PropagationSlot<E>,
    awaiting: TaskId,
    adopted: bool,
}

// The dependency's body is boxed; nothing here is structurally pinned.
impl<V, E> Unpin for Wait<V, E> {}

impl<V, E> Future for Wait<V, E> {
    type Output = V;

    fn poll(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<V> {
        let this = self.get_mut();
        let polling = polling_task();
        if polling != this.awaiting {
            panic!(
                "{} awaited through the context of {}",
                polling, this.awaiting
            );
        }
        if this.adopted {
            return Poll::Pending;
        }

        match this.dependency.resume() {
            TaskState::Suspended => Poll::Pending,
            TaskState::Succeeded => match this.dependency.result.take_value() {
                Some(value) => Poll::Ready(value),
                None => panic!("{} succeeded without a value", this.dependency.id),
            },
            TaskState::Failed => {
                let Some((error, trace)) = this.dependency.result.take_error() else {
                    panic!("{} failed without an error", this.dependency.id);
                };
                debug!(
                    task = %this.awaiting,
                    dependency = %this.dependency.id,
                    "dependency failed, propagating"
                );
                *this.slot.borrow_mut() = Some((error, trace));
                this.adopted = true;
                Poll::Pending
            }
            TaskState::Empty => panic!("{} awaited an empty task", this.awaiting),
        }
    }
}

impl<V, E> fmt::Debug for Wait<V, E> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Wait")
            .field("awaiting", &self.awaiting)
            .field("dependency", &self.dependency.id)
            .field("adopted", &self.adopted)
            .finish()
    }
}
