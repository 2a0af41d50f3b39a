//! Driver errors.
//!
//! These are contract violations of the driving code, never domain errors;
//! domain errors travel through a task's own error type.

use thiserror::Error;

use crate::runtime::task::TaskId;

/// Why a task could not be driven to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The task holds no computation (default-constructed or moved from).
    #[error("cannot run an empty task")]
    EmptyTask,
    /// The task was still suspended after the configured number of resumes.
    #[error("{task} ({name}) still suspended after {limit} resumes")]
    ResumeLimitExceeded {
        task: TaskId,
        name: String,
        limit: usize,
    },
}
