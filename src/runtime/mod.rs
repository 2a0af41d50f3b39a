//! Task runtime
//!
//! Single-threaded, cooperative execution of task dependency chains. There is
//! no scheduler: a task runs on the caller's stack when it is created or
//! resumed, and awaiting a dependency drives that dependency depth-first.

pub mod task;

pub use task::{Cx, Task, TaskBuilder, TaskId, TaskState, Wait};
