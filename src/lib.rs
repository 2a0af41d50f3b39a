//! Expected
//!
//! Value-or-error results and eagerly started tasks that short-circuit when
//! an awaited dependency fails.
//!
//! # Example
//!
//! ```rust
//! use expected::{Outcome, Task, EERROR};
//!
//! fn checked(value: i32) -> Task<i32, i32> {
//!     Task::new(move |_cx| async move {
//!         if value > 0 {
//!             Outcome::Ok(value)
//!         } else {
//!             (EERROR | -value).into()
//!         }
//!     })
//! }
//!
//! assert_eq!(checked(100).run().value(), Some(&100));
//! assert_eq!(checked(-100).run().error(), Some(&100));
//! ```

#![doc(html_root_url = "https://docs.rs/expected")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod result;
pub mod runtime;

// Utility modules
pub mod util;

// Re-exports
pub use result::{ErrorTag, ErrorWrapper, Expected, Outcome, VoidTag, EERROR, EVOID};
pub use runtime::{Cx, Task, TaskBuilder, TaskId, TaskState, Wait};
pub use util::config::{ConfigError, RunConfig};
pub use util::error::RunError;
pub use util::trace::capture_trace;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
