//! Injected logging.
//!
//! A pipeline may carry its own `tracing::Dispatch`. Builder, write and read
//! run under it; raced workers pick it up from the caller thread. Without
//! one, whatever subscriber the process installed applies.

use tracing::Dispatch;

/// Run `f` with `dispatch` as the thread's default subscriber, if given.
pub(crate) fn scoped<R>(dispatch: Option<&Dispatch>, f: impl FnOnce() -> R) -> R {
    match dispatch {
        Some(d) => tracing::dispatcher::with_default(d, f),
        None => f(),
    }
}
