//! Per-operation deadline races.
//!
//! A raced operation runs on its own worker thread while the caller selects
//! over three outcomes: the worker's value, the worker's error, or the timer.
//!
//! Cancellation: none. On timeout the worker is abandoned and keeps running
//! until its operation returns; the late result is dropped. A timeout means
//! "outcome unknown", and a stream touched by the worker must be treated as
//! contaminated.

use std::thread;
use std::time::Duration;

use crossbeam::channel::{after, bounded};
use crossbeam::select;
use tracing::{debug, error};

use crate::types::PipelineError;

/// Optional time limit applied to each operation individually.
///
/// Every call to [`Deadline::run`] starts a fresh timer; there is no budget
/// shared across the operations of one pipeline call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    limit: Option<Duration>,
}

impl Deadline {
    /// No limit: operations run inline on the caller thread.
    pub const fn none() -> Self {
        Self { limit: None }
    }

    pub const fn after(limit: Duration) -> Self {
        Self { limit: Some(limit) }
    }

    pub fn from_option(limit: Option<Duration>) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn is_enabled(&self) -> bool {
        self.limit.is_some()
    }

    /// Run `op`, racing it against the limit when one is set.
    pub fn run<T, F>(&self, operation: &str, op: F) -> Result<T, PipelineError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, PipelineError> + Send + 'static,
    {
        match self.limit {
            None => op(),
            Some(limit) => race(operation, limit, op),
        }
    }
}

/// Race `op` on a worker thread against a `limit` timer.
pub fn race<T, F>(operation: &str, limit: Duration, op: F) -> Result<T, PipelineError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PipelineError> + Send + 'static,
{
    // Capacity 1: an abandoned worker can still complete its send and exit.
    let (tx, rx) = bounded::<Result<T, PipelineError>>(1);

    // Carry the caller's subscriber into the worker so its logs land in the same place.
    let dispatch = tracing::dispatcher::get_default(|d| d.clone());

    thread::Builder::new()
        .name("onwire-race".into())
        .spawn(move || {
            let result = tracing::dispatcher::with_default(&dispatch, op);
            // Receiver is gone if the race was already lost.
            let _ = tx.send(result);
        })?;

    let timer = after(limit);
    select! {
        recv(rx) -> msg => match msg {
            Ok(Ok(value)) => {
                debug!(operation, "completed before deadline");
                Ok(value)
            }
            Ok(Err(e)) => {
                error!(operation, error = %e, "failed to complete operation");
                Err(e)
            }
            Err(_) => {
                error!(operation, "worker exited without a result");
                Err(PipelineError::WorkerLost { operation: operation.to_string() })
            }
        },
        recv(timer) -> _ => {
            error!(operation, timeout = ?limit, "failed to complete operation before timeout");
            Err(PipelineError::TimedOut { operation: operation.to_string(), after: limit })
        },
    }
}
