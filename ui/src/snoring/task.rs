//! Frame-driven sampling task with deterministic cancellation.

use std::future::Future;
use std::ops::ControlFlow;

use futures::future::{AbortHandle, Abortable};
use futures_util::FutureExt;

/// Owning handle for a running sampling loop. Dropping it cancels the loop.
#[derive(Debug)]
pub struct SamplingHandle {
    abort: AbortHandle,
}

impl SamplingHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for SamplingHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Build a loop that waits for `next_frame`, then calls `tick`, until `tick`
/// breaks or the returned handle is cancelled or dropped.
///
/// The future must be spawned by the caller.
pub fn sampling_loop<N, F, T>(
    mut next_frame: N,
    mut tick: T,
) -> (SamplingHandle, impl Future<Output = ()>)
where
    N: FnMut() -> F,
    F: Future<Output = ()>,
    T: FnMut() -> ControlFlow<()>,
{
    let (abort, registration) = AbortHandle::new_pair();
    let body = async move {
        loop {
            next_frame().await;
            if tick().is_break() {
                break;
            }
        }
    };
    let task = Abortable::new(body, registration).map(|_| ());
    (SamplingHandle { abort }, task)
}
