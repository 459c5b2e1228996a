//! Glint Probe
//!
//! Asynchronous image metadata probing for Glint.
//!
//! This crate provides:
//! - `Prober`: submit-and-forget metadata extraction over any
//!   `glint_core::HeaderDecoder`
//! - Cross-thread input-buffer pinning for the task's exact lifetime
//! - Exactly-once completion delivery, as a callback or an awaitable future
//! - Queue-depth introspection via `TaskCounter`
//!
//! Extraction runs on the tokio blocking pool; the pool's size is runtime
//! configuration, not a knob of this crate. Once submitted, a task runs to
//! completion: there is no cancellation and no timeout. Completion order
//! across independent tasks is unspecified.
//!
//! # Example
//!
//! ```rust,no_run
//! use glint_probe::{ProbeRequest, Prober};
//! use std::sync::Arc;
//! # async fn example(engine: Arc<impl glint_core::HeaderDecoder + 'static>) -> glint_core::Result<()> {
//! let prober = Prober::new(engine);
//! let metadata = prober.probe(ProbeRequest::new().path("/photos/cat.jpg")).await?;
//! println!("{}x{} {}", metadata.width, metadata.height, metadata.format);
//! # Ok(())
//! # }
//! ```

mod assemble;
mod counter;
mod input;
mod task;

pub use counter::TaskCounter;
pub use input::ProbeRequest;

use crate::assemble::CallbackDispatcher;
use crate::input::{InputDescriptor, PinnedBufferSet};
use crate::task::{MetadataBaton, MetadataTask};
use glint_core::{GlintError, HeaderDecoder, ImageMetadata, Result};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// Asynchronous metadata prober over a header-only decode engine
pub struct Prober<E: HeaderDecoder + 'static> {
    engine: Arc<E>,
    counter: Arc<TaskCounter>,
}

impl<E: HeaderDecoder + 'static> Prober<E> {
    /// Create a prober with its own task counter
    pub fn new(engine: Arc<E>) -> Self {
        Self::with_counter(engine, Arc::new(TaskCounter::new()))
    }

    /// Create a prober sharing an externally owned task counter
    pub fn with_counter(engine: Arc<E>, counter: Arc<TaskCounter>) -> Self {
        Self { engine, counter }
    }

    /// Tasks submitted but not yet picked up by a worker
    pub fn queued(&self) -> usize {
        self.counter.queued()
    }

    /// Submit a probe, delivering the outcome to `on_complete` exactly once
    ///
    /// Never invokes the callback synchronously: even input-validation
    /// failures travel through the queued task and reach the callback from
    /// a runtime task. Buffer inputs are pinned here and stay valid until
    /// the callback has fired; the bytes are never mutated. The callback
    /// runs on a runtime task, not the submitting thread.
    ///
    /// Must be called within a tokio runtime.
    pub fn submit<F>(&self, request: ProbeRequest, on_complete: F)
    where
        F: FnOnce(Result<ImageMetadata>) + Send + 'static,
    {
        let mut pins = PinnedBufferSet::new();
        let mut baton = MetadataBaton::new();
        let descriptor = match InputDescriptor::from_request(request, &mut pins) {
            Ok(descriptor) => Some(descriptor),
            Err(err) => {
                baton.error = Some(err);
                None
            }
        };
        let mut task = MetadataTask::new(
            self.engine.clone(),
            self.counter.clone(),
            descriptor,
            pins,
            baton,
        );

        // Joining the queue
        self.counter.increment();
        debug!(queued = self.counter.queued(), "metadata task queued");

        let mut dispatcher = CallbackDispatcher::new(on_complete);
        tokio::spawn(async move {
            let joined = tokio::task::spawn_blocking(move || {
                task.execute();
                task
            })
            .await;

            let outcome = match joined {
                Ok(task) => {
                    let MetadataTask {
                        baton,
                        mut pins,
                        descriptor,
                        ..
                    } = task;
                    let outcome = assemble::assemble(baton);
                    // Unpin in original index order, then drop the descriptor,
                    // before the caller learns the outcome
                    pins.release_all();
                    drop(descriptor);
                    outcome
                }
                Err(err) => Err(GlintError::other(format!("metadata task failed: {err}"))),
            };
            dispatcher.dispatch(outcome);
        });
    }

    /// Probe and await the outcome
    ///
    /// One-shot-channel wrapper over [`submit`](Self::submit) for async
    /// callers.
    pub async fn probe(&self, request: ProbeRequest) -> Result<ImageMetadata> {
        let (tx, rx) = oneshot::channel();
        self.submit(request, move |outcome| {
            // Receiver may have gone away; the outcome is simply dropped
            let _ = tx.send(outcome);
        });
        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(GlintError::other("metadata task dropped without completing")),
        }
    }
}

impl<E: HeaderDecoder + 'static> Clone for Prober<E> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            counter: self.counter.clone(),
        }
    }
}
