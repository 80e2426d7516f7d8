//! Double-buffered asynchronous delivery engine
//!
//! Producer threads append rendered records into a shared *production*
//! buffer under a single mutex. One dedicated consumer thread waits for data,
//! swaps the production buffer with its private *consumption* buffer while
//! holding the lock, and then hands the filled buffer to a drain callback
//! with the lock released. The critical section is O(1) regardless of how
//! many bytes are pending.
//!
//! Two condition variables coordinate the threads:
//! - `data_available` wakes the consumer when bytes arrive or stop is requested
//! - `space_available` wakes producers blocked under [`OverflowPolicy::Safe`]

use super::buffer::{Buffer, DEFAULT_BUFFER_SIZE};
use super::error::{LoggerError, Result};
use super::metrics::LoggerMetrics;
use super::overflow_policy::OverflowPolicy;
use parking_lot::{Condvar, Mutex};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

/// Callback invoked on the consumer thread with each drained buffer
pub type DrainCallback = Box<dyn FnMut(&Buffer) + Send + 'static>;

struct State {
    production: Buffer,
    stop: bool,
}

impl State {
    /// A push of `len` bytes may proceed without growing past the bound.
    ///
    /// An empty buffer always accepts, so a record larger than the whole
    /// capacity grows it once instead of waiting forever.
    fn has_room(&self, len: usize) -> bool {
        self.production.writable_size() >= len || self.production.is_empty()
    }
}

struct Shared {
    state: Mutex<State>,
    data_available: Condvar,
    space_available: Condvar,
    policy: OverflowPolicy,
    metrics: Arc<LoggerMetrics>,
}

/// Background consumer that drains pushed bytes into a callback
///
/// # Example
///
/// ```
/// use bufferlog::core::{AsyncEngine, OverflowPolicy};
/// use std::sync::{Arc, Mutex};
///
/// let drained = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&drained);
/// let engine = AsyncEngine::new(
///     Box::new(move |buffer| sink.lock().unwrap().extend_from_slice(buffer.readable_slice())),
///     OverflowPolicy::Safe,
/// );
///
/// engine.push(b"hello ").unwrap();
/// engine.push(b"world").unwrap();
/// engine.stop();
///
/// assert_eq!(&*drained.lock().unwrap(), b"hello world");
/// ```
pub struct AsyncEngine {
    shared: Arc<Shared>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl AsyncEngine {
    /// Start an engine whose buffers hold [`DEFAULT_BUFFER_SIZE`] bytes
    pub fn new(drain: DrainCallback, policy: OverflowPolicy) -> Self {
        Self::with_capacity(drain, policy, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(drain: DrainCallback, policy: OverflowPolicy, capacity: usize) -> Self {
        Self::with_metrics(drain, policy, capacity, Arc::new(LoggerMetrics::new()))
    }

    /// Start an engine that records swaps, blocks and pushed bytes into `metrics`
    pub fn with_metrics(
        drain: DrainCallback,
        policy: OverflowPolicy,
        capacity: usize,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                production: Buffer::with_capacity(capacity),
                stop: false,
            }),
            data_available: Condvar::new(),
            space_available: Condvar::new(),
            policy,
            metrics,
        });

        let worker_shared = Arc::clone(&shared);
        let consumption = Buffer::with_capacity(capacity);
        let handle = thread::Builder::new()
            .name("bufferlog-consumer".to_string())
            .spawn(move || Self::consume(&worker_shared, consumption, drain));

        let worker = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                // Without a consumer nothing would ever drain; refuse pushes.
                eprintln!("[LOGGER CRITICAL] Failed to spawn async consumer thread: {}", e);
                shared.state.lock().stop = true;
                None
            }
        };

        Self {
            shared,
            worker: Mutex::new(worker),
        }
    }

    /// Append `bytes` to the production buffer
    ///
    /// Under [`OverflowPolicy::Safe`] this blocks while the buffer lacks room
    /// for `bytes`. Under [`OverflowPolicy::Unsafe`] it never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::LoggerStopped`] once [`stop`](Self::stop) has
    /// been requested.
    pub fn push(&self, bytes: &[u8]) -> Result<()> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();

        if shared.policy.blocks_producers() && !state.stop && !state.has_room(bytes.len()) {
            shared.metrics.record_block();
            shared
                .space_available
                .wait_while(&mut state, |s| !s.stop && !s.has_room(bytes.len()));
        }

        if state.stop {
            return Err(LoggerError::LoggerStopped);
        }

        state.production.push(bytes);
        shared.metrics.record_bytes_pushed(bytes.len());
        shared.data_available.notify_one();
        Ok(())
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.shared.policy
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    /// Whether the consumer thread is still running
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Request shutdown and wait for the consumer to drain everything
    /// pushed so far
    ///
    /// Calling this again after the consumer has exited is a no-op.
    pub fn stop(&self) {
        {
            let mut state = self.shared.state.lock();
            state.stop = true;
            self.shared.data_available.notify_all();
            // Producers parked on a full buffer must observe the stop too.
            self.shared.space_available.notify_all();
        }

        if let Some(handle) = self.worker.lock().take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Async consumer thread panicked during shutdown: {:?}", e);
            }
        }
    }

    fn consume(shared: &Shared, mut consumption: Buffer, mut drain: DrainCallback) {
        loop {
            {
                let mut state = shared.state.lock();
                // Checked before waiting so that a stop never discards
                // bytes that were pushed ahead of it.
                if state.stop && state.production.is_empty() {
                    break;
                }
                shared
                    .data_available
                    .wait_while(&mut state, |s| !s.stop && s.production.is_empty());

                consumption.swap(&mut state.production);
                shared.metrics.record_swap();
                if shared.policy.blocks_producers() {
                    shared.space_available.notify_all();
                }
            }

            if !consumption.is_empty() {
                // A panicking callback loses this buffer but must not take
                // the consumer down with it, or Safe producers wait forever.
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| drain(&consumption)));
                if let Err(panic_info) = outcome {
                    shared.metrics.record_write_failure();
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Drain callback panicked: {}. \
                         Dropped {} bytes; the consumer keeps running.",
                        panic_msg,
                        consumption.readable_size()
                    );
                }
            }
            consumption.reset();
        }
    }
}

impl Drop for AsyncEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
