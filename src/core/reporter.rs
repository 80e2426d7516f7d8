//! Side channel for sink failures
//!
//! A log call never returns a sink error to its caller. Failures are printed
//! to stderr and published on a bounded channel that applications may drain
//! through [`Logger::failures`](crate::Logger::failures).

use super::error::LoggerError;
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::Arc;

/// Number of undelivered failure reports kept before new ones are dropped
pub const FAILURE_CHANNEL_CAPACITY: usize = 1024;

/// One failed sink operation
#[derive(Debug)]
pub struct SinkFailure {
    pub logger: String,
    pub sink: String,
    pub error: LoggerError,
}

#[derive(Clone)]
pub(crate) struct FailureReporter {
    logger: Arc<str>,
    sender: Sender<SinkFailure>,
    receiver: Receiver<SinkFailure>,
    metrics: Arc<LoggerMetrics>,
}

impl FailureReporter {
    pub(crate) fn new(logger: &str, metrics: Arc<LoggerMetrics>) -> Self {
        let (sender, receiver) = bounded(FAILURE_CHANNEL_CAPACITY);
        Self {
            logger: Arc::from(logger),
            sender,
            receiver,
            metrics,
        }
    }

    pub(crate) fn receiver(&self) -> Receiver<SinkFailure> {
        self.receiver.clone()
    }

    pub(crate) fn report(&self, sink: &str, error: LoggerError) {
        self.metrics.record_write_failure();
        eprintln!(
            "[LOGGER ERROR] Logger '{}' sink '{}' failed: {}",
            self.logger, sink, error
        );

        let failure = SinkFailure {
            logger: self.logger.to_string(),
            sink: sink.to_string(),
            error,
        };
        match self.sender.try_send(failure) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                let dropped = self.metrics.record_dropped_report();
                // Alert on first drop and periodically thereafter
                if dropped == 0 || (dropped + 1) % 1000 == 0 {
                    eprintln!(
                        "[LOGGER WARNING] Failure channel full, {} reports dropped. \
                         Drain Logger::failures() to keep receiving them.",
                        dropped + 1
                    );
                }
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}
