//! Sink trait for log output destinations

use super::error::Result;

/// A destination for rendered log text.
///
/// A sink is only ever driven by one thread at a time: the calling thread
/// (serialized by a sync logger) or the consumer thread of an async logger.
/// Implementations therefore need `Send` but no internal locking.
pub trait Sink: Send {
    /// Write already rendered bytes
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Push any buffered bytes to the underlying target
    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
