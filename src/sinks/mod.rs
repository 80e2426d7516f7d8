//! Sink implementations

pub mod file;
pub mod rolling_file;
pub mod stdout;

pub use file::FileSink;
pub use rolling_file::RollingFileSink;
pub use stdout::StdoutSink;

pub use crate::core::Sink;
