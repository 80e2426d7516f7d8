//! Standard output sink

use crate::core::{Result, Sink};
use std::io::Write;

/// Writes rendered records to the process's standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StdoutSink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        std::io::stdout().lock().write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_flush() {
        let mut sink = StdoutSink::new();
        sink.write(b"stdout sink test\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.name(), "stdout");
    }
}
