//! Destinations for serialized frames.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::TransportError;

/// Sends serialized data to a destination.
pub trait Sender {
    /// Writes one message, newline-terminated.
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Flushes any internal buffers. A no-op for unbuffered senders.
    fn flush(&mut self) -> Result<(), TransportError>;
}

/// Sends data to standard output, flushing after every message.
pub struct StdioSender {
    stdout: io::Stdout,
}

impl StdioSender {
    pub fn new() -> Self {
        StdioSender { stdout: io::stdout() }
    }
}

impl Default for StdioSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for StdioSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let mut handle = self.stdout.lock();
        handle.write_all(data)?;
        handle.write_all(b"\n")?;
        handle.flush()?; // Ensure it's written immediately
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.stdout.flush()?;
        Ok(())
    }
}

/// Writes newline-delimited messages to a file through a buffer.
///
/// The file is created or truncated on construction.
pub struct FileSender {
    writer: BufWriter<File>,
}

impl FileSender {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Sender for FileSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(data)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Discards everything. Useful for benchmarking the simulation alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSender;

impl Sender for NullSender {
    fn send(&mut self, _data: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
