//! # In-Memory Transport
//!
//! Collects written bytes in a buffer. Used by tests and by the CLI's
//! dry-run path; it can also be told to fail connecting or writing.

use std::io;

use super::{Transport, TransportError};

/// A transport that records everything written to it.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    buffer: Vec<u8>,
    connected: bool,
    fail_connect: bool,
    fail_write: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose `connect` always fails.
    pub fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Self::default()
        }
    }

    /// A transport that connects but fails every write.
    pub fn failing_writes() -> Self {
        Self {
            fail_write: true,
            ..Self::default()
        }
    }

    /// Everything written so far, across connections.
    pub fn written(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl Transport for MemoryTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        if self.fail_connect {
            return Err(TransportError::Connection("memory transport unreachable".into()));
        }
        self.connected = true;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        if self.fail_write {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "memory transport write failure").into());
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn close(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
