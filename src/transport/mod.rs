//! # Printer Transport Layer
//!
//! This module provides communication backends for sending encoded bytes to
//! printers. The formatting pipeline never touches a transport; callers
//! compose the two, usually through [`send`].
//!
//! ## Available Transports
//!
//! - [`network`]: Raw TCP printing (port 9100)
//! - [`serial`]: Serial / Bluetooth RFCOMM TTY devices (Unix)
//! - [`memory`]: In-memory capture for tests and dry runs
//!
//! ## Example
//!
//! ```
//! use posprint::transport::{self, MemoryTransport, Transport};
//!
//! let mut printer = MemoryTransport::new();
//! transport::send(&mut printer, &[0x1B, 0x40])?;
//!
//! assert_eq!(printer.written(), &[0x1B, 0x40]);
//! assert!(!printer.is_connected());
//! # Ok::<(), posprint::transport::TransportError>(())
//! ```

pub mod memory;
pub mod network;
pub mod serial;

pub use memory::MemoryTransport;
pub use network::NetworkTransport;
pub use serial::SerialTransport;

use thiserror::Error;
use tracing::debug;

/// Errors raised by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The device could not be reached or opened.
    #[error("connection failed: {0}")]
    Connection(String),

    /// A write or flush failed on an open connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `write` was called before `connect` (or after `close`).
    #[error("not connected")]
    NotConnected,
}

/// A byte sink connected to a printer.
pub trait Transport {
    /// Open the connection. Calling it on an open transport is a no-op.
    fn connect(&mut self) -> Result<(), TransportError>;

    /// Write all of `bytes` to the printer.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Close the connection. Closing a closed transport is a no-op.
    fn close(&mut self);

    fn is_connected(&self) -> bool;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn connect(&mut self) -> Result<(), TransportError> {
        (**self).connect()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write(bytes)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

/// Connect if needed, write `bytes`, then close.
///
/// The transport is closed even when the write fails.
pub fn send<T: Transport + ?Sized>(transport: &mut T, bytes: &[u8]) -> Result<(), TransportError> {
    if !transport.is_connected() {
        transport.connect()?;
    }
    let result = transport.write(bytes);
    transport.close();
    debug!(bytes = bytes.len(), ok = result.is_ok(), "sent print job");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_connects_writes_and_closes() {
        let mut t = MemoryTransport::new();
        send(&mut t, b"abc").unwrap();
        assert_eq!(t.written(), b"abc");
        assert!(!t.is_connected());
    }

    #[test]
    fn test_send_through_box() {
        let mut t: Box<dyn Transport> = Box::new(MemoryTransport::new());
        send(&mut t, b"x").unwrap();
        assert!(!t.is_connected());
    }

    #[test]
    fn test_send_closes_after_failed_write() {
        let mut t = MemoryTransport::failing_writes();
        let err = send(&mut t, b"abc").unwrap_err();
        assert!(matches!(err, TransportError::Io(_)));
        assert!(!t.is_connected());
    }

    #[test]
    fn test_send_propagates_connect_failure() {
        let mut t = MemoryTransport::unreachable();
        let err = send(&mut t, b"abc").unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
        assert!(t.written().is_empty());
    }
}
