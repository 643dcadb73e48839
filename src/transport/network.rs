//! # Network Transport
//!
//! Raw TCP printing, as spoken by Ethernet and Wi-Fi receipt printers on
//! port 9100 ("JetDirect" / raw socket). The printer consumes whatever is
//! written to the socket as a command stream; there is no framing.
//!
//! ## Example
//!
//! ```no_run
//! use posprint::transport::{self, NetworkTransport};
//!
//! let mut printer = NetworkTransport::new("192.168.1.50");
//! transport::send(&mut printer, &[0x1B, 0x40])?;
//! # Ok::<(), posprint::transport::TransportError>(())
//! ```

use std::io::Write;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use super::{Transport, TransportError};

/// Default raw printing port.
pub const DEFAULT_PORT: u16 = 9100;

/// Default connect and write timeout (milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// # TCP Printer Transport
pub struct NetworkTransport {
    address: String,
    timeout: Duration,
    stream: Option<TcpStream>,
}

impl NetworkTransport {
    /// Create a transport for `host` or `host:port` (port defaults to 9100).
    ///
    /// No connection is made until [`Transport::connect`].
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: with_default_port(&address.into()),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            stream: None,
        }
    }

    /// Set the connect and write timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The resolved `host:port` string this transport dials.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Transport for NetworkTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let addrs = self.address.to_socket_addrs().map_err(|e| {
            TransportError::Connection(format!("Failed to resolve {}: {}", self.address, e))
        })?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => {
                    stream.set_write_timeout(Some(self.timeout))?;
                    stream.set_nodelay(true)?;
                    info!(address = %self.address, "connected to printer");
                    self.stream = Some(stream);
                    return Ok(());
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(TransportError::Connection(match last_err {
            Some(e) => format!("Failed to connect to {}: {}", self.address, e),
            None => format!("No addresses found for {}", self.address),
        }))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;
        stream.write_all(bytes)?;
        stream.flush()?;
        debug!(bytes = bytes.len(), "wrote to network printer");
        Ok(())
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // The peer may already have gone away; nothing useful to do then.
            let _ = stream.shutdown(Shutdown::Both);
            info!(address = %self.address, "closed printer connection");
        }
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for NetworkTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// Append `:9100` unless the address already names a port.
///
/// Bracketed IPv6 literals (`[::1]`, `[::1]:9100`) are handled; a bare IPv6
/// literal is wrapped in brackets first.
fn with_default_port(address: &str) -> String {
    if address.starts_with('[') {
        if address.contains("]:") {
            return address.to_string();
        }
        return format!("{}:{}", address, DEFAULT_PORT);
    }
    match address.matches(':').count() {
        0 => format!("{}:{}", address, DEFAULT_PORT),
        1 => address.to_string(),
        _ => format!("[{}]:{}", address, DEFAULT_PORT),
    }
}

// ============================================================================
// TESTS
// ============================================================================
