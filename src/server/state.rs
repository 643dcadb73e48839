//! Server state and configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::printer::PrinterConfig;
use crate::transport::{NetworkTransport, SerialTransport, Transport};

/// Where print jobs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterTarget {
    /// Raw TCP printer, `host` or `host:port`.
    Network { address: String, timeout: Duration },
    /// TTY, USB printer or RFCOMM device.
    Serial { device: PathBuf },
}

impl PrinterTarget {
    /// Build a fresh, unconnected transport for this target.
    pub fn open(&self) -> Box<dyn Transport + Send> {
        match self {
            PrinterTarget::Network { address, timeout } => {
                let mut transport = NetworkTransport::new(address.clone());
                transport.set_timeout(*timeout);
                Box::new(transport)
            }
            PrinterTarget::Serial { device } => Box::new(SerialTransport::new(device)),
        }
    }

    /// Human readable name for logs.
    pub fn describe(&self) -> String {
        match self {
            PrinterTarget::Network { address, .. } => format!("tcp://{}", address),
            PrinterTarget::Serial { device } => device.display().to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Printer to send `/print` jobs to. `None` disables printing.
    pub target: Option<PrinterTarget>,
    /// Line geometry for descriptions that omit `config`.
    pub default_config: PrinterConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            target: None,
            default_config: PrinterConfig::default(),
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_unconnected() {
        let target = PrinterTarget::Network {
            address: "127.0.0.1".into(),
            timeout: Duration::from_millis(100),
        };
        assert!(!target.open().is_connected());

        let target = PrinterTarget::Serial {
            device: PathBuf::from("/dev/null"),
        };
        assert!(!target.open().is_connected());
    }

    #[test]
    fn test_describe() {
        let target = PrinterTarget::Network {
            address: "10.0.0.5:9100".into(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(target.describe(), "tcp://10.0.0.5:9100");
        let target = PrinterTarget::Serial {
            device: PathBuf::from("/dev/rfcomm0"),
        };
        assert_eq!(target.describe(), "/dev/rfcomm0");
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert!(config.target.is_none());
        assert_eq!(config.default_config.chars_per_line(), 32);
    }
}
