//! # Serial Transport
//!
//! Talks to printers exposed as a TTY device: USB-serial adapters
//! (`/dev/ttyUSB0`), USB printer class devices (`/dev/usb/lp0`) and
//! Bluetooth SPP printers bound through RFCOMM (`/dev/rfcomm0`).
//!
//! ## Bluetooth Setup (Linux)
//!
//! ```bash
//! $ bluetoothctl
//! [bluetooth]# pair 00:11:62:XX:XX:XX
//! $ sudo rfcomm bind 0 00:11:62:XX:XX:XX
//! # This creates /dev/rfcomm0
//! ```
//!
//! ## TTY Configuration
//!
//! When the device is a terminal it is switched to raw mode so the command
//! stream reaches the printer unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL
//! - **No software flow control**: IXON, IXOFF, IXANY
//! - **No output processing**: OPOST (no LF to CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**: ICANON, ECHO, ECHONL, ISIG, IEXTEN
//!
//! Plain files and non-TTY character devices are written as-is, which makes
//! `--device /tmp/out.bin` a handy capture target.
//!
//! ## Chunked Writes
//!
//! Writes larger than the chunk size (4096 bytes) are split with a short
//! pause between chunks so slow links do not overrun the printer buffer.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use super::{Transport, TransportError};

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Serial Printer Transport
///
/// ## Example
///
/// ```no_run
/// use posprint::transport::{SerialTransport, Transport};
///
/// let mut printer = SerialTransport::new("/dev/rfcomm0");
/// printer.connect()?;
/// printer.write(&[0x1B, 0x40])?;
/// printer.close();
/// # Ok::<(), posprint::transport::TransportError>(())
/// ```
pub struct SerialTransport {
    device: PathBuf,
    file: Option<File>,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl SerialTransport {
    /// Create a transport for `device`. The device is opened on `connect`.
    pub fn new<P: AsRef<Path>>(device: P) -> Self {
        Self {
            device: device.as_ref().to_path_buf(),
            file: None,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        }
    }

    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Set the chunk size for large writes. Zero is treated as one byte.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Transport for SerialTransport {
    fn connect(&mut self) -> Result<(), TransportError> {
        if self.file.is_some() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .write(true)
            .create(false)
            .open(&self.device)
            .map_err(|e| {
                TransportError::Connection(format!(
                    "Failed to open {}: {}",
                    self.device.display(),
                    e
                ))
            })?;

        configure_tty_raw(&file)?;

        info!(device = %self.device.display(), "opened printer device");
        self.file = Some(file);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let file = self.file.as_mut().ok_or(TransportError::NotConnected)?;

        if bytes.len() <= self.chunk_size {
            file.write_all(bytes)?;
        } else {
            for chunk in bytes.chunks(self.chunk_size) {
                file.write_all(chunk)?;
                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }
        file.flush()?;

        debug!(bytes = bytes.len(), device = %self.device.display(), "wrote to device");
        Ok(())
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            info!(device = %self.device.display(), "closed printer device");
        }
    }

    fn is_connected(&self) -> bool {
        self.file.is_some()
    }
}

/// Configure an open device for raw TTY mode.
///
/// Files that are not terminals are left alone. IXON/IXOFF are cleared
/// because 0x11 (XON) and 0x13 (XOFF) can appear in UTF-8 text payloads
/// of some encodings and would otherwise stall the link.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), TransportError> {
    use std::io;
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    if unsafe { libc::isatty(fd) } != 1 {
        return Ok(());
    }

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(TransportError::Connection(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(TransportError::Connection(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), TransportError> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("posprint-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_default_device_path() {
        assert_eq!(DEFAULT_DEVICE, "/dev/rfcomm0");
    }

    #[test]
    fn test_missing_device() {
        let mut t = SerialTransport::new("/nonexistent/posprint/tty");
        assert!(matches!(t.connect(), Err(TransportError::Connection(_))));
        assert!(!t.is_connected());
    }

    #[test]
    fn test_write_before_connect() {
        let mut t = SerialTransport::new(DEFAULT_DEVICE);
        assert!(matches!(t.write(b"x"), Err(TransportError::NotConnected)));
    }

    #[test]
    fn test_writes_to_plain_file() {
        let path = temp_path("plain.bin");
        fs::write(&path, b"").unwrap();

        let mut t = SerialTransport::new(&path);
        super::super::send(&mut t, &[0x1B, 0x40, b'o', b'k', 0x0A]).unwrap();
        assert!(!t.is_connected());

        assert_eq!(fs::read(&path).unwrap(), vec![0x1B, 0x40, b'o', b'k', 0x0A]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_chunked_write_is_complete() {
        let path = temp_path("chunked.bin");
        fs::write(&path, b"").unwrap();

        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut t = SerialTransport::new(&path);
        t.set_chunk_size(1000);
        t.set_chunk_delay(Duration::ZERO);
        t.connect().unwrap();
        t.write(&data).unwrap();
        t.close();

        assert_eq!(fs::read(&path).unwrap(), data);
        fs::remove_file(&path).unwrap();
    }
}
