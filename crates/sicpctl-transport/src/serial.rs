use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::{flush_retrying, read_exact_retrying, write_all_retrying, Link};

/// An RS-232C serial port, configured for the display protocol.
///
/// Opens 8 data bits, no parity, one stop bit at the requested baud rate.
/// A read timeout is always set: an unplugged or powered-off display would
/// otherwise block a read forever, and `serialport` treats a zero timeout
/// as "fail immediately" rather than "wait forever".
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialLink {
    /// Default read/write timeout applied at open.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

    /// Open and configure a serial port with the default timeout.
    pub fn open(port: &str, baud: u32) -> Result<Self> {
        Self::open_with_timeout(port, baud, Self::DEFAULT_TIMEOUT)
    }

    /// Open and configure a serial port with an explicit timeout.
    pub fn open_with_timeout(port: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let handle = serialport::new(port, baud)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(timeout)
            .open()
            .map_err(|e| TransportError::Open {
                port: port.to_string(),
                source: e,
            })?;

        info!(port, baud, "opened serial link");

        Ok(Self {
            port: handle,
            name: port.to_string(),
        })
    }

    /// The port name this link was opened on.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Update the read/write timeout on the open port.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.port
            .set_timeout(timeout)
            .map_err(|e| TransportError::Io(std::io::Error::other(e.to_string())))
    }
}

impl Link for SerialLink {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        write_all_retrying(&mut self.port, buf)?;
        flush_retrying(&mut self.port)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> std::io::Result<()> {
        read_exact_retrying(&mut self.port, buf)
    }

    fn close(&mut self) -> std::io::Result<()> {
        debug!(port = %self.name, "closing serial link");
        flush_retrying(&mut self.port)
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("port", &self.name)
            .finish()
    }
}
