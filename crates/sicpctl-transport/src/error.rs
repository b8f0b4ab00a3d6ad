/// Errors that can occur on the serial transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the serial port.
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },

    /// An I/O error occurred on the open link.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
