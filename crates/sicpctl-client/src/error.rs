use sicpctl_frame::FrameError;
use sicpctl_transport::TransportError;

/// Errors that can occur during a command/response exchange.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The serial port could not be acquired.
    #[error("failed to open transport: {0}")]
    Open(#[source] TransportError),

    /// Writing the command frame failed; no read was attempted.
    #[error("write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// The response header or body could not be read in full.
    #[error("read failed before a complete response: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Encoding or validation failed (oversized payload, checksum mismatch).
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Releasing the transport failed.
    #[error("close failed: {0}")]
    CloseFailed(#[source] std::io::Error),
}

impl ClientError {
    /// True when the failure signals data corruption rather than an I/O
    /// fault — callers typically resend immediately instead of backing off.
    pub fn is_corruption(&self) -> bool {
        matches!(self, ClientError::Frame(FrameError::ChecksumMismatch { .. }))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
