use std::fmt;
use std::io;

use sicpctl_client::ClientError;
use sicpctl_frame::FrameError;
use sicpctl_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::UnexpectedEof => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Io(source) => io_error(context, source),
        other @ TransportError::Open { .. } => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {other}"))
        }
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        FrameError::ChecksumMismatch { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn client_error(context: &str, err: ClientError) -> CliError {
    match err {
        ClientError::Open(source) => transport_error(context, source),
        ClientError::WriteFailed(source) | ClientError::ReadFailed(source) => {
            io_error(context, source)
        }
        ClientError::Frame(source) => frame_error(context, source),
        ClientError::CloseFailed(source) => io_error(context, source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_timeout_code() {
        let err = client_error(
            "send failed",
            ClientError::ReadFailed(io::ErrorKind::TimedOut.into()),
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn checksum_mismatch_maps_to_data_invalid() {
        let err = client_error(
            "send failed",
            ClientError::Frame(FrameError::ChecksumMismatch {
                expected: 0xC6,
                actual: 0x00,
            }),
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.contains("send failed"));
    }

    #[test]
    fn oversized_payload_maps_to_usage() {
        let err = frame_error(
            "encode failed",
            FrameError::PayloadTooLarge { size: 300, max: 253 },
        );
        assert_eq!(err.code, USAGE);
    }
}
