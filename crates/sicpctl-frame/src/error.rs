/// Errors that can occur during frame encoding/validation.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload does not fit in the single length byte.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The received checksum does not match the XOR fold of the frame.
    ///
    /// The frame is structurally complete but its content cannot be
    /// trusted; callers must not interpret the payload.
    #[error("checksum mismatch (computed {expected:#04x}, received {actual:#04x})")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

pub type Result<T> = std::result::Result<T, FrameError>;
