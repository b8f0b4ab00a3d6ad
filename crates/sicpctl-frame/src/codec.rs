use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Fixed command preamble: protocol header, monitor ID, category, page, function.
pub const PREAMBLE: [u8; 5] = [0xA6, 0x01, 0x00, 0x00, 0x00];

/// Control byte carried by every outbound command frame.
pub const CONTROL: u8 = 0x01;

/// Maximum command payload size.
///
/// The length byte counts control byte + payload, so the payload itself
/// may be at most 253 bytes.
pub const MAX_PAYLOAD: usize = 253;

/// Fixed bytes wrapped around a payload: preamble (5) + length + control + checksum.
pub const COMMAND_OVERHEAD: usize = PREAMBLE.len() + 3;

/// Cumulative XOR over a byte sequence.
///
/// Both frame directions are guarded by this fold; any single-bit flip
/// changes the result.
pub fn xor_fold(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

/// Encode a command frame into `dst`.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬─────────┬──────────┬─────────────┬──────────┐
/// │ Preamble (5B)    │ Length  │ Control  │ Payload     │ Checksum │
/// │ A6 01 00 00 00   │ len+2   │ 01       │ (len bytes) │ XOR fold │
/// └──────────────────┴─────────┴──────────┴─────────────┴──────────┘
/// ```
///
/// The checksum is the XOR fold of every preceding byte, preamble through
/// payload. Pure and deterministic.
pub fn encode_command_into(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }

    let start = dst.len();
    dst.reserve(COMMAND_OVERHEAD + payload.len());
    dst.put_slice(&PREAMBLE);
    dst.put_u8((payload.len() + 2) as u8);
    dst.put_u8(CONTROL);
    dst.put_slice(payload);
    let checksum = xor_fold(&dst[start..]);
    dst.put_u8(checksum);
    Ok(())
}

/// Encode a command frame as a freshly allocated buffer.
pub fn encode_command(payload: &[u8]) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(COMMAND_OVERHEAD + payload.len());
    encode_command_into(payload, &mut buf)?;
    Ok(buf.freeze())
}
