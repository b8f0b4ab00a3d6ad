//! XOR-checksummed framing for the display control protocol.
//!
//! This is the pure codec layer — no I/O. Every outbound command frame is:
//! - A fixed 5-byte preamble (protocol header, monitor ID, two reserved fields)
//! - A length byte covering control byte + payload
//! - The control byte (0x01 for every command)
//! - The opaque command payload
//! - An XOR fold of every preceding byte
//!
//! Inbound response frames come in two historical layouts, selected once per
//! connection via [`ProtocolVariant`]; both end in the same XOR checksum.

pub mod codec;
pub mod error;
pub mod response;

pub use codec::{encode_command, encode_command_into, xor_fold};
pub use codec::{COMMAND_OVERHEAD, CONTROL, MAX_PAYLOAD, PREAMBLE};
pub use error::{FrameError, Result};
pub use response::{ProtocolVariant, Response};
