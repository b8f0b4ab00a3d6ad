//! Request/response exchange client for the display control protocol.
//!
//! This is the "just works" layer. Open a serial port (or wrap any
//! already-open [`Link`]), send opaque command payloads, get back
//! checksum-validated [`Response`] frames.
//!
//! [`Link`]: sicpctl_transport::Link
//! [`Response`]: sicpctl_frame::Response

pub mod client;
pub mod error;

pub use client::Client;
pub use error::{ClientError, Result};
