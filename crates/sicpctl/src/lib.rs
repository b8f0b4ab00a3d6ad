//! RS-232C display control over the SICP-style serial protocol.
//!
//! sicpctl speaks the XOR-checksummed command/response framing used by
//! serial-controlled display panels: the host writes one command frame,
//! the display answers with one status/data frame.
//!
//! # Crate Structure
//!
//! - [`transport`] — Blocking serial link abstraction (`Link`, `SerialLink`)
//! - [`frame`] — Pure frame codec: command encoding, response validation
//! - [`client`] — Request/response exchange client (behind `client` feature)

/// Re-export transport types.
pub mod transport {
    pub use sicpctl_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use sicpctl_frame::*;
}

/// Re-export client types (requires `client` feature).
#[cfg(feature = "client")]
pub mod client {
    pub use sicpctl_client::*;
}
