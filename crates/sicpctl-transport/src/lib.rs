//! Blocking serial transport abstraction.
//!
//! Provides the byte-oriented, full-duplex link the protocol layers build on:
//! - [`Link`] — the capability trait (write-all, read-exact, close)
//! - [`SerialLink`] — an RS-232C port opened via the `serialport` crate
//! - [`IoLink`] — adapter for any already-open `Read + Write` stream
//!
//! This is the lowest layer of sicpctl. Everything else builds on top of
//! the [`Link`] trait provided here.

pub mod error;
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use serial::SerialLink;
pub use traits::{IoLink, Link};
