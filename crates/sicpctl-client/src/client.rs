use std::sync::Mutex;

use tracing::trace;

use sicpctl_frame::{encode_command, ProtocolVariant, Response};
use sicpctl_transport::{Link, SerialLink};

use crate::error::{ClientError, Result};

/// A display-control client owning one transport link.
///
/// Each [`send`](Client::send) performs exactly one blocking write followed
/// by one or two blocking reads. The protocol is strictly half-duplex, so
/// an internal mutex serializes concurrent callers: requests are never
/// reordered or batched, and two exchanges never interleave bytes on the
/// wire.
pub struct Client<L = SerialLink> {
    link: Mutex<L>,
    variant: ProtocolVariant,
}

impl Client<SerialLink> {
    /// Open a serial port and wrap it with the current protocol layout.
    pub fn open(port: &str, baud: u32) -> Result<Self> {
        Self::open_with_variant(port, baud, ProtocolVariant::default())
    }

    /// Open a serial port with an explicit response layout.
    pub fn open_with_variant(port: &str, baud: u32, variant: ProtocolVariant) -> Result<Self> {
        let link = SerialLink::open(port, baud).map_err(ClientError::Open)?;
        Ok(Self::from_link_with_variant(link, variant))
    }
}

impl<L: Link> Client<L> {
    /// Wrap an already-open transport with the current protocol layout.
    pub fn from_link(link: L) -> Self {
        Self::from_link_with_variant(link, ProtocolVariant::default())
    }

    /// Wrap an already-open transport with an explicit response layout.
    pub fn from_link_with_variant(link: L, variant: ProtocolVariant) -> Self {
        Self {
            link: Mutex::new(link),
            variant,
        }
    }

    /// The response layout this client decodes with.
    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Send one command payload and return the validated response.
    ///
    /// Sequencing:
    /// 1. encode the command — an oversized payload fails here, before the
    ///    link is touched;
    /// 2. write the full frame ([`ClientError::WriteFailed`], no read
    ///    attempted);
    /// 3. read the fixed-size header, then exactly the body length it
    ///    announces ([`ClientError::ReadFailed`] on short read/EOF);
    /// 4. validate the checksum ([`FrameError::ChecksumMismatch`]).
    ///
    /// No retries happen here; the caller owns retry policy. Once the write
    /// succeeded the response is always read — the device transmits it
    /// regardless.
    ///
    /// [`FrameError::ChecksumMismatch`]: sicpctl_frame::FrameError::ChecksumMismatch
    pub fn send(&self, payload: &[u8]) -> Result<Response> {
        let frame = encode_command(payload)?;

        let mut link = match self.link.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        link.write_all(&frame).map_err(ClientError::WriteFailed)?;

        let mut header = vec![0u8; self.variant.header_len()];
        link.read_exact(&mut header)
            .map_err(ClientError::ReadFailed)?;

        let mut body = vec![0u8; self.variant.body_len(&header)];
        link.read_exact(&mut body).map_err(ClientError::ReadFailed)?;
        drop(link);

        let response = Response::parse(self.variant, &header, &body)?;
        trace!(
            sent = frame.len(),
            received = response.frame().len(),
            "exchange complete"
        );
        Ok(response)
    }

    /// Release the transport.
    ///
    /// Consumes the client; the collaborator's close error is surfaced.
    pub fn close(self) -> Result<()> {
        let mut link = self.into_link();
        link.close().map_err(ClientError::CloseFailed)
    }

    /// Consume the client and return the underlying link without closing it.
    pub fn into_link(self) -> L {
        match self.link.into_inner() {
            Ok(link) => link,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<L> std::fmt::Debug for Client<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("variant", &self.variant)
            .finish()
    }
}
