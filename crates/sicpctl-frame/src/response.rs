use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::xor_fold;
use crate::error::{FrameError, Result};

/// Response frame layout, fixed per connection.
///
/// The two layouts are not self-distinguishing from the header alone, so
/// the choice is made once at client construction and never per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolVariant {
    /// Legacy layout: 5-byte header `[Header][MonitorID][Category][Page][Function]`,
    /// followed by `header[4]` body bytes.
    FiveByte,
    /// Current layout: 6-byte header `[Header][MonitorID][Category][Page][Length][Control]`,
    /// followed by `header[4] - 1` body bytes.
    #[default]
    SixByte,
}

impl ProtocolVariant {
    /// Size of the fixed response header.
    pub const fn header_len(self) -> usize {
        match self {
            ProtocolVariant::FiveByte => 5,
            ProtocolVariant::SixByte => 6,
        }
    }

    /// Number of body bytes announced by a header, checksum included.
    ///
    /// The six-byte layout's length field also counts the control byte
    /// already consumed as part of the header, hence the adjustment.
    pub fn body_len(self, header: &[u8]) -> usize {
        debug_assert!(header.len() >= self.header_len());
        match self {
            ProtocolVariant::FiveByte => header[4] as usize,
            ProtocolVariant::SixByte => (header[4] as usize).saturating_sub(1),
        }
    }
}

/// An immutable, checksum-validated response frame.
///
/// Constructed only by [`Response::parse`]; a value of this type always
/// holds a frame whose trailing checksum matched.
#[derive(Debug, Clone)]
pub struct Response {
    variant: ProtocolVariant,
    frame: Bytes,
}

impl Response {
    /// Validate a response split into its fixed-size header and the body
    /// whose length was derived from that header.
    ///
    /// Recomputes the XOR fold over every byte except the last and
    /// compares it against the last byte. Both layouts share these
    /// semantics byte for byte (the legacy implementation folded header
    /// and data separately and combined with XOR, which is the same fold).
    pub fn parse(variant: ProtocolVariant, header: &[u8], body: &[u8]) -> Result<Self> {
        debug_assert_eq!(header.len(), variant.header_len());

        let mut frame = BytesMut::with_capacity(header.len() + body.len());
        frame.put_slice(header);
        frame.put_slice(body);

        let expected = xor_fold(&frame[..frame.len() - 1]);
        let actual = frame[frame.len() - 1];
        if expected != actual {
            return Err(FrameError::ChecksumMismatch { expected, actual });
        }

        Ok(Self {
            variant,
            frame: frame.freeze(),
        })
    }

    /// The layout this response was parsed with.
    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// The complete validated frame, checksum included.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Monitor identifier from the header.
    pub fn monitor_id(&self) -> u8 {
        self.frame[1]
    }

    /// Category field from the header.
    pub fn category(&self) -> u8 {
        self.frame[2]
    }

    /// Page field from the header.
    pub fn page(&self) -> u8 {
        self.frame[3]
    }

    /// Function field (five-byte layout only).
    pub fn function(&self) -> Option<u8> {
        match self.variant {
            ProtocolVariant::FiveByte => Some(self.frame[4]),
            ProtocolVariant::SixByte => None,
        }
    }

    /// Length field (six-byte layout only).
    pub fn length(&self) -> Option<u8> {
        match self.variant {
            ProtocolVariant::FiveByte => None,
            ProtocolVariant::SixByte => Some(self.frame[4]),
        }
    }

    /// Control field (six-byte layout only).
    pub fn control(&self) -> Option<u8> {
        match self.variant {
            ProtocolVariant::FiveByte => None,
            ProtocolVariant::SixByte => Some(self.frame[5]),
        }
    }

    /// Response data: the body bytes excluding the trailing checksum.
    ///
    /// Empty for pure status/ack frames.
    pub fn data(&self) -> &[u8] {
        let start = self.variant.header_len();
        let end = self.frame.len() - 1;
        if end < start {
            &[]
        } else {
            &self.frame[start..end]
        }
    }

    /// The received checksum byte.
    pub fn checksum(&self) -> u8 {
        self.frame[self.frame.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a device-style response: header fields, data, trailing checksum.
    fn device_frame(variant: ProtocolVariant, data: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let header = match variant {
            ProtocolVariant::FiveByte => {
                vec![0xA6, 0x01, 0x00, 0x00, (data.len() + 1) as u8]
            }
            ProtocolVariant::SixByte => {
                vec![0xA6, 0x01, 0x00, 0x00, (data.len() + 2) as u8, 0x01]
            }
        };
        let mut body = data.to_vec();
        let mut all = header.clone();
        all.extend_from_slice(data);
        body.push(xor_fold(&all));
        (header, body)
    }

    #[test]
    fn parse_six_byte_response() {
        let (header, body) = device_frame(ProtocolVariant::SixByte, &[0x00, 0x18]);
        assert_eq!(ProtocolVariant::SixByte.body_len(&header), body.len());

        let response = Response::parse(ProtocolVariant::SixByte, &header, &body).unwrap();
        assert_eq!(response.monitor_id(), 0x01);
        assert_eq!(response.category(), 0x00);
        assert_eq!(response.page(), 0x00);
        assert_eq!(response.length(), Some(0x04));
        assert_eq!(response.control(), Some(0x01));
        assert_eq!(response.function(), None);
        assert_eq!(response.data(), &[0x00, 0x18]);
        assert_eq!(response.frame().len(), header.len() + body.len());
    }

    #[test]
    fn parse_five_byte_response() {
        let (header, body) = device_frame(ProtocolVariant::FiveByte, &[0x02]);
        assert_eq!(ProtocolVariant::FiveByte.body_len(&header), body.len());

        let response = Response::parse(ProtocolVariant::FiveByte, &header, &body).unwrap();
        assert_eq!(response.function(), Some(0x02));
        assert_eq!(response.length(), None);
        assert_eq!(response.control(), None);
        assert_eq!(response.data(), &[0x02]);
    }

    #[test]
    fn pure_ack_has_empty_data() {
        for variant in [ProtocolVariant::FiveByte, ProtocolVariant::SixByte] {
            let (header, body) = device_frame(variant, &[]);
            assert_eq!(body.len(), 1);

            let response = Response::parse(variant, &header, &body).unwrap();
            assert!(response.data().is_empty());
            assert_eq!(response.checksum(), *body.last().unwrap());
        }
    }

    #[test]
    fn zero_length_body_is_valid() {
        // header[4] == 1 announces an empty body in the six-byte layout;
        // the frame's last byte is then the final header byte.
        let mut header = vec![0xA6, 0x01, 0x00, 0x00, 0x01];
        header.push(xor_fold(&header));
        assert_eq!(ProtocolVariant::SixByte.body_len(&header), 0);

        let response = Response::parse(ProtocolVariant::SixByte, &header, &[]).unwrap();
        assert!(response.data().is_empty());
        assert_eq!(response.checksum(), *header.last().unwrap());
    }

    #[test]
    fn any_single_bit_flip_is_detected() {
        let (header, body) = device_frame(ProtocolVariant::SixByte, &[0x41, 0x42, 0x43]);
        let frame_len = header.len() + body.len();

        for byte_idx in 0..frame_len {
            for bit in 0..8u8 {
                let mut header = header.clone();
                let mut body = body.clone();
                if byte_idx < header.len() {
                    header[byte_idx] ^= 1 << bit;
                } else {
                    body[byte_idx - header.len()] ^= 1 << bit;
                }

                let err =
                    Response::parse(ProtocolVariant::SixByte, &header, &body).unwrap_err();
                assert!(
                    matches!(err, FrameError::ChecksumMismatch { .. }),
                    "flip of byte {byte_idx} bit {bit} went undetected"
                );
            }
        }
    }

    #[test]
    fn checksum_mismatch_reports_both_values() {
        let (header, mut body) = device_frame(ProtocolVariant::SixByte, &[0x10]);
        let good = *body.last().unwrap();
        *body.last_mut().unwrap() = good ^ 0xFF;

        match Response::parse(ProtocolVariant::SixByte, &header, &body).unwrap_err() {
            FrameError::ChecksumMismatch { expected, actual } => {
                assert_eq!(expected, good);
                assert_eq!(actual, good ^ 0xFF);
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[test]
    fn validates_every_data_size() {
        for len in 0..=253usize {
            let data = vec![len as u8; len];
            let (header, body) = device_frame(ProtocolVariant::SixByte, &data);
            let response = Response::parse(ProtocolVariant::SixByte, &header, &body).unwrap();
            assert_eq!(response.data(), data.as_slice());
        }
    }

    #[test]
    fn body_len_derivation() {
        let five = [0xA6, 0x01, 0x00, 0x00, 0x07];
        assert_eq!(ProtocolVariant::FiveByte.body_len(&five), 7);

        let six = [0xA6, 0x01, 0x00, 0x00, 0x07, 0x01];
        assert_eq!(ProtocolVariant::SixByte.body_len(&six), 6);

        // A zero length field never underflows.
        let zero = [0xA6, 0x01, 0x00, 0x00, 0x00, 0x01];
        assert_eq!(ProtocolVariant::SixByte.body_len(&zero), 0);
    }

    #[test]
    fn header_len_per_variant() {
        assert_eq!(ProtocolVariant::FiveByte.header_len(), 5);
        assert_eq!(ProtocolVariant::SixByte.header_len(), 6);
        assert_eq!(ProtocolVariant::default(), ProtocolVariant::SixByte);
    }
}
