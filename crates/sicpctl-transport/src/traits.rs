use std::io::{ErrorKind, Read, Write};

/// A byte-oriented, full-duplex, ordered link to the display.
///
/// The protocol is strictly half-duplex request/response on top of this:
/// callers write one complete frame, then read an exact number of bytes
/// back. `read_exact` must block until the buffer is filled; a short read
/// never succeeds silently (EOF surfaces as `UnexpectedEof`).
pub trait Link {
    /// Write the whole buffer to the link.
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;

    /// Read exactly `buf.len()` bytes into the buffer.
    fn read_exact(&mut self, buf: &mut [u8]) -> std::io::Result<()>;

    /// Release the link.
    fn close(&mut self) -> std::io::Result<()>;
}

/// Adapter exposing any `Read + Write` stream as a [`Link`].
///
/// Handles partial writes and interrupted syscalls internally; `close`
/// flushes the stream (dropping the inner value releases it).
#[derive(Debug)]
pub struct IoLink<T> {
    inner: T,
}

impl<T: Read + Write> IoLink<T> {
    /// Wrap an already-open stream.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the adapter and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> Link for IoLink<T> {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        write_all_retrying(&mut self.inner, buf)?;
        flush_retrying(&mut self.inner)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> std::io::Result<()> {
        read_exact_retrying(&mut self.inner, buf)
    }

    fn close(&mut self) -> std::io::Result<()> {
        flush_retrying(&mut self.inner)
    }
}

/// Write the whole buffer, retrying interrupted writes.
pub(crate) fn write_all_retrying<W: Write>(writer: &mut W, buf: &[u8]) -> std::io::Result<()> {
    let mut offset = 0usize;
    while offset < buf.len() {
        match writer.write(&buf[offset..]) {
            Ok(0) => return Err(ErrorKind::WriteZero.into()),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Fill the buffer completely, retrying interrupted reads.
///
/// EOF before the buffer is full is an error: the device either sent a
/// truncated frame or the link dropped mid-response.
pub(crate) fn read_exact_retrying<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<()> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("link closed after {filled} of {} bytes", buf.len()),
                ))
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

pub(crate) fn flush_retrying<W: Write>(writer: &mut W) -> std::io::Result<()> {
    loop {
        match writer.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_exact_fills_across_partial_reads() {
        let mut link = IoLink::new(ByteByByteStream::new(b"abcdef".to_vec()));
        let mut buf = [0u8; 4];
        link.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"abcd");
    }

    #[test]
    fn read_exact_reports_eof_with_progress() {
        let mut link = IoLink::new(Cursor::new(b"ab".to_vec()));
        let mut buf = [0u8; 5];
        let err = link.read_exact(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert!(err.to_string().contains("2 of 5"));
    }

    #[test]
    fn interrupted_read_retries() {
        let mut link = IoLink::new(InterruptOnce::new(b"xyz".to_vec()));
        let mut buf = [0u8; 3];
        link.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"xyz");
    }

    #[test]
    fn write_all_handles_short_writes() {
        let mut link = IoLink::new(OneByteSink::default());
        link.write_all(b"hello").unwrap();
        assert_eq!(link.get_ref().data, b"hello");
        assert!(link.get_ref().flushed);
    }

    #[test]
    fn write_zero_is_an_error() {
        let mut link = IoLink::new(ZeroSink);
        let err = link.write_all(b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteZero);
    }

    #[test]
    fn close_flushes() {
        let mut link = IoLink::new(OneByteSink::default());
        link.close().unwrap();
        assert!(link.get_ref().flushed);
    }

    struct ByteByByteStream {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl ByteByByteStream {
        fn new(bytes: Vec<u8>) -> Self {
            Self { bytes, pos: 0 }
        }
    }

    impl Read for ByteByByteStream {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    impl Write for ByteByByteStream {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct InterruptOnce {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl InterruptOnce {
        fn new(bytes: Vec<u8>) -> Self {
            Self {
                interrupted: false,
                inner: Cursor::new(bytes),
            }
        }
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(ErrorKind::Interrupted.into());
            }
            self.inner.read(buf)
        }
    }

    impl Write for InterruptOnce {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct OneByteSink {
        data: Vec<u8>,
        flushed: bool,
    }

    impl Read for OneByteSink {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for OneByteSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.is_empty() {
                return Ok(0);
            }
            self.data.push(buf[0]);
            Ok(1)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    struct ZeroSink;

    impl Read for ZeroSink {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for ZeroSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
