use bytes::Bytes;

use crate::error::Result;

/// A duplex byte channel to a servo controller.
///
/// All calls block the calling thread. Timeouts, if any, are a property of the
/// underlying stream, not of this trait.
pub trait Transport {
    /// Write every byte of `bytes` and flush.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read exactly `n` bytes.
    ///
    /// Fails with [`TransportError::ShortRead`](crate::TransportError::ShortRead)
    /// if the stream ends first.
    fn read(&mut self, n: usize) -> Result<Bytes>;

    /// Release the underlying stream.
    ///
    /// Closing an already closed transport is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Whether [`close`](Transport::close) has been called.
    fn is_closed(&self) -> bool;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read(&mut self, n: usize) -> Result<Bytes> {
        (**self).read(n)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
