use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::error::{Result, TransportError};
use crate::traits::Transport;

/// Drives the [`Transport`] contract over any blocking `Read + Write` stream.
///
/// Handles partial reads and writes internally; callers always get whole
/// commands out and exact-length responses back.
pub struct StreamTransport<T> {
    inner: Option<T>,
    buf: BytesMut,
}

impl<T: Read + Write> StreamTransport<T> {
    /// Wrap an open stream.
    pub fn new(inner: T) -> Self {
        Self {
            inner: Some(inner),
            buf: BytesMut::new(),
        }
    }

    /// Borrow the underlying stream, if still open.
    pub fn get_ref(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Mutably borrow the underlying stream, if still open.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.as_mut()
    }

    /// Consume the transport and return the inner stream, if still open.
    pub fn into_inner(self) -> Option<T> {
        self.inner
    }

    fn stream(&mut self) -> Result<&mut T> {
        self.inner.as_mut().ok_or(TransportError::Closed)
    }
}

impl<T: Read + Write> Transport for StreamTransport<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream()?;
        trace!(?bytes, "writing");

        let mut offset = 0usize;
        while offset < bytes.len() {
            match stream.write(&bytes[offset..]) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        loop {
            match stream.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
    }

    fn read(&mut self, n: usize) -> Result<Bytes> {
        let stream = self.inner.as_mut().ok_or(TransportError::Closed)?;
        self.buf.clear();
        self.buf.resize(n, 0);

        let mut filled = 0usize;
        while filled < n {
            match stream.read(&mut self.buf[filled..]) {
                Ok(0) => {
                    return Err(TransportError::ShortRead {
                        expected: n,
                        received: filled,
                    })
                }
                Ok(read) => filled += read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        let response = self.buf.split_to(n).freeze();
        trace!(bytes = ?response.as_ref(), "read");
        Ok(response)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.inner.take() {
            // Best effort: the stream is dropped either way.
            if let Err(err) = stream.flush() {
                debug!(%err, "flush on close failed");
            }
            debug!("transport closed");
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<T> std::fmt::Debug for StreamTransport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTransport")
            .field("open", &self.inner.is_some())
            .finish()
    }
}
