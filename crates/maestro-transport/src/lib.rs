//! Duplex byte-stream transport for Maestro servo controllers.
//!
//! The controller never talks to a device directly. It drives a [`Transport`],
//! which is satisfied by:
//! - [`StreamTransport`] over any `Read + Write` stream (test doubles, sockets)
//! - a serial port opened with [`open_serial`] (behind the `serial` feature)
//!
//! This is the lowest layer of the workspace. Everything else builds on top of
//! the [`Transport`] trait provided here.

pub mod error;
pub mod stream;
pub mod traits;

#[cfg(feature = "serial")]
pub mod serial;

pub use error::{Result, TransportError};
pub use stream::StreamTransport;
pub use traits::Transport;

#[cfg(feature = "serial")]
pub use serial::{open_serial, SerialConfig, SerialTransport};
