use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TransportError};
use crate::stream::StreamTransport;

/// A transport over an open serial port.
pub type SerialTransport = StreamTransport<Box<dyn serialport::SerialPort>>;

/// Serial link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyACM0` or `COM3`.
    pub path: String,
    /// Line speed. The Maestro's USB virtual port ignores it; the TTL port
    /// autodetects it.
    pub baud_rate: u32,
    /// Read/write timeout applied to every blocking call on the port.
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: "/dev/ttyACM0".to_string(),
            baud_rate: 9600,
            timeout: Duration::from_secs(1),
        }
    }
}

/// Open a serial port and wrap it as a [`Transport`](crate::Transport).
pub fn open_serial(config: &SerialConfig) -> Result<SerialTransport> {
    let port = serialport::new(config.path.as_str(), config.baud_rate)
        .timeout(config.timeout)
        .open()
        .map_err(|source| TransportError::Open {
            path: config.path.clone(),
            source,
        })?;

    info!(path = %config.path, baud = config.baud_rate, "opened serial port");
    Ok(StreamTransport::new(port))
}
