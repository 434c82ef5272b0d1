//! Host-side driver for Maestro USB servo controllers.
//!
//! # Crate Structure
//!
//! - [`transport`] — Duplex byte-stream transport (serial port behind `serial` feature)
//! - [`protocol`] — Compact command protocol codec
//! - [`controller`] — Channel state, clamping and command orchestration
//!
//! ```no_run
//! # #[cfg(feature = "serial")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use maestro::controller::{ChannelController, ControllerConfig};
//! use maestro::transport::SerialConfig;
//!
//! let mut maestro = ChannelController::open(ControllerConfig::micro(0x0C), &SerialConfig::default())?;
//! maestro.set_channel_range(0, 4000, 8000)?;
//! maestro.set_target(0, 6000)?;
//! while maestro.is_moving(0)? {}
//! maestro.close()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serial"))]
//! # fn main() {}
//! ```

/// Re-export transport types.
pub mod transport {
    pub use maestro_transport::*;
}

/// Re-export protocol types.
pub mod protocol {
    pub use maestro_protocol::*;
}

/// Re-export controller types.
pub mod controller {
    pub use maestro_controller::*;
}
