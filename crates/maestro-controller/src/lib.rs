//! Channel state and command orchestration for Maestro servo controllers.
//!
//! This is the layer applications use. Build a [`ControllerConfig`] for the
//! board, hand a [`Transport`](maestro_transport::Transport) to
//! [`ChannelController::new`], and drive channels by index.

pub mod capability;
pub mod channel;
pub mod config;
pub mod controller;
pub mod error;

pub use capability::Capability;
pub use channel::ChannelState;
pub use config::{
    ControllerConfig, MAX_CHANNELS, MICRO_CHANNELS, MINI_MAX_CHANNELS, MINI_MIN_CHANNELS,
};
pub use controller::ChannelController;
pub use error::{ControllerError, Result};
