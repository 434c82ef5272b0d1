use maestro_protocol::DEFAULT_DEVICE_ID;
use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, Result};

/// Channels on the 6-channel board.
pub const MICRO_CHANNELS: usize = 6;

/// Smallest channel count of the expandable board.
pub const MINI_MIN_CHANNELS: usize = 12;

/// Largest channel count of the expandable board.
pub const MINI_MAX_CHANNELS: usize = 24;

/// Largest channel count any board in the family exposes.
pub const MAX_CHANNELS: usize = 24;

/// Controller construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Device number sent after the lead-in of every command.
    pub device_id: u8,
    /// Number of addressable channels. Fixed for the lifetime of a controller.
    pub channel_count: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID,
            channel_count: MAX_CHANNELS,
        }
    }
}

impl ControllerConfig {
    /// Generic board with `channel_count` channels in `1..=24`.
    pub fn new(device_id: u8, channel_count: usize) -> Result<Self> {
        let config = Self {
            device_id,
            channel_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// The 6-channel board.
    pub fn micro(device_id: u8) -> Self {
        Self {
            device_id,
            channel_count: MICRO_CHANNELS,
        }
    }

    /// The expandable board, 12 to 24 channels.
    pub fn mini(device_id: u8, channel_count: usize) -> Result<Self> {
        if !(MINI_MIN_CHANNELS..=MINI_MAX_CHANNELS).contains(&channel_count) {
            return Err(ControllerError::InvalidConfiguration {
                channel_count,
                min: MINI_MIN_CHANNELS,
                max: MINI_MAX_CHANNELS,
            });
        }
        Ok(Self {
            device_id,
            channel_count,
        })
    }

    /// Parse a JSON config and validate it.
    ///
    /// Missing fields fall back to [`ControllerConfig::default`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the channel count against the family-wide bounds.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CHANNELS).contains(&self.channel_count) {
            return Err(ControllerError::InvalidConfiguration {
                channel_count: self.channel_count,
                min: 1,
                max: MAX_CHANNELS,
            });
        }
        Ok(())
    }
}
