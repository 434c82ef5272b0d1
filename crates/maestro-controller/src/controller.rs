use bytes::BytesMut;
use maestro_protocol::{
    decode_moving_state, decode_position, encode_command, opcode_name, Command, MAX_14BIT,
};
use maestro_transport::{Transport, TransportError};
use tracing::{debug, info, warn};

use crate::capability::Capability;
use crate::channel::ChannelState;
use crate::config::ControllerConfig;
use crate::error::{ControllerError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 16;

/// A connected servo controller.
///
/// Owns the transport exclusively and releases it on [`close`](Self::close)
/// or drop. All operations block the calling thread; wrap the controller in a
/// `Mutex` to share it between threads.
pub struct ChannelController<T: Transport> {
    config: ControllerConfig,
    channels: Vec<ChannelState>,
    transport: T,
    buf: BytesMut,
}

impl<T: Transport> ChannelController<T> {
    /// Create a controller over an open transport.
    ///
    /// The config is validated first; on failure the transport is closed
    /// before the error is returned.
    pub fn new(config: ControllerConfig, mut transport: T) -> Result<Self> {
        if let Err(err) = config.validate() {
            if let Err(close_err) = transport.close() {
                debug!(err = %close_err, "close after rejected config failed");
            }
            return Err(err);
        }
        debug!(
            device_id = config.device_id,
            channels = config.channel_count,
            "controller ready"
        );
        Ok(Self {
            channels: vec![ChannelState::default(); config.channel_count],
            config,
            transport,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        })
    }

    /// Number of addressable channels.
    pub fn channel_count(&self) -> usize {
        self.config.channel_count
    }

    /// Device number sent with every command.
    pub fn device_id(&self) -> u8 {
        self.config.device_id
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Client-side record of one channel.
    pub fn channel(&self, channel: usize) -> Result<&ChannelState> {
        self.check_channel(channel)?;
        Ok(&self.channels[channel])
    }

    /// Last commanded position of a channel, 0 if never set.
    pub fn last_target(&self, channel: usize) -> Result<u16> {
        Ok(self.channel(channel)?.last_target)
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Whether the transport has been closed.
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    /// Whether the controller drives `capability`. Currently never.
    pub fn supports(&self, _capability: Capability) -> bool {
        false
    }

    /// Store clamp limits for a channel. 0 disables a side.
    ///
    /// `min > max` is accepted; see [`ChannelState::clamp`].
    pub fn set_channel_range(&mut self, channel: usize, min: u16, max: u16) -> Result<()> {
        self.check_channel(channel)?;
        let state = &mut self.channels[channel];
        state.min_limit = min;
        state.max_limit = max;
        debug!(channel, min, max, "channel range set");
        Ok(())
    }

    /// Clamp limits of a channel as `(min, max)`.
    pub fn get_channel_range(&self, channel: usize) -> Result<(u16, u16)> {
        Ok(self.channel(channel)?.range())
    }

    /// Command a channel to a position, clamped to the channel limits.
    ///
    /// No acknowledgement is read. The clamped position is recorded as the
    /// channel's target once the write succeeds.
    pub fn set_target(&mut self, channel: usize, position: u16) -> Result<()> {
        self.check_channel(channel)?;
        let clamped = self.channels[channel].clamp(position);
        if clamped != position {
            debug!(channel, requested = position, clamped, "target clamped");
        }
        if clamped > MAX_14BIT {
            warn!(channel, position = clamped, "target exceeds 14 bits, truncating");
        }
        let position = clamped & MAX_14BIT;

        self.send(Command::SetTarget {
            channel: channel as u8,
            position,
        })?;
        self.channels[channel].last_target = position;
        Ok(())
    }

    /// Set the speed limit of a channel. 0 means unlimited.
    pub fn set_speed(&mut self, channel: usize, speed: u16) -> Result<()> {
        self.check_channel(channel)?;
        self.send(Command::SetSpeed {
            channel: channel as u8,
            speed,
        })
    }

    /// Set the acceleration limit of a channel. 0 means unlimited.
    pub fn set_acceleration(&mut self, channel: usize, acceleration: u16) -> Result<()> {
        self.check_channel(channel)?;
        self.send(Command::SetAcceleration {
            channel: channel as u8,
            acceleration,
        })
    }

    /// Stop the board's running script.
    pub fn stop_script(&mut self) -> Result<()> {
        self.send(Command::StopScript)
    }

    /// Read the live position of a channel from the board.
    pub fn get_position(&mut self, channel: usize) -> Result<u16> {
        self.check_channel(channel)?;
        let response = self.query(Command::GetPosition {
            channel: channel as u8,
        })?;
        Ok(decode_position(response[0], response[1]))
    }

    /// Whether a channel has not yet reached its last commanded target.
    ///
    /// A channel that was never given a target reports `false` without
    /// querying the board.
    pub fn is_moving(&mut self, channel: usize) -> Result<bool> {
        self.check_channel(channel)?;
        let state = self.channels[channel];
        if !state.has_target() {
            return Ok(false);
        }
        Ok(self.get_position(channel)? != state.last_target)
    }

    /// Ask the board whether any servo is still moving.
    pub fn get_moving_state(&mut self) -> Result<bool> {
        let response = self.query(Command::GetMovingState)?;
        Ok(decode_moving_state(response[0]))
    }

    /// Close the transport.
    ///
    /// Calling this again after a successful close is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.transport.is_closed() {
            return Ok(());
        }
        self.transport.close()?;
        info!(device_id = self.config.device_id, "controller closed");
        Ok(())
    }

    /// Send every channel home. Not implemented.
    pub fn go_home(&mut self) -> Result<()> {
        Err(ControllerError::NotImplemented(Capability::GoHome))
    }

    /// Restart the board script. Not implemented.
    pub fn restart_script(&mut self) -> Result<()> {
        Err(ControllerError::NotImplemented(Capability::RestartScript))
    }

    /// Restart the board script with a parameter. Not implemented.
    pub fn restart_script_with_parameters(&mut self, _parameter: u16) -> Result<()> {
        Err(ControllerError::NotImplemented(
            Capability::RestartScriptWithParameters,
        ))
    }

    /// Read the board error register. Not implemented.
    pub fn get_errors(&mut self) -> Result<u16> {
        Err(ControllerError::NotImplemented(Capability::GetErrors))
    }

    /// Set the PWM output. Not implemented.
    pub fn set_pwm(&mut self) -> Result<()> {
        Err(ControllerError::NotImplemented(Capability::SetPwm))
    }

    /// Set several contiguous targets at once. Not implemented.
    pub fn set_multi_target(&mut self) -> Result<()> {
        Err(ControllerError::NotImplemented(Capability::SetMultiTarget))
    }

    fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.config.channel_count {
            return Err(ControllerError::OutOfRange {
                channel,
                channel_count: self.config.channel_count,
            });
        }
        Ok(())
    }

    fn send(&mut self, command: Command) -> Result<()> {
        if self.transport.is_closed() {
            return Err(TransportError::Closed.into());
        }

        self.buf.clear();
        encode_command(self.config.device_id, &command, &mut self.buf);
        debug!(
            opcode = opcode_name(command.opcode()),
            channel = command.channel(),
            "sending command"
        );
        self.transport.write(&self.buf)?;
        Ok(())
    }

    fn query(&mut self, command: Command) -> Result<bytes::Bytes> {
        self.send(command)?;
        let expected = command.response_len();
        let response = self.transport.read(expected)?;
        if response.len() < expected {
            return Err(TransportError::ShortRead {
                expected,
                received: response.len(),
            }
            .into());
        }
        Ok(response)
    }
}

impl<T: Transport> Drop for ChannelController<T> {
    fn drop(&mut self) {
        if self.transport.is_closed() {
            return;
        }
        if let Err(err) = self.transport.close() {
            debug!(%err, "close on drop failed");
        }
    }
}

impl<T: Transport> std::fmt::Debug for ChannelController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelController")
            .field("config", &self.config)
            .field("closed", &self.transport.is_closed())
            .finish()
    }
}

#[cfg(feature = "serial")]
impl ChannelController<maestro_transport::SerialTransport> {
    /// Validate `config`, then open the serial port it will drive.
    ///
    /// An invalid config never opens the device.
    pub fn open(
        config: ControllerConfig,
        serial: &maestro_transport::SerialConfig,
    ) -> Result<Self> {
        config.validate()?;
        let transport = maestro_transport::open_serial(serial)?;
        Self::new(config, transport)
    }
}
