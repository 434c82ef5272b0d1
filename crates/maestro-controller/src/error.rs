use crate::capability::Capability;

/// Errors that can occur in controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Channel index outside the board's channel range.
    #[error("channel {channel} out of range (board has {channel_count} channels)")]
    OutOfRange { channel: usize, channel_count: usize },

    /// Channel count outside the bounds of the selected board.
    #[error("invalid channel count {channel_count} (expected {min}..={max})")]
    InvalidConfiguration {
        channel_count: usize,
        min: usize,
        max: usize,
    },

    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] maestro_transport::TransportError),

    /// The board feature exists but is not driven by this crate.
    #[error("{0} is not implemented")]
    NotImplemented(Capability),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
