//! Per-channel limits and commanded target.

/// Client-side record for one servo channel.
///
/// A limit of 0 disables that side of the clamp. Limits are never
/// cross-checked, so `min_limit > max_limit` is representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelState {
    pub min_limit: u16,
    pub max_limit: u16,
    /// Last commanded (clamped) position. Not a confirmed live position.
    pub last_target: u16,
}

impl ChannelState {
    /// Apply the channel limits to a requested position.
    ///
    /// The max clamp runs first and the min clamp second, so with inverted
    /// limits the result is `min_limit`.
    pub fn clamp(&self, position: u16) -> u16 {
        let mut position = position;
        if self.max_limit > 0 && position > self.max_limit {
            position = self.max_limit;
        }
        if self.min_limit > 0 && position < self.min_limit {
            position = self.min_limit;
        }
        position
    }

    /// Limits as `(min, max)`.
    pub fn range(&self) -> (u16, u16) {
        (self.min_limit, self.max_limit)
    }

    /// Whether a target has ever been commanded.
    pub fn has_target(&self) -> bool {
        self.last_target != 0
    }
}
