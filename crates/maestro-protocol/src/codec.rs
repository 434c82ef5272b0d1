use bytes::{BufMut, BytesMut};

use crate::opcode::{
    GET_MOVING_STATE, GET_POSITION, SET_ACCELERATION, SET_SPEED, SET_TARGET, STOP_SCRIPT,
};

/// Lead-in byte that opens every command frame.
pub const LEAD_IN: u8 = 0xAA;

/// Factory device number of a Maestro board.
pub const DEFAULT_DEVICE_ID: u8 = 0x0C;

/// Preamble: lead-in (1) + device number (1) = 2 bytes.
pub const PREAMBLE_SIZE: usize = 2;

/// Largest value that survives the 7-bit/7-bit split.
pub const MAX_14BIT: u16 = 0x3FFF;

/// Bytes returned by a position query.
pub const POSITION_RESPONSE_LEN: usize = 2;

/// Bytes returned by a moving-state query.
pub const MOVING_STATE_RESPONSE_LEN: usize = 1;

/// A command the controller knows how to put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTarget { channel: u8, position: u16 },
    SetSpeed { channel: u8, speed: u16 },
    SetAcceleration { channel: u8, acceleration: u16 },
    GetPosition { channel: u8 },
    GetMovingState,
    StopScript,
}

impl Command {
    /// The opcode byte that follows the preamble.
    pub fn opcode(&self) -> u8 {
        match self {
            Command::SetTarget { .. } => SET_TARGET,
            Command::SetSpeed { .. } => SET_SPEED,
            Command::SetAcceleration { .. } => SET_ACCELERATION,
            Command::GetPosition { .. } => GET_POSITION,
            Command::GetMovingState => GET_MOVING_STATE,
            Command::StopScript => STOP_SCRIPT,
        }
    }

    /// Number of response bytes the board sends back. Zero for writes.
    pub fn response_len(&self) -> usize {
        match self {
            Command::GetPosition { .. } => POSITION_RESPONSE_LEN,
            Command::GetMovingState => MOVING_STATE_RESPONSE_LEN,
            _ => 0,
        }
    }

    /// The channel addressed by this command, if any.
    pub fn channel(&self) -> Option<u8> {
        match *self {
            Command::SetTarget { channel, .. }
            | Command::SetSpeed { channel, .. }
            | Command::SetAcceleration { channel, .. }
            | Command::GetPosition { channel } => Some(channel),
            Command::GetMovingState | Command::StopScript => None,
        }
    }

    /// Wire size of this command including the preamble.
    pub fn wire_size(&self) -> usize {
        let payload = match self {
            Command::SetTarget { .. }
            | Command::SetSpeed { .. }
            | Command::SetAcceleration { .. } => 3,
            Command::GetPosition { .. } => 1,
            Command::GetMovingState | Command::StopScript => 0,
        };
        PREAMBLE_SIZE + 1 + payload
    }
}

/// The fixed lead-in that prefixes every command.
pub fn encode_device_preamble(device_id: u8) -> [u8; PREAMBLE_SIZE] {
    [LEAD_IN, device_id]
}

/// Split a 14-bit value into two 7-bit bytes, least significant first.
///
/// Bits above 13 are dropped by the mask; range checks belong to the caller.
pub fn encode_14bit(value: u16) -> (u8, u8) {
    let lsb = (value & 0x7F) as u8;
    let msb = ((value >> 7) & 0x7F) as u8;
    (lsb, msb)
}

fn put_channel_value(opcode: u8, channel: u8, value: u16, dst: &mut BytesMut) {
    let (lsb, msb) = encode_14bit(value);
    dst.reserve(4);
    dst.put_u8(opcode);
    dst.put_u8(channel);
    dst.put_u8(lsb);
    dst.put_u8(msb);
}

/// Append a set-target command body.
///
/// ```text
/// ┌──────┬─────────┬─────┬─────┐
/// │ 0x04 │ channel │ lsb │ msb │
/// └──────┴─────────┴─────┴─────┘
/// ```
pub fn encode_set_target(channel: u8, position: u16, dst: &mut BytesMut) {
    put_channel_value(SET_TARGET, channel, position, dst);
}

/// Append a set-speed command body. Same layout as set-target.
pub fn encode_set_speed(channel: u8, speed: u16, dst: &mut BytesMut) {
    put_channel_value(SET_SPEED, channel, speed, dst);
}

/// Append a set-acceleration command body. Same layout as set-target.
pub fn encode_set_acceleration(channel: u8, acceleration: u16, dst: &mut BytesMut) {
    put_channel_value(SET_ACCELERATION, channel, acceleration, dst);
}

/// Append a position query body. The board answers with 2 bytes.
pub fn encode_get_position(channel: u8, dst: &mut BytesMut) {
    dst.reserve(2);
    dst.put_u8(GET_POSITION);
    dst.put_u8(channel);
}

/// Append a moving-state query body. The board answers with 1 byte.
pub fn encode_get_moving_state(dst: &mut BytesMut) {
    dst.put_u8(GET_MOVING_STATE);
}

/// Append a stop-script body. No response.
pub fn encode_stop_script(dst: &mut BytesMut) {
    dst.put_u8(STOP_SCRIPT);
}

/// Encode a full frame: preamble followed by the command body.
pub fn encode_command(device_id: u8, command: &Command, dst: &mut BytesMut) {
    dst.reserve(command.wire_size());
    dst.put_slice(&encode_device_preamble(device_id));
    match *command {
        Command::SetTarget { channel, position } => encode_set_target(channel, position, dst),
        Command::SetSpeed { channel, speed } => encode_set_speed(channel, speed, dst),
        Command::SetAcceleration {
            channel,
            acceleration,
        } => encode_set_acceleration(channel, acceleration, dst),
        Command::GetPosition { channel } => encode_get_position(channel, dst),
        Command::GetMovingState => encode_get_moving_state(dst),
        Command::StopScript => encode_stop_script(dst),
    }
}

/// Decode a position response.
///
/// The msb is shifted by 8, not 7: responses carry full bytes while commands
/// stay 7-bit safe. Not the inverse of [`encode_14bit`].
pub fn decode_position(lsb: u8, msb: u8) -> u16 {
    (u16::from(msb) << 8) + u16::from(lsb)
}

/// Decode a moving-state response. Any nonzero byte means moving.
pub fn decode_moving_state(byte: u8) -> bool {
    byte != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(command: Command) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_command(DEFAULT_DEVICE_ID, &command, &mut buf);
        buf.to_vec()
    }

    #[test]
    fn preamble_bytes() {
        assert_eq!(encode_device_preamble(0x0C), [0xAA, 0x0C]);
        assert_eq!(encode_device_preamble(0x01), [0xAA, 0x01]);
    }

    #[test]
    fn split_recombines_over_full_range() {
        for value in 0..=MAX_14BIT {
            let (lsb, msb) = encode_14bit(value);
            assert!(lsb < 0x80 && msb < 0x80);
            assert_eq!((u16::from(msb) << 7) | u16::from(lsb), value);
        }
    }

    #[test]
    fn split_truncates_above_14_bits() {
        assert_eq!(encode_14bit(0x4000), (0x00, 0x00));
        assert_eq!(encode_14bit(0xFFFF), (0x7F, 0x7F));
    }

    #[test]
    fn set_target_frame() {
        // 300 = 0x12C -> lsb 0x2C, msb 0x02
        assert_eq!(
            frame(Command::SetTarget {
                channel: 3,
                position: 300
            }),
            vec![0xAA, 0x0C, 0x04, 0x03, 0x2C, 0x02]
        );
    }

    #[test]
    fn set_speed_and_acceleration_frames() {
        assert_eq!(
            frame(Command::SetSpeed {
                channel: 5,
                speed: 140
            }),
            vec![0xAA, 0x0C, 0x07, 0x05, 0x0C, 0x01]
        );
        assert_eq!(
            frame(Command::SetAcceleration {
                channel: 0,
                acceleration: 4
            }),
            vec![0xAA, 0x0C, 0x09, 0x00, 0x04, 0x00]
        );
    }

    #[test]
    fn query_and_script_frames() {
        assert_eq!(
            frame(Command::GetPosition { channel: 2 }),
            vec![0xAA, 0x0C, 0x10, 0x02]
        );
        assert_eq!(frame(Command::GetMovingState), vec![0xAA, 0x0C, 0x13]);
        assert_eq!(frame(Command::StopScript), vec![0xAA, 0x0C, 0x24]);
    }

    #[test]
    fn body_encoders_omit_preamble() {
        let mut buf = BytesMut::new();
        encode_set_target(1, 6000, &mut buf);
        assert_eq!(buf.as_ref(), &[0x04, 0x01, 0x70, 0x2E]);
    }

    #[test]
    fn wire_size_matches_encoding() {
        let commands = [
            Command::SetTarget {
                channel: 1,
                position: 1,
            },
            Command::GetPosition { channel: 1 },
            Command::GetMovingState,
            Command::StopScript,
        ];
        for command in commands {
            assert_eq!(frame(command).len(), command.wire_size());
        }
    }

    #[test]
    fn response_lengths() {
        assert_eq!(Command::GetPosition { channel: 0 }.response_len(), 2);
        assert_eq!(Command::GetMovingState.response_len(), 1);
        assert_eq!(Command::StopScript.response_len(), 0);
        assert_eq!(
            Command::SetSpeed {
                channel: 0,
                speed: 0
            }
            .response_len(),
            0
        );
    }

    #[test]
    fn command_channel() {
        assert_eq!(Command::GetPosition { channel: 7 }.channel(), Some(7));
        assert_eq!(Command::StopScript.channel(), None);
    }

    #[test]
    fn position_decode_uses_full_byte_msb() {
        assert_eq!(decode_position(0x70, 0x17), 0x1770);
        // A 7-bit recombination would give 0x2F0 here.
        assert_eq!(decode_position(0x70, 0x05), 0x0570);
        assert_ne!(decode_position(0x2C, 0x02), 300);
    }

    #[test]
    fn moving_state_decode() {
        assert!(!decode_moving_state(0x00));
        assert!(decode_moving_state(0x01));
        assert!(decode_moving_state(0xFF));
    }
}
