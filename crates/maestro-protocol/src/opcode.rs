//! Command opcodes.
//!
//! The first group is driven by this workspace. The second group is reserved
//! for board features the controller reports as not implemented; the values
//! are kept so the capability set can name its wire shape.

/// Set the target position of one channel.
pub const SET_TARGET: u8 = 0x04;

/// Set the speed limit of one channel.
pub const SET_SPEED: u8 = 0x07;

/// Set the acceleration limit of one channel.
pub const SET_ACCELERATION: u8 = 0x09;

/// Query the live position of one channel.
pub const GET_POSITION: u8 = 0x10;

/// Query whether any servo is still moving.
pub const GET_MOVING_STATE: u8 = 0x13;

/// Stop the running script.
pub const STOP_SCRIPT: u8 = 0x24;

/// Set the PWM output (12+ channel boards).
pub const SET_PWM: u8 = 0x0A;

/// Set several contiguous targets in one frame (12+ channel boards).
pub const SET_MULTIPLE_TARGETS: u8 = 0x1F;

/// Read and clear the error register.
pub const GET_ERRORS: u8 = 0x21;

/// Send every channel to its home position.
pub const GO_HOME: u8 = 0x22;

/// Restart the script at a subroutine.
pub const RESTART_SCRIPT: u8 = 0x27;

/// Restart the script at a subroutine with one parameter.
pub const RESTART_SCRIPT_WITH_PARAMETER: u8 = 0x28;

/// Returns a human-readable name for an opcode.
pub fn opcode_name(opcode: u8) -> &'static str {
    match opcode {
        SET_TARGET => "SET_TARGET",
        SET_SPEED => "SET_SPEED",
        SET_ACCELERATION => "SET_ACCELERATION",
        GET_POSITION => "GET_POSITION",
        GET_MOVING_STATE => "GET_MOVING_STATE",
        STOP_SCRIPT => "STOP_SCRIPT",
        SET_PWM => "SET_PWM",
        SET_MULTIPLE_TARGETS => "SET_MULTIPLE_TARGETS",
        GET_ERRORS => "GET_ERRORS",
        GO_HOME => "GO_HOME",
        RESTART_SCRIPT => "RESTART_SCRIPT",
        RESTART_SCRIPT_WITH_PARAMETER => "RESTART_SCRIPT_WITH_PARAMETER",
        _ => "UNKNOWN",
    }
}
