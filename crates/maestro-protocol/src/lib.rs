//! Compact serial command protocol for Maestro servo controllers.
//!
//! Every command is framed with:
//! - A 1-byte lead-in (`0xAA`) and a 1-byte device number
//! - A 1-byte opcode
//! - An optional payload of 7-bit-safe bytes
//!
//! Pure transformation only: no state, no I/O, no validation.

pub mod codec;
pub mod opcode;

pub use codec::{
    decode_moving_state, decode_position, encode_14bit, encode_command, encode_device_preamble,
    encode_get_moving_state, encode_get_position, encode_set_acceleration, encode_set_speed,
    encode_set_target, encode_stop_script, Command, DEFAULT_DEVICE_ID, LEAD_IN, MAX_14BIT,
    MOVING_STATE_RESPONSE_LEN, POSITION_RESPONSE_LEN, PREAMBLE_SIZE,
};
pub use opcode::{
    opcode_name, GET_ERRORS, GET_MOVING_STATE, GET_POSITION, GO_HOME, RESTART_SCRIPT,
    RESTART_SCRIPT_WITH_PARAMETER, SET_ACCELERATION, SET_MULTIPLE_TARGETS, SET_PWM, SET_SPEED,
    SET_TARGET, STOP_SCRIPT,
};
