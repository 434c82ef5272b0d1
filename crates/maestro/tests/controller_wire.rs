use std::io::{Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use maestro::controller::{ChannelController, ControllerConfig, ControllerError};
use maestro::protocol::{DEFAULT_DEVICE_ID, LEAD_IN};
use maestro::transport::{StreamTransport, TransportError};

/// Scripted board replies on the read side, shared capture on the write side.
#[derive(Clone)]
struct Wire {
    replies: Arc<Mutex<Cursor<Vec<u8>>>>,
    sent: Arc<Mutex<Vec<u8>>>,
}

impl Wire {
    fn new(replies: &[u8]) -> Self {
        Self {
            replies: Arc::new(Mutex::new(Cursor::new(replies.to_vec()))),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn sent(&self) -> Vec<u8> {
        self.sent.lock().unwrap().clone()
    }
}

impl Read for Wire {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.replies.lock().unwrap().read(buf)
    }
}

impl Write for Wire {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.sent.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn micro(wire: &Wire) -> ChannelController<StreamTransport<Wire>> {
    ChannelController::new(
        ControllerConfig::micro(DEFAULT_DEVICE_ID),
        StreamTransport::new(wire.clone()),
    )
    .unwrap()
}

#[test]
fn command_sequence_on_the_wire() {
    let wire = Wire::new(&[0x70, 0x17, 0x01]);
    let mut ctl = micro(&wire);

    ctl.set_target(3, 300).unwrap();
    ctl.set_speed(3, 0).unwrap();
    assert_eq!(ctl.get_position(3).unwrap(), 6000);
    assert!(ctl.get_moving_state().unwrap());
    ctl.stop_script().unwrap();

    assert_eq!(
        wire.sent(),
        vec![
            0xAA, 0x0C, 0x04, 0x03, 0x2C, 0x02, // set target 300
            0xAA, 0x0C, 0x07, 0x03, 0x00, 0x00, // set speed 0
            0xAA, 0x0C, 0x10, 0x03, // get position
            0xAA, 0x0C, 0x13, // get moving state
            0xAA, 0x0C, 0x24, // stop script
        ]
    );
}

#[test]
fn short_read_surfaces_transport_error() {
    let wire = Wire::new(&[0x70]);
    let mut ctl = micro(&wire);
    ctl.set_target(0, 6000).unwrap();

    let err = ctl.get_position(0).unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Transport(TransportError::ShortRead { .. })
    ));
    assert_eq!(ctl.last_target(0).unwrap(), 6000);
}

#[test]
fn out_of_range_writes_nothing() {
    let wire = Wire::new(&[]);
    let mut ctl = micro(&wire);

    assert!(matches!(
        ctl.set_target(6, 6000),
        Err(ControllerError::OutOfRange { .. })
    ));
    assert!(wire.sent().is_empty());
}

#[test]
fn mini_preset_bounds() {
    assert!(ControllerConfig::mini(DEFAULT_DEVICE_ID, 11).is_err());
    assert!(ControllerConfig::mini(DEFAULT_DEVICE_ID, 12).is_ok());
    assert!(ControllerConfig::mini(DEFAULT_DEVICE_ID, 24).is_ok());
    assert!(matches!(
        ControllerConfig::mini(DEFAULT_DEVICE_ID, 25),
        Err(ControllerError::InvalidConfiguration { .. })
    ));
}

#[test]
fn close_then_reuse_fails() {
    let wire = Wire::new(&[]);
    let mut ctl = micro(&wire);
    ctl.close().unwrap();
    ctl.close().unwrap();

    assert!(matches!(
        ctl.stop_script(),
        Err(ControllerError::Transport(TransportError::Closed))
    ));
    assert!(wire.sent().is_empty());
}

/// A minimal board: tracks targets and answers queries with them.
#[cfg(unix)]
fn fake_board(mut stream: std::os::unix::net::UnixStream) -> Vec<u16> {
    let mut targets = vec![0u16; 6];
    let mut header = [0u8; 3];
    loop {
        if stream.read_exact(&mut header).is_err() {
            return targets;
        }
        assert_eq!(header[0], LEAD_IN);
        assert_eq!(header[1], DEFAULT_DEVICE_ID);
        match header[2] {
            0x04 => {
                let mut body = [0u8; 3];
                stream.read_exact(&mut body).unwrap();
                targets[body[0] as usize] = (u16::from(body[2]) << 7) | u16::from(body[1]);
            }
            0x07 | 0x09 => {
                let mut body = [0u8; 3];
                stream.read_exact(&mut body).unwrap();
            }
            0x10 => {
                let mut channel = [0u8; 1];
                stream.read_exact(&mut channel).unwrap();
                let position = targets[channel[0] as usize];
                stream.write_all(&position.to_le_bytes()).unwrap();
            }
            0x13 => stream.write_all(&[0x00]).unwrap(),
            0x24 => {}
            other => panic!("unexpected opcode {other:#04x}"),
        }
    }
}

#[cfg(unix)]
#[test]
fn roundtrip_against_fake_board() {
    let (host, device) = std::os::unix::net::UnixStream::pair().unwrap();
    let board = std::thread::spawn(move || fake_board(device));

    let mut ctl = ChannelController::new(
        ControllerConfig::micro(DEFAULT_DEVICE_ID),
        StreamTransport::new(host),
    )
    .unwrap();

    ctl.set_channel_range(2, 4000, 8000).unwrap();
    ctl.set_acceleration(2, 10).unwrap();
    ctl.set_target(2, 9000).unwrap();

    assert_eq!(ctl.get_position(2).unwrap(), 8000);
    assert!(!ctl.is_moving(2).unwrap());
    assert!(!ctl.get_moving_state().unwrap());
    ctl.close().unwrap();

    let targets = board.join().unwrap();
    assert_eq!(targets[2], 8000);
}
