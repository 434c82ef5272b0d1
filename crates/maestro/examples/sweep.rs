//! Sweep one servo between two positions and report where it lands.
//!
//! Run with:
//!   cargo run --example sweep --features serial -- /dev/ttyACM0 0
//!
//! Positions are in quarter-microseconds (6000 = 1.5 ms, centered).

use std::thread;
use std::time::Duration;

use maestro::controller::{ChannelController, ControllerConfig};
use maestro::protocol::DEFAULT_DEVICE_ID;
use maestro::transport::SerialConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let serial = SerialConfig {
        path: args.next().unwrap_or_else(|| SerialConfig::default().path),
        ..SerialConfig::default()
    };
    let channel: usize = args.next().map(|c| c.parse()).transpose()?.unwrap_or(0);

    let mut maestro = ChannelController::open(ControllerConfig::micro(DEFAULT_DEVICE_ID), &serial)?;
    maestro.set_channel_range(channel, 4000, 8000)?;
    maestro.set_speed(channel, 60)?;
    maestro.set_acceleration(channel, 10)?;

    for target in [4000, 8000, 6000] {
        maestro.set_target(channel, target)?;
        while maestro.is_moving(channel)? {
            thread::sleep(Duration::from_millis(20));
        }
        eprintln!(
            "channel {channel} reached {}",
            maestro.get_position(channel)?
        );
    }

    maestro.close()?;
    Ok(())
}
