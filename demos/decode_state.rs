//! Decodes a few registers captured from an MX-28 and prints them in physical units.
//!
//! Run with `cargo run --example decode_state -- -v` to see the codec trace.

mod logging;

use dynamixel_conversion::registers::{self, Alarm, BaudRate, ModelNumber, PresentState, Voltage};
use dynamixel_conversion::{baudrate_to_raw, encode_register, RawValue};

fn main() -> Result<(), dynamixel_conversion::Error> {
    let verbosity = std::env::args().filter(|arg| arg == "-v").count() as u8;
    logging::init("decode_state", verbosity);

    let model = registers::read::<ModelNumber>(&[0x1d, 0x00], "")?;
    log::info!("model: {}", model);

    // present load, speed and position as returned by a single read
    let state = [0xf4, 0x01, 0x64, 0x00, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00];
    let (load, speed, position) = registers::read::<PresentState>(&state, model)?;
    log::info!("position: {position} deg, speed: {speed} deg/s, load: {load} %");

    log::info!("voltage: {} V", registers::read::<Voltage>(&[121], model)?);
    log::info!("alarms: {:?}", registers::read::<Alarm>(&[0x24], model)?);
    log::info!("baud rate: {}", registers::read::<BaudRate>(&[34], model)?);

    // 115200 is not in the table, the closest rate within 5% is used
    let code = baudrate_to_raw(115_200.0, model)?;
    log::info!(
        "baud rate code for 115200: {} -> {:?}",
        code,
        encode_register(&RawValue::Single(code.into()), 1)?
    );

    if let Err(e) = baudrate_to_raw(300.0, model) {
        log::error!("{e}");
    }
    Ok(())
}
