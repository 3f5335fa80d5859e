//! Biblioteca Rust para el sensor de movimiento InvenSense MPU9250
//!
//! Esta biblioteca proporciona una interfaz para controlar el sensor MPU9250,
//! un IMU de 9 ejes con giroscopio, acelerómetro y magnetómetro AK8963 accedido
//! en modo bypass.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;

// Importaciones internas
pub mod compass;
pub mod config;
pub mod controls;
pub mod conversion;
pub mod device;
pub mod interface;
pub mod publish;
pub mod register;
pub mod types;

// Re-exports públicos
pub use config::{MagModeTarget, Mpu9250Config};
pub use conversion::{accel_raw_to_g, gyro_raw_to_dps, mag_sensitivity_factor};
pub use device::{DeviceState, Mpu9250, Mpu9250Error};
pub use publish::{Channel, Mpu9250Component, SensorSink};
pub use types::{AccelFullScale, Address, GyroFullScale, MagMode};

use crate::interface::{I2cInterface, Wire, WireInterface};

/// Crea un nuevo dispositivo MPU9250 usando el bus I2C
pub fn new_i2c_device<I, D, E>(i2c: I, address: Address, delay: D) -> Mpu9250<I2cInterface<I>, D>
where
    I: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
    D: DelayMs<u32>,
{
    let config = Mpu9250Config::default().with_address(address);
    Mpu9250::with_config(I2cInterface::new(i2c), delay, config)
}

/// Crea un nuevo dispositivo MPU9250 sobre un transporte estilo `Wire`
pub fn new_wire_device<W, D>(wire: W, address: Address, delay: D) -> Mpu9250<WireInterface<W>, D>
where
    W: Wire,
    D: DelayMs<u32>,
{
    let config = Mpu9250Config::default().with_address(address);
    Mpu9250::with_config(WireInterface::new(wire), delay, config)
}

/// Abre un bus `/dev/i2c-*` de Linux y crea el dispositivo sobre él
#[cfg(feature = "linux")]
pub fn new_linux_device(
    path: &str,
    address: Address,
) -> Result<
    Mpu9250<I2cInterface<linux_embedded_hal::I2cdev>, linux_embedded_hal::Delay>,
    linux_embedded_hal::i2cdev::linux::LinuxI2CError,
> {
    let i2c = linux_embedded_hal::I2cdev::new(path)?;
    Ok(new_i2c_device(i2c, address, linux_embedded_hal::Delay {}))
}
