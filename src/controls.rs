//! Controles de escala para el acelerómetro y el giroscopio

use crate::device::{Mpu9250, Mpu9250Error};
use crate::interface::Interface;
use crate::register::mpu;
use crate::types::{AccelFullScale, GyroFullScale};
use embedded_hal::blocking::delay::DelayMs;

impl<I, D, E> Mpu9250<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
    Mpu9250Error: From<E>,
{
    /// Configura la escala del acelerómetro a partir del selector de ACCEL_CONFIG.
    ///
    /// Devuelve `Ok(false)` sin tocar el bus ni la escala actual si el modo no es
    /// uno de 0x00, 0x08, 0x10 o 0x18.
    pub fn begin_accel(&mut self, mode: u8) -> Result<bool, Mpu9250Error> {
        match AccelFullScale::from_register(mode) {
            Some(scale) => {
                self.set_accel_fullscale(scale)?;
                Ok(true)
            }
            None => {
                log::debug!("Modo de acelerómetro desconocido 0x{:02X}, se ignora", mode);
                Ok(false)
            }
        }
    }

    /// Configura la escala del giroscopio a partir del selector de GYRO_CONFIG.
    ///
    /// Igual que [`begin_accel`](Self::begin_accel), un modo desconocido no hace nada.
    pub fn begin_gyro(&mut self, mode: u8) -> Result<bool, Mpu9250Error> {
        match GyroFullScale::from_register(mode) {
            Some(scale) => {
                self.set_gyro_fullscale(scale)?;
                Ok(true)
            }
            None => {
                log::debug!("Modo de giroscopio desconocido 0x{:02X}, se ignora", mode);
                Ok(false)
            }
        }
    }

    /// Establece la escala completa del acelerómetro
    pub fn set_accel_fullscale(&mut self, scale: AccelFullScale) -> Result<(), Mpu9250Error> {
        self.base_state.accel_fullscale = scale;
        self.write_reg(mpu::ACCEL_CONFIG, scale.register_value())?;
        self.settle();
        Ok(())
    }

    /// Establece la escala completa del giroscopio
    pub fn set_gyro_fullscale(&mut self, scale: GyroFullScale) -> Result<(), Mpu9250Error> {
        self.base_state.gyro_fullscale = scale;
        self.write_reg(mpu::GYRO_CONFIG, scale.register_value())?;
        self.settle();
        Ok(())
    }

    pub fn accel_fullscale(&self) -> AccelFullScale {
        self.base_state.accel_fullscale
    }

    pub fn gyro_fullscale(&self) -> GyroFullScale {
        self.base_state.gyro_fullscale
    }
}
