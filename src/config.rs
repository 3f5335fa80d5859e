//! Configuración del driver MPU9250

use core::time::Duration;

use crate::types::{AccelFullScale, Address, GyroFullScale, MagMode};

/// Intervalo de sondeo por defecto del componente
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(1000);

/// Registro en el que `setup` escribe el modo del magnetómetro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagModeTarget {
    /// CNTL1 del AK8963, accedido directamente gracias al bypass
    Ak8963Cntl1,
    /// Registro 0x24 del MPU9250, como hacía el componente original
    MasterCtrl,
}

impl Default for MagModeTarget {
    fn default() -> Self {
        MagModeTarget::Ak8963Cntl1
    }
}

/// Configuración completa del dispositivo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mpu9250Config {
    /// Dirección I2C del MPU9250
    pub address: Address,
    /// Escala del acelerómetro escrita en `setup`
    pub accel_fullscale: AccelFullScale,
    /// Escala del giroscopio escrita en `setup`
    pub gyro_fullscale: GyroFullScale,
    /// Modo del magnetómetro escrito en `setup`
    pub mag_mode: MagMode,
    pub mag_mode_target: MagModeTarget,
    /// Offset aditivo por eje del magnetómetro
    pub mag_offset: [i16; 3],
    /// Intervalo con el que el planificador externo debe llamar a `update`
    pub update_interval: Duration,
}

impl Default for Mpu9250Config {
    fn default() -> Self {
        Self {
            address: Address::default(),
            accel_fullscale: AccelFullScale::Fs16G,
            gyro_fullscale: GyroFullScale::Fs2000Dps,
            mag_mode: MagMode::Continuous8Hz,
            mag_mode_target: MagModeTarget::default(),
            mag_offset: [0; 3],
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}

impl Mpu9250Config {
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn with_accel_fullscale(mut self, scale: AccelFullScale) -> Self {
        self.accel_fullscale = scale;
        self
    }

    pub fn with_gyro_fullscale(mut self, scale: GyroFullScale) -> Self {
        self.gyro_fullscale = scale;
        self
    }

    pub fn with_mag_mode(mut self, mode: MagMode) -> Self {
        self.mag_mode = mode;
        self
    }

    pub fn with_mag_mode_target(mut self, target: MagModeTarget) -> Self {
        self.mag_mode_target = target;
        self
    }

    pub fn with_mag_offset(mut self, offset: [i16; 3]) -> Self {
        self.mag_offset = offset;
        self
    }

    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }
}
