//! Definiciones de tipos y constantes comunes para el MPU9250

use crate::register::mpu;

/// Dirección I2C del MPU9250, seleccionada por el pin AD0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Address {
    /// AD0 a nivel bajo (0x68)
    Ad0Low = mpu::ADDRESS_AD0_LOW,
    /// AD0 a nivel alto (0x69)
    Ad0High = mpu::ADDRESS_AD0_HIGH,
}

impl Default for Address {
    fn default() -> Self {
        Address::Ad0Low
    }
}

impl From<Address> for u8 {
    fn from(address: Address) -> u8 {
        address as u8
    }
}

/// Escalas completas disponibles para el acelerómetro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AccelFullScale {
    /// ±2g
    Fs2G = 0x00,
    /// ±4g
    Fs4G = 0x08,
    /// ±8g
    Fs8G = 0x10,
    /// ±16g
    Fs16G = 0x18,
}

impl Default for AccelFullScale {
    fn default() -> Self {
        AccelFullScale::Fs16G
    }
}

impl AccelFullScale {
    /// Valor a escribir en ACCEL_CONFIG
    pub fn register_value(self) -> u8 {
        self as u8
    }

    /// Interpreta un selector de ACCEL_CONFIG. Devuelve `None` si no es un modo conocido.
    pub fn from_register(mode: u8) -> Option<Self> {
        match mode {
            0x00 => Some(AccelFullScale::Fs2G),
            0x08 => Some(AccelFullScale::Fs4G),
            0x10 => Some(AccelFullScale::Fs8G),
            0x18 => Some(AccelFullScale::Fs16G),
            _ => None,
        }
    }

    /// Magnitud del fondo de escala en g
    pub fn full_scale_g(self) -> f32 {
        match self {
            AccelFullScale::Fs2G => 2.0,
            AccelFullScale::Fs4G => 4.0,
            AccelFullScale::Fs8G => 8.0,
            AccelFullScale::Fs16G => 16.0,
        }
    }
}

/// Escalas completas disponibles para el giroscopio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GyroFullScale {
    /// ±250 dps
    Fs250Dps = 0x00,
    /// ±500 dps
    Fs500Dps = 0x08,
    /// ±1000 dps
    Fs1000Dps = 0x10,
    /// ±2000 dps
    Fs2000Dps = 0x18,
}

impl Default for GyroFullScale {
    fn default() -> Self {
        GyroFullScale::Fs2000Dps
    }
}

impl GyroFullScale {
    /// Valor a escribir en GYRO_CONFIG
    pub fn register_value(self) -> u8 {
        self as u8
    }

    /// Interpreta un selector de GYRO_CONFIG. Devuelve `None` si no es un modo conocido.
    pub fn from_register(mode: u8) -> Option<Self> {
        match mode {
            0x00 => Some(GyroFullScale::Fs250Dps),
            0x08 => Some(GyroFullScale::Fs500Dps),
            0x10 => Some(GyroFullScale::Fs1000Dps),
            0x18 => Some(GyroFullScale::Fs2000Dps),
            _ => None,
        }
    }

    /// Magnitud del fondo de escala en grados/segundo
    pub fn full_scale_dps(self) -> f32 {
        match self {
            GyroFullScale::Fs250Dps => 250.0,
            GyroFullScale::Fs500Dps => 500.0,
            GyroFullScale::Fs1000Dps => 1000.0,
            GyroFullScale::Fs2000Dps => 2000.0,
        }
    }
}

/// Modos de operación del AK8963 (registro CNTL1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MagMode {
    PowerDown = 0x0,
    Single = 0x1,
    /// Medida continua a 8 Hz
    Continuous8Hz = 0x2,
    /// Disparo externo
    External = 0x4,
    /// Medida continua a 100 Hz
    Continuous100Hz = 0x6,
    SelfTest = 0x8,
    /// Acceso a la ROM de calibración
    FuseRom = 0xF,
}

impl Default for MagMode {
    fn default() -> Self {
        MagMode::Continuous8Hz
    }
}

impl MagMode {
    pub fn register_value(self) -> u8 {
        self as u8
    }
}

/// Datos brutos de un subsistema: un entero con signo por eje [x, y, z]
pub type RawTriple = [i16; 3];

/// Ejes de un subsistema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}
