use embedded_hal::blocking::delay::DelayMs;

use crate::config::{MagModeTarget, Mpu9250Config};
use crate::conversion::{accel_axis_to_g, accel_raw_to_g, decode_be_triple, gyro_axis_to_dps, gyro_raw_to_dps};
use crate::interface::Interface;
use crate::register::{ak_reg, buffer_len, mpu, values};
use crate::types::{AccelFullScale, Axis, GyroFullScale, MagMode, RawTriple};

/// Tiempo de estabilización tras un cambio de modo (ms)
pub const SETTLE_DELAY_MS: u32 = 10;

// Define the device structure and enums
pub struct Mpu9250<I, D> {
    pub(crate) interface: I,
    pub(crate) base_state: BaseState,
    pub(crate) delay: D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mpu9250Error {
    /// El transporte devolvió error o un estado de fin de transacción distinto de cero
    BusTransactionFailed,
    /// Se recibieron menos bytes de los solicitados
    Incomplete,
    InvalidParameter,
}

impl Mpu9250Error {
    /// Código de estado de un byte equivalente (0 queda reservado para éxito)
    pub fn status_code(&self) -> u8 {
        match self {
            Mpu9250Error::BusTransactionFailed => 1,
            Mpu9250Error::Incomplete => 2,
            Mpu9250Error::InvalidParameter => 3,
        }
    }
}

/// Estado de configuración del dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Uninitialized,
    Configuring,
    Ready,
}

/// Últimas muestras decodificadas de cada subsistema.
///
/// Solo se sobrescriben cuando la lectura correspondiente tiene éxito.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSamples {
    pub accel: RawTriple,
    pub gyro: RawTriple,
    pub mag: RawTriple,
    /// Registro ST2 del AK8963 leído junto con la medida
    pub mag_status: u8,
}

/// Estado base del dispositivo MPU9250
#[derive(Debug, Clone)]
pub struct BaseState {
    pub config: Mpu9250Config,
    pub state: DeviceState,
    pub accel_fullscale: AccelFullScale,
    pub gyro_fullscale: GyroFullScale,
    pub mag_mode: MagMode,
    /// Ajuste de sensibilidad de fábrica (ASA) del AK8963
    pub mag_adjust: [u8; 3],
    pub mag_offset: [i16; 3],
    pub samples: RawSamples,
}

impl BaseState {
    fn from_config(config: Mpu9250Config) -> Self {
        Self {
            config,
            state: DeviceState::Uninitialized,
            accel_fullscale: config.accel_fullscale,
            gyro_fullscale: config.gyro_fullscale,
            mag_mode: config.mag_mode,
            // 128 es neutro hasta que begin_mag lea la ROM
            mag_adjust: [128; 3],
            mag_offset: config.mag_offset,
            samples: RawSamples::default(),
        }
    }
}

impl<I, D, E> Mpu9250<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
    Mpu9250Error: From<E>,
{
    /// Create a new instance of Mpu9250 with the default configuration
    pub fn new(interface: I, delay: D) -> Self {
        Self::with_config(interface, delay, Mpu9250Config::default())
    }

    /// Crea una instancia con una configuración concreta
    pub fn with_config(interface: I, delay: D, config: Mpu9250Config) -> Self {
        Self {
            interface,
            base_state: BaseState::from_config(config),
            delay,
        }
    }

    /// Consume el driver y devuelve la interfaz y el delay
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }

    /// Dirección I2C del MPU9250
    pub fn address(&self) -> u8 {
        self.base_state.config.address.into()
    }

    pub fn config(&self) -> &Mpu9250Config {
        &self.base_state.config
    }

    pub fn state(&self) -> DeviceState {
        self.base_state.state
    }

    /// Últimas muestras brutas decodificadas
    pub fn raw_samples(&self) -> &RawSamples {
        &self.base_state.samples
    }

    /// Escribe un registro del MPU9250
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Mpu9250Error> {
        let addr = self.address();
        self.write_reg_to(addr, reg, value)
    }

    /// Lee registros consecutivos del MPU9250
    pub fn read_regs(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Mpu9250Error> {
        let addr = self.address();
        self.read_regs_from(addr, reg, data)
    }

    /// Escribe un registro en cualquier dispositivo del bus
    pub(crate) fn write_reg_to(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Mpu9250Error> {
        self.interface.write_reg(addr, reg, value).map_err(|e| {
            let err = Mpu9250Error::from(e);
            log::warn!(
                "Error escribiendo 0x{:02X} en el registro 0x{:02X} del dispositivo 0x{:02X}: {:?}",
                value,
                reg,
                addr,
                err
            );
            err
        })
    }

    /// Lee registros consecutivos de cualquier dispositivo del bus
    pub(crate) fn read_regs_from(
        &mut self,
        addr: u8,
        reg: u8,
        data: &mut [u8],
    ) -> Result<(), Mpu9250Error> {
        self.interface.read_regs(addr, reg, data).map_err(|e| {
            let err = Mpu9250Error::from(e);
            log::warn!(
                "Error leyendo {} bytes desde el registro 0x{:02X} del dispositivo 0x{:02X}: {:?}",
                data.len(),
                reg,
                addr,
                err
            );
            err
        })
    }

    #[cfg(test)]
    pub(crate) fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    pub(crate) fn settle(&mut self) {
        self.delay.delay_ms(SETTLE_DELAY_MS);
    }

    /// Configura el dispositivo.
    ///
    /// Escribe, en este orden: escala del acelerómetro, escala del giroscopio,
    /// bypass I2C, USER_CTRL, PWR_MGMT_1 y modo del magnetómetro. Se intentan
    /// todas las escrituras aunque alguna falle; el estado pasa a `Ready` igualmente
    /// y se devuelve el primer error.
    pub fn setup(&mut self) -> Result<(), Mpu9250Error> {
        let addr = self.address();
        log::debug!("Inicializando MPU9250 en 0x{:02X}", addr);
        self.base_state.state = DeviceState::Configuring;

        let (mag_addr, mag_reg) = match self.base_state.config.mag_mode_target {
            MagModeTarget::Ak8963Cntl1 => (ak_reg::ADDRESS, ak_reg::CNTL1),
            MagModeTarget::MasterCtrl => (addr, mpu::I2C_MST_CTRL),
        };
        let steps = [
            (addr, mpu::ACCEL_CONFIG, self.base_state.accel_fullscale.register_value()),
            (addr, mpu::GYRO_CONFIG, self.base_state.gyro_fullscale.register_value()),
            (addr, mpu::INT_PIN_CFG, values::BYPASS_EN),
            (addr, mpu::USER_CTRL, values::USER_CTRL_CLEAR),
            (addr, mpu::PWR_MGMT_1, values::CLKSEL_AUTO),
            (mag_addr, mag_reg, self.base_state.mag_mode.register_value()),
        ];

        let mut result = Ok(());
        for (dev, reg, value) in steps {
            if let Err(e) = self.write_reg_to(dev, reg, value) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        self.base_state.state = DeviceState::Ready;
        match result {
            Ok(()) => log::debug!("MPU9250 configurado"),
            Err(e) => log::warn!("MPU9250 configurado con errores: {:?}", e),
        }
        result
    }

    /// Lee el registro WHO_AM_I (0x71 en un MPU9250)
    pub fn who_am_i(&mut self) -> Result<u8, Mpu9250Error> {
        let mut buf = [0u8];
        self.read_regs(mpu::WHO_AM_I, &mut buf)?;
        Ok(buf[0])
    }

    /// Lee los 6 bytes del acelerómetro y actualiza la muestra.
    ///
    /// Si la lectura falla la muestra anterior se conserva.
    pub fn accel_update(&mut self) -> Result<(), Mpu9250Error> {
        let mut buf = [0u8; buffer_len::ACCEL];
        self.read_regs(mpu::ACCEL_XOUT_H, &mut buf)?;
        self.base_state.samples.accel = decode_be_triple(&buf);
        Ok(())
    }

    /// Lee los 6 bytes del giroscopio y actualiza la muestra.
    pub fn gyro_update(&mut self) -> Result<(), Mpu9250Error> {
        let mut buf = [0u8; buffer_len::GYRO];
        self.read_regs(mpu::GYRO_XOUT_H, &mut buf)?;
        self.base_state.samples.gyro = decode_be_triple(&buf);
        Ok(())
    }

    /// Aceleración en G [x, y, z] de la última muestra
    pub fn accel(&self) -> [f32; 3] {
        accel_raw_to_g(self.base_state.samples.accel, self.base_state.accel_fullscale)
    }

    /// Velocidad angular en grados/segundo [x, y, z] de la última muestra
    pub fn gyro(&self) -> [f32; 3] {
        gyro_raw_to_dps(self.base_state.samples.gyro, self.base_state.gyro_fullscale)
    }

    pub fn accel_axis(&self, axis: Axis) -> f32 {
        accel_axis_to_g(
            self.base_state.samples.accel[axis as usize],
            self.base_state.accel_fullscale,
        )
    }

    pub fn gyro_axis(&self, axis: Axis) -> f32 {
        gyro_axis_to_dps(
            self.base_state.samples.gyro[axis as usize],
            self.base_state.gyro_fullscale,
        )
    }

    pub fn accel_x(&self) -> f32 {
        self.accel_axis(Axis::X)
    }

    pub fn accel_y(&self) -> f32 {
        self.accel_axis(Axis::Y)
    }

    pub fn accel_z(&self) -> f32 {
        self.accel_axis(Axis::Z)
    }

    pub fn gyro_x(&self) -> f32 {
        self.gyro_axis(Axis::X)
    }

    pub fn gyro_y(&self) -> f32 {
        self.gyro_axis(Axis::Y)
    }

    pub fn gyro_z(&self) -> f32 {
        self.gyro_axis(Axis::Z)
    }
}
