//! Publicación de lecturas hacia sensores del framework anfitrión
//!
//! [`Mpu9250Component`] agrupa el driver y hasta nueve destinos, uno por canal.
//! El planificador externo llama a [`Mpu9250Component::update`] cada
//! [`Mpu9250Component::update_interval`].

use core::time::Duration;

use crate::device::{Mpu9250, Mpu9250Error};
use crate::interface::Interface;
use crate::types::Axis;
use embedded_hal::blocking::delay::DelayMs;

/// Canales lógicos publicados en cada ciclo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    AccelX = 0,
    AccelY = 1,
    AccelZ = 2,
    GyroX = 3,
    GyroY = 4,
    GyroZ = 5,
    MagX = 6,
    MagY = 7,
    MagZ = 8,
}

impl Channel {
    pub const ALL: [Channel; 9] = [
        Channel::AccelX,
        Channel::AccelY,
        Channel::AccelZ,
        Channel::GyroX,
        Channel::GyroY,
        Channel::GyroZ,
        Channel::MagX,
        Channel::MagY,
        Channel::MagZ,
    ];

    pub const ACCEL: [Channel; 3] = [Channel::AccelX, Channel::AccelY, Channel::AccelZ];
    pub const GYRO: [Channel; 3] = [Channel::GyroX, Channel::GyroY, Channel::GyroZ];
    pub const MAG: [Channel; 3] = [Channel::MagX, Channel::MagY, Channel::MagZ];

    pub fn axis(self) -> Axis {
        match self as usize % 3 {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

/// Destino de un canal: recibe un valor por ciclo de sondeo
pub trait SensorSink {
    fn publish_state(&mut self, value: f32);
}

impl<F: FnMut(f32)> SensorSink for F {
    fn publish_state(&mut self, value: f32) {
        self(value)
    }
}

/// Componente de sondeo: driver + destinos por canal
pub struct Mpu9250Component<I, D> {
    device: Mpu9250<I, D>,
    sinks: [Option<Box<dyn SensorSink>>; 9],
}

impl<I, D, E> Mpu9250Component<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
    Mpu9250Error: From<E>,
{
    pub fn new(device: Mpu9250<I, D>) -> Self {
        Self {
            device,
            sinks: Default::default(),
        }
    }

    pub fn device(&self) -> &Mpu9250<I, D> {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut Mpu9250<I, D> {
        &mut self.device
    }

    pub fn release(self) -> Mpu9250<I, D> {
        self.device
    }

    /// Asocia un destino a un canal, reemplazando el anterior
    pub fn set_sink<S: SensorSink + 'static>(&mut self, channel: Channel, sink: S) {
        self.sinks[channel as usize] = Some(Box::new(sink));
    }

    pub fn clear_sink(&mut self, channel: Channel) {
        self.sinks[channel as usize] = None;
    }

    pub fn has_sink(&self, channel: Channel) -> bool {
        self.sinks[channel as usize].is_some()
    }

    /// Intervalo de sondeo configurado
    pub fn update_interval(&self) -> Duration {
        self.device.config().update_interval
    }

    /// Configura el dispositivo y lee el ajuste de fábrica del magnetómetro.
    ///
    /// La inicialización del magnetómetro se intenta aunque la configuración
    /// falle; se devuelve el primer error.
    pub fn setup(&mut self) -> Result<(), Mpu9250Error> {
        let setup = self.device.setup();
        let mode = self.device.config().mag_mode;
        let mag = self.device.begin_mag(mode);
        setup.and(mag)
    }

    /// Ciclo de sondeo: lee acelerómetro, giroscopio y magnetómetro y publica
    /// los nueve canales.
    ///
    /// Un subsistema cuya lectura falla vuelve a publicar su última muestra. Los
    /// demás subsistemas se leen igualmente y se devuelve el primer error.
    pub fn update(&mut self) -> Result<(), Mpu9250Error> {
        let accel = self.device.accel_update();
        let values = self.device.accel();
        self.publish(Channel::ACCEL, values);

        let gyro = self.device.gyro_update();
        let values = self.device.gyro();
        self.publish(Channel::GYRO, values);

        let mag = self.device.mag_update();
        let values = self.device.mag();
        self.publish(Channel::MAG, values);

        accel.and(gyro).and(mag)
    }

    fn publish(&mut self, channels: [Channel; 3], values: [f32; 3]) {
        for channel in channels {
            if let Some(sink) = self.sinks[channel as usize].as_mut() {
                sink.publish_state(values[channel.axis() as usize]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mpu9250Config;
    use crate::device::tests::{device, device_with};
    use crate::interface::mock::MockI2c;
    use crate::register::{ak_reg, mpu};
    use crate::types::{AccelFullScale, MagMode};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<f32>>>, impl FnMut(f32)) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let inner = values.clone();
        (values, move |v| inner.borrow_mut().push(v))
    }

    fn loaded_bus() -> MockI2c {
        let mut i2c = MockI2c::new();
        i2c.set_registers(0x68, mpu::ACCEL_XOUT_H, &[0x10, 0x00, 0x00, 0x00, 0xF0, 0x00]);
        i2c.set_registers(0x68, mpu::GYRO_XOUT_H, &[0x00, 0x00, 0x40, 0x00, 0x00, 0x00]);
        i2c.set_registers(0x0C, ak_reg::HXL, &[0x00, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00]);
        i2c
    }

    #[test]
    fn test_channel_axes() {
        assert_eq!(Channel::AccelX.axis(), Axis::X);
        assert_eq!(Channel::GyroY.axis(), Axis::Y);
        assert_eq!(Channel::MagZ.axis(), Axis::Z);
        assert_eq!(Channel::ALL.len(), 9);
    }

    #[test]
    fn test_update_publishes_attached_channels() {
        let config = Mpu9250Config::default().with_accel_fullscale(AccelFullScale::Fs4G);
        let mut component = Mpu9250Component::new(device_with(loaded_bus(), config));

        let (accel_x, sink) = recorder();
        component.set_sink(Channel::AccelX, sink);
        let (accel_z, sink) = recorder();
        component.set_sink(Channel::AccelZ, sink);
        let (gyro_y, sink) = recorder();
        component.set_sink(Channel::GyroY, sink);
        let (mag_z, sink) = recorder();
        component.set_sink(Channel::MagZ, sink);

        component.update().unwrap();

        assert_eq!(*accel_x.borrow(), vec![0.5]);
        assert_eq!(*accel_z.borrow(), vec![-0.5]);
        assert_eq!(*gyro_y.borrow(), vec![1000.0]);
        assert_eq!(*mag_z.borrow(), vec![10.0]);
        assert!(!component.has_sink(Channel::AccelY));
    }

    #[test]
    fn test_failed_subsystem_does_not_stop_others() {
        let mut i2c = loaded_bus();
        i2c.fail_on(0x68, mpu::ACCEL_XOUT_H);
        let mut component = Mpu9250Component::new(device(i2c));
        let (accel_x, sink) = recorder();
        component.set_sink(Channel::AccelX, sink);
        let (gyro_y, sink) = recorder();
        component.set_sink(Channel::GyroY, sink);
        let (mag_z, sink) = recorder();
        component.set_sink(Channel::MagZ, sink);

        let err = component.update().unwrap_err();
        assert_eq!(err, Mpu9250Error::BusTransactionFailed);
        // Sin muestra previa el valor congelado es 0
        assert_eq!(*accel_x.borrow(), vec![0.0]);
        assert_eq!(*gyro_y.borrow(), vec![1000.0]);
        assert_eq!(*mag_z.borrow(), vec![10.0]);
    }

    #[test]
    fn test_clear_sink_discards_values() {
        let mut component = Mpu9250Component::new(device(loaded_bus()));
        let (accel_x, sink) = recorder();
        component.set_sink(Channel::AccelX, sink);
        component.clear_sink(Channel::AccelX);

        component.update().unwrap();
        assert!(accel_x.borrow().is_empty());
    }

    #[test]
    fn test_failed_read_freezes_value_across_cycles() {
        let mut component = Mpu9250Component::new(device(loaded_bus()));
        let (accel_x, sink) = recorder();
        component.set_sink(Channel::AccelX, sink);

        component.update().unwrap();
        component
            .device_mut()
            .interface_mut()
            .inner_mut()
            .fail_on(0x68, mpu::ACCEL_XOUT_H);
        assert!(component.update().is_err());

        // 0x1000 a 16 g
        assert_eq!(*accel_x.borrow(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_setup_reads_rom_and_sets_mode() {
        let mut i2c = loaded_bus();
        i2c.set_registers(0x0C, ak_reg::ASAX, &[0x00, 0x80, 0x80]);
        let mut component = Mpu9250Component::new(device(i2c));

        component.setup().unwrap();
        assert_eq!(component.device().mag_adjustment(), [0x00, 0x80, 0x80]);
        assert_eq!(component.update_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_setup_failure_still_reads_rom() {
        let mut i2c = loaded_bus();
        i2c.set_registers(0x0C, ak_reg::ASAX, &[0x00, 0x80, 0xFF]);
        i2c.fail_on(0x68, mpu::USER_CTRL);
        let mut component = Mpu9250Component::new(device(i2c));

        assert_eq!(component.setup(), Err(Mpu9250Error::BusTransactionFailed));
        assert_eq!(component.device().mag_adjustment(), [0x00, 0x80, 0xFF]);
        assert_eq!(component.device().mag_mode(), MagMode::Continuous8Hz);
    }
}
