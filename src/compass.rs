//! Implementación del magnetómetro auxiliar AK8963
//!
//! Con el bypass I2C activo (ver [`Mpu9250::setup`]) el AK8963 aparece en el bus
//! como un dispositivo independiente en la dirección 0x0C. Sus registros de
//! medida son little-endian, al contrario que los del MPU9250.

use crate::conversion::{decode_le_triple, mag_axis_adjusted, mag_raw_to_adjusted};
use crate::device::{Mpu9250, Mpu9250Error};
use crate::interface::Interface;
use crate::register::{ak_reg, buffer_len};
use crate::types::{Axis, MagMode};
use embedded_hal::blocking::delay::DelayMs;

/// Implementación para el soporte del magnetómetro
impl<I, D, E> Mpu9250<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
    Mpu9250Error: From<E>,
{
    /// Inicializa el magnetómetro leyendo su ajuste de fábrica.
    ///
    /// Secuencia: power down, modo fuse ROM, lectura de ASAX..ASAZ, power down
    /// y finalmente el modo pedido.
    ///
    /// Todos los pasos se ejecutan aunque alguno falle, de modo que el AK8963
    /// nunca queda en modo fuse ROM. Se devuelve el primer error. Si la lectura
    /// de la ROM falla se conserva el ajuste anterior.
    pub fn begin_mag(&mut self, mode: MagMode) -> Result<(), Mpu9250Error> {
        let power_down = self.set_mag_mode(MagMode::PowerDown);
        let fuse_rom = self.set_mag_mode(MagMode::FuseRom);

        let mut asa = [0u8; buffer_len::MAG_ADJUST];
        let rom = self.read_regs_from(ak_reg::ADDRESS, ak_reg::ASAX, &mut asa);
        if rom.is_ok() {
            self.base_state.mag_adjust = asa;
            log::info!(
                "Ajuste de sensibilidad del AK8963: x={}, y={}, z={}",
                asa[0],
                asa[1],
                asa[2]
            );
        }

        let rom_power_down = self.set_mag_mode(MagMode::PowerDown);
        let target = self.set_mag_mode(mode);

        power_down.and(fuse_rom).and(rom).and(rom_power_down).and(target)
    }

    /// Cambia el modo de operación del AK8963 y espera a que se estabilice
    pub fn set_mag_mode(&mut self, mode: MagMode) -> Result<(), Mpu9250Error> {
        self.write_reg_to(ak_reg::ADDRESS, ak_reg::CNTL1, mode.register_value())?;
        self.base_state.mag_mode = mode;
        self.settle();
        Ok(())
    }

    pub fn mag_mode(&self) -> MagMode {
        self.base_state.mag_mode
    }

    /// Lee el registro WIA del AK8963 (0x48)
    pub fn mag_who_am_i(&mut self) -> Result<u8, Mpu9250Error> {
        let mut buf = [0u8];
        self.read_regs_from(ak_reg::ADDRESS, ak_reg::WIA, &mut buf)?;
        Ok(buf[0])
    }

    /// Lee los 7 bytes de medida (HXL..ST2) y actualiza la muestra.
    ///
    /// Leer ST2 libera al AK8963 para la siguiente medida.
    pub fn mag_update(&mut self) -> Result<(), Mpu9250Error> {
        let mut buf = [0u8; buffer_len::MAG];
        self.read_regs_from(ak_reg::ADDRESS, ak_reg::HXL, &mut buf)?;
        self.base_state.samples.mag = decode_le_triple(&buf);
        self.base_state.samples.mag_status = buf[(ak_reg::ST2 - ak_reg::HXL) as usize];
        Ok(())
    }

    /// Ajuste de sensibilidad de fábrica (ASA) por eje
    pub fn mag_adjustment(&self) -> [u8; 3] {
        self.base_state.mag_adjust
    }

    pub fn mag_offset(&self) -> [i16; 3] {
        self.base_state.mag_offset
    }

    /// Establece el offset aditivo de los tres ejes
    pub fn set_mag_offset(&mut self, offset: [i16; 3]) {
        self.base_state.mag_offset = offset;
    }

    pub fn set_mag_axis_offset(&mut self, axis: Axis, offset: i16) {
        self.base_state.mag_offset[axis as usize] = offset;
    }

    /// Campo magnético [x, y, z] con ajuste de fábrica y offset aplicados
    pub fn mag(&self) -> [f32; 3] {
        mag_raw_to_adjusted(
            self.base_state.samples.mag,
            self.base_state.mag_adjust,
            self.base_state.mag_offset,
        )
    }

    pub fn mag_axis(&self, axis: Axis) -> f32 {
        let i = axis as usize;
        mag_axis_adjusted(
            self.base_state.samples.mag[i],
            self.base_state.mag_adjust[i],
            self.base_state.mag_offset[i],
        )
    }

    pub fn mag_x(&self) -> f32 {
        self.mag_axis(Axis::X)
    }

    pub fn mag_y(&self) -> f32 {
        self.mag_axis(Axis::Y)
    }

    pub fn mag_z(&self) -> f32 {
        self.mag_axis(Axis::Z)
    }
}

#[cfg(test)]
mod tests {
    use crate::device::tests::device;
    use crate::device::Mpu9250Error;
    use crate::interface::mock::{MockI2c, Transaction};
    use crate::register::{ak_reg, values};
    use crate::types::{Axis, MagMode};

    #[test]
    fn test_begin_mag_sequence() {
        let mut i2c = MockI2c::new();
        i2c.set_registers(0x0C, ak_reg::ASAX, &[0x80, 0x00, 0xFF]);
        let mut dev = device(i2c);

        dev.begin_mag(MagMode::Continuous100Hz).unwrap();
        assert_eq!(dev.mag_adjustment(), [0x80, 0x00, 0xFF]);
        assert_eq!(dev.mag_mode(), MagMode::Continuous100Hz);

        let (iface, delay) = dev.release();
        assert_eq!(
            iface.release().transactions(),
            vec![
                Transaction::Write { addr: 0x0C, data: vec![0x0A, 0x00] },
                Transaction::Write { addr: 0x0C, data: vec![0x0A, 0x0F] },
                Transaction::WriteRead { addr: 0x0C, reg: 0x10, len: 3 },
                Transaction::Write { addr: 0x0C, data: vec![0x0A, 0x00] },
                Transaction::Write { addr: 0x0C, data: vec![0x0A, 0x06] },
            ]
        );
        // Un delay por cada cambio de modo
        assert_eq!(delay.calls, 4);
        assert_eq!(delay.total_ms, 40);
    }

    #[test]
    fn test_begin_mag_rom_failure_keeps_neutral_adjustment() {
        let mut i2c = MockI2c::new();
        i2c.fail_on(0x0C, ak_reg::ASAX);
        let mut dev = device(i2c);

        assert_eq!(
            dev.begin_mag(MagMode::Continuous8Hz),
            Err(Mpu9250Error::BusTransactionFailed)
        );
        assert_eq!(dev.mag_adjustment(), [128, 128, 128]);
        // El AK8963 no se queda en modo fuse ROM
        assert_eq!(dev.mag_mode(), MagMode::Continuous8Hz);

        let (iface, _) = dev.release();
        let transactions = iface.release().transactions();
        assert_eq!(
            transactions[2..],
            [
                Transaction::WriteRead { addr: 0x0C, reg: 0x10, len: 3 },
                Transaction::Write { addr: 0x0C, data: vec![0x0A, 0x00] },
                Transaction::Write { addr: 0x0C, data: vec![0x0A, 0x02] },
            ]
        );
    }

    #[test]
    fn test_begin_mag_mode_failure_still_reads_rom() {
        let mut i2c = MockI2c::new();
        i2c.set_registers(0x0C, ak_reg::ASAX, &[0x01, 0x02, 0x03]);
        i2c.fail_on(0x0C, ak_reg::CNTL1);
        let mut dev = device(i2c);

        assert_eq!(
            dev.begin_mag(MagMode::Continuous100Hz),
            Err(Mpu9250Error::BusTransactionFailed)
        );
        assert_eq!(dev.mag_adjustment(), [0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_mag_update_applies_adjustment_and_offset() {
        let mut i2c = MockI2c::new();
        i2c.set_registers(0x0C, ak_reg::ASAX, &[128, 0, 128]);
        // x = 100, y = -200, z = 0x0102, ST2 = 0x10
        i2c.set_registers(0x0C, ak_reg::HXL, &[0x64, 0x00, 0x38, 0xFF, 0x02, 0x01, 0x10]);
        let mut dev = device(i2c);

        dev.begin_mag(MagMode::Continuous8Hz).unwrap();
        dev.set_mag_offset([10, 0, 0]);
        dev.set_mag_axis_offset(Axis::Z, -2);
        dev.mag_update().unwrap();

        assert_eq!(dev.raw_samples().mag, [100, -200, 258]);
        assert_eq!(dev.raw_samples().mag_status, 0x10);
        assert_eq!(dev.mag_x(), 110.0);
        assert_eq!(dev.mag_y(), -100.0);
        assert_eq!(dev.mag_z(), 256.0);
        assert_eq!(dev.mag(), [110.0, -100.0, 256.0]);
    }

    #[test]
    fn test_mag_without_rom_is_raw() {
        let mut i2c = MockI2c::new();
        i2c.set_registers(0x0C, ak_reg::HXL, &[0xFF, 0x7F, 0x00, 0x80, 0x00, 0x00, 0x00]);
        let mut dev = device(i2c);

        dev.mag_update().unwrap();
        assert_eq!(dev.mag(), [32767.0, -32768.0, 0.0]);
    }

    #[test]
    fn test_mag_who_am_i() {
        let mut i2c = MockI2c::new();
        i2c.set_registers(0x0C, ak_reg::WIA, &[values::AK8963_WIA]);
        let mut dev = device(i2c);
        assert_eq!(dev.mag_who_am_i(), Ok(0x48));
    }
}
