//! Interfaz sobre un transporte I2C al estilo Arduino `Wire`
//!
//! Útil cuando el bus lo proporciona un framework anfitrión que expone
//! transacciones por pasos en lugar de los traits de `embedded-hal`.

use core::convert::Infallible;

use super::{Interface, InterfaceError};

/// Transporte I2C por pasos
pub trait Wire {
    /// Inicializa el bus
    fn begin(&mut self);

    /// Abre una transacción de escritura hacia `addr`
    fn begin_transmission(&mut self, addr: u8);

    /// Encola un byte en la transacción abierta
    fn write(&mut self, byte: u8);

    /// Cierra la transacción. Devuelve 0 si tuvo éxito.
    ///
    /// Con `send_stop = false` el bus queda listo para un repeated start.
    fn end_transmission(&mut self, send_stop: bool) -> u8;

    /// Solicita `count` bytes a `addr`. Devuelve los bytes recibidos.
    fn request_from(&mut self, addr: u8, count: u8) -> u8;

    /// Bytes pendientes de leer
    fn available(&mut self) -> usize;

    /// Lee el siguiente byte recibido
    fn read(&mut self) -> Option<u8>;
}

/// Implementación de Interface sobre un transporte [`Wire`]
pub struct WireInterface<W> {
    wire: W,
}

impl<W: Wire> WireInterface<W> {
    /// Crea una nueva interfaz e inicializa el bus
    pub fn new(mut wire: W) -> Self {
        wire.begin();
        Self { wire }
    }

    /// Consume la interfaz y devuelve el transporte subyacente
    pub fn release(self) -> W {
        self.wire
    }
}

impl<W: Wire> Interface for WireInterface<W> {
    type Error = InterfaceError<Infallible>;

    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.wire.begin_transmission(addr);
        self.wire.write(reg);
        self.wire.write(value);
        match self.wire.end_transmission(true) {
            0 => Ok(()),
            status => Err(InterfaceError::Nack(status)),
        }
    }

    fn read_regs(&mut self, addr: u8, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        let count = u8::try_from(data.len()).map_err(|_| InterfaceError::InvalidParameter)?;
        if count == 0 {
            return Err(InterfaceError::InvalidParameter);
        }

        self.wire.begin_transmission(addr);
        self.wire.write(reg);
        let status = self.wire.end_transmission(false);
        if status != 0 {
            return Err(InterfaceError::Nack(status));
        }

        self.wire.request_from(addr, count);
        let available = self.wire.available();
        if available < data.len() {
            return Err(InterfaceError::Incomplete {
                expected: data.len(),
                available,
            });
        }

        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.wire.read().ok_or(InterfaceError::Incomplete {
                expected: count as usize,
                available: i,
            })?;
        }
        Ok(())
    }
}
