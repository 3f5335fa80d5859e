//! Módulo de abstracción para interfaces de comunicación con el MPU9250
//!
//! El MPU9250 y el AK8963 comparten bus cuando el bypass está activo, por eso
//! cada operación recibe la dirección I2C del dispositivo destino.

use embedded_hal::blocking::i2c;

use crate::device::Mpu9250Error;

pub mod wire;

#[cfg(test)]
pub(crate) mod mock;

pub use wire::{Wire, WireInterface};

/// Error genérico para interfaces de comunicación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceError<E> {
    /// Error de comunicación I2C del transporte subyacente
    I2cError(E),
    /// El transporte terminó la transacción con un estado distinto de cero
    Nack(u8),
    /// Se recibieron menos bytes de los pedidos
    Incomplete { expected: usize, available: usize },
    /// Parámetro inválido
    InvalidParameter,
}

/// Trait para abstraer la comunicación con los dispositivos del bus
pub trait Interface {
    /// Tipo de error que puede producir la interfaz
    type Error;

    /// Escribe un byte en un registro: dirección del registro seguida del dato
    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error>;

    /// Lee `data.len()` registros consecutivos a partir de `reg`.
    ///
    /// O se leen todos los bytes o la operación falla completa.
    fn read_regs(&mut self, addr: u8, reg: u8, data: &mut [u8]) -> Result<(), Self::Error>;
}

/// Implementación de Interface para I2C sobre `embedded-hal`
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C, E> I2cInterface<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    /// Crea una nueva interfaz I2C
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Consume la interfaz y devuelve el dispositivo I2C subyacente
    pub fn release(self) -> I2C {
        self.i2c
    }

    #[cfg(test)]
    pub(crate) fn inner_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }
}

impl<I2C, E> Interface for I2cInterface<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    type Error = InterfaceError<E>;

    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c
            .write(addr, &[reg, value])
            .map_err(InterfaceError::I2cError)
    }

    fn read_regs(&mut self, addr: u8, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InterfaceError::InvalidParameter);
        }

        self.i2c
            .write_read(addr, &[reg], data)
            .map_err(InterfaceError::I2cError)
    }
}

// Implementación que permite convertir errores de la interfaz a Mpu9250Error
impl<E> From<InterfaceError<E>> for Mpu9250Error {
    fn from(error: InterfaceError<E>) -> Self {
        match error {
            InterfaceError::I2cError(_) | InterfaceError::Nack(_) => {
                Mpu9250Error::BusTransactionFailed
            }
            InterfaceError::Incomplete { .. } => Mpu9250Error::Incomplete,
            InterfaceError::InvalidParameter => Mpu9250Error::InvalidParameter,
        }
    }
}
