//! Mock I2C para los tests
//!
//! Modela cada dispositivo como un mapa de registros, registra todas las
//! transacciones y permite inyectar fallos por (dirección, registro).

use std::collections::{BTreeMap, BTreeSet};

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;

/// Transacción registrada por el mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { addr: u8, data: Vec<u8> },
    WriteRead { addr: u8, reg: u8, len: usize },
}

/// Error simulado del bus (NACK)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
pub struct MockI2c {
    registers: BTreeMap<(u8, u8), u8>,
    transactions: Vec<Transaction>,
    failing: BTreeSet<(u8, u8)>,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// Precarga registros consecutivos a partir de `reg`
    pub fn set_registers(&mut self, addr: u8, reg: u8, values: &[u8]) {
        for (i, v) in values.iter().enumerate() {
            self.registers.insert((addr, reg.wrapping_add(i as u8)), *v);
        }
    }

    pub fn register(&self, addr: u8, reg: u8) -> u8 {
        self.registers.get(&(addr, reg)).copied().unwrap_or(0)
    }

    /// Hace fallar cualquier transacción dirigida a ese registro
    pub fn fail_on(&mut self, addr: u8, reg: u8) {
        self.failing.insert((addr, reg));
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Escrituras de un solo registro como (dirección, registro, valor)
    pub fn register_writes(&self) -> Vec<(u8, u8, u8)> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { addr, data } if data.len() == 2 => {
                    Some((*addr, data[0], data[1]))
                }
                _ => None,
            })
            .collect()
    }
}

impl i2c::Write for MockI2c {
    type Error = MockError;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.transactions.push(Transaction::Write {
            addr,
            data: bytes.to_vec(),
        });

        let reg = bytes[0];
        if self.failing.contains(&(addr, reg)) {
            return Err(MockError);
        }
        self.set_registers(addr, reg, &bytes[1..]);
        Ok(())
    }
}

impl i2c::WriteRead for MockI2c {
    type Error = MockError;

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        let reg = bytes[0];
        self.transactions.push(Transaction::WriteRead {
            addr,
            reg,
            len: buffer.len(),
        });

        if self.failing.contains(&(addr, reg)) {
            return Err(MockError);
        }
        for (i, b) in buffer.iter_mut().enumerate() {
            *b = self.register(addr, reg.wrapping_add(i as u8));
        }
        Ok(())
    }
}

/// Delay que no espera y acumula los milisegundos pedidos
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ms: u32,
    pub calls: usize,
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        self.calls += 1;
    }
}
