//! Funciones de conversión para datos del sensor MPU9250
//!
//! Este módulo proporciona funciones para decodificar los bytes de los registros
//! de datos y convertirlos a unidades físicas: aceleración en G, velocidad angular
//! en grados por segundo y campo magnético ajustado por la sensibilidad de fábrica.
//!
//! El signo es siempre `+1`: un valor positivo del registro produce una lectura
//! física positiva en los tres subsistemas.

use crate::types::{AccelFullScale, GyroFullScale, RawTriple};

/// Valor de fondo de escala de un registro de 16 bits con signo
const FULL_SCALE_COUNTS: f32 = 32768.0;

/// Combina dos bytes (alto, bajo) en un entero de 16 bits en complemento a dos
#[inline]
pub fn combine_bytes(high: u8, low: u8) -> i16 {
    i16::from_be_bytes([high, low])
}

/// Decodifica tres ejes en formato big-endian (acelerómetro y giroscopio)
pub fn decode_be_triple(data: &[u8; 6]) -> RawTriple {
    [
        combine_bytes(data[0], data[1]),
        combine_bytes(data[2], data[3]),
        combine_bytes(data[4], data[5]),
    ]
}

/// Decodifica tres ejes en formato little-endian (AK8963: byte bajo primero).
/// El séptimo byte (ST2) se ignora.
pub fn decode_le_triple(data: &[u8; 7]) -> RawTriple {
    [
        combine_bytes(data[1], data[0]),
        combine_bytes(data[3], data[2]),
        combine_bytes(data[5], data[4]),
    ]
}

/// Convierte un valor bruto de acelerómetro a G según la escala configurada
#[inline]
pub fn accel_axis_to_g(raw: i16, scale: AccelFullScale) -> f32 {
    raw as f32 * scale.full_scale_g() / FULL_SCALE_COUNTS
}

/// Convierte un valor bruto de giroscopio a grados/segundo según la escala configurada
#[inline]
pub fn gyro_axis_to_dps(raw: i16, scale: GyroFullScale) -> f32 {
    raw as f32 * scale.full_scale_dps() / FULL_SCALE_COUNTS
}

/// Convierte datos brutos de acelerómetro a G según la escala configurada
///
/// # Arguments
/// * `raw` - Valores brutos del acelerómetro [x, y, z]
/// * `scale` - Configuración de escala completa del acelerómetro
///
/// # Returns
/// Aceleración en G [x, y, z]
pub fn accel_raw_to_g(raw: RawTriple, scale: AccelFullScale) -> [f32; 3] {
    raw.map(|v| accel_axis_to_g(v, scale))
}

/// Convierte datos brutos de giroscopio a grados/segundo según la escala configurada
///
/// # Arguments
/// * `raw` - Valores brutos del giroscopio [x, y, z]
/// * `scale` - Configuración de escala completa del giroscopio
///
/// # Returns
/// Velocidad angular en grados/segundo [x, y, z]
pub fn gyro_raw_to_dps(raw: RawTriple, scale: GyroFullScale) -> [f32; 3] {
    raw.map(|v| gyro_axis_to_dps(v, scale))
}

/// Factor de sensibilidad a partir del byte de ajuste de fábrica (ASA)
///
/// `((asa - 128) * 0.5 / 128) + 1`, por lo que 128 es neutro.
#[inline]
pub fn mag_sensitivity_factor(adjust: u8) -> f32 {
    ((adjust as f32 - 128.0) * 0.5 / 128.0) + 1.0
}

/// Aplica el ajuste de fábrica y el offset de usuario a un eje del magnetómetro
#[inline]
pub fn mag_axis_adjusted(raw: i16, adjust: u8, offset: i16) -> f32 {
    raw as f32 * mag_sensitivity_factor(adjust) + offset as f32
}

/// Convierte datos brutos del magnetómetro aplicando sensibilidad y offsets
pub fn mag_raw_to_adjusted(raw: RawTriple, adjust: [u8; 3], offset: [i16; 3]) -> [f32; 3] {
    [
        mag_axis_adjusted(raw[0], adjust[0], offset[0]),
        mag_axis_adjusted(raw[1], adjust[1], offset[1]),
        mag_axis_adjusted(raw[2], adjust[2], offset[2]),
    ]
}
