//! Definiciones de registros para el MPU9250 y su magnetómetro AK8963
//!
//! Las direcciones son absolutas; el MPU9250 no usa bancos de registros.

/// Registros del MPU9250 (acelerómetro + giroscopio)
pub mod mpu {
    /// Dirección I2C con el pin AD0 a nivel bajo
    pub const ADDRESS_AD0_LOW: u8 = 0x68;
    /// Dirección I2C con el pin AD0 a nivel alto
    pub const ADDRESS_AD0_HIGH: u8 = 0x69;

    // Registros de configuración
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;

    /// I2C_MST_CTRL. El componente original escribía aquí el modo del magnetómetro.
    pub const I2C_MST_CTRL: u8 = 0x24;

    // Registros de interrupción
    pub const INT_PIN_CFG: u8 = 0x37;

    // Registros de acelerómetro
    pub const ACCEL_XOUT_H: u8 = 0x3B;

    // Registros de giroscopio
    pub const GYRO_XOUT_H: u8 = 0x43;

    // Registros de control
    pub const USER_CTRL: u8 = 0x6A;
    pub const PWR_MGMT_1: u8 = 0x6B;

    // Registros de identificación
    pub const WHO_AM_I: u8 = 0x75;
}

/// Registros del magnetómetro AK8963
pub mod ak_reg {
    /// Dirección I2C fija del AK8963 (accesible en modo bypass)
    pub const ADDRESS: u8 = 0x0C;

    pub const WIA: u8 = 0x00;
    /// Datos de medida, byte bajo primero
    pub const HXL: u8 = 0x03;
    pub const ST2: u8 = 0x09;
    pub const CNTL1: u8 = 0x0A;
    /// Valores de ajuste de sensibilidad (solo en modo fuse ROM)
    pub const ASAX: u8 = 0x10;
}

/// Valores escritos en los registros durante la configuración
pub mod values {
    /// INT_PIN_CFG: habilita el bypass hacia el bus auxiliar
    pub const BYPASS_EN: u8 = 0x02;
    /// USER_CTRL: desactiva el modo maestro I2C
    pub const USER_CTRL_CLEAR: u8 = 0x00;
    /// PWR_MGMT_1: despierta el chip con selección automática de reloj
    pub const CLKSEL_AUTO: u8 = 0x01;

    /// Valor esperado de WHO_AM_I en un MPU9250
    pub const MPU9250_WHO_AM_I: u8 = 0x71;
    /// Valor esperado de WIA en un AK8963
    pub const AK8963_WIA: u8 = 0x48;
}

/// Longitudes de las lecturas de cada subsistema
pub mod buffer_len {
    pub const ACCEL: usize = 6;
    pub const GYRO: usize = 6;
    /// Tres ejes más ST2 (HXL..=ST2)
    pub const MAG: usize = (super::ak_reg::ST2 - super::ak_reg::HXL) as usize + 1;
    pub const MAG_ADJUST: usize = 3;
}
