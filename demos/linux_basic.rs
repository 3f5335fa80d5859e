//! Ejemplo básico para MPU9250 en Linux
//!
//! Para ejecutar: cargo run --example linux_basic --features linux

use mpu9250_rs::{Address, Channel, Mpu9250Component};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;

fn main() {
    println!("MPU9250 - Ejemplo básico");

    // Flag para controlar la ejecución del programa
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Configurar el manejador para Ctrl+C
    ctrlc::set_handler(move || {
        println!("\nDeteniendo el programa...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error al configurar el manejador de Ctrl+C");

    // Crear dispositivo con la dirección I2C estándar (AD0 a nivel bajo)
    let mut device = match mpu9250_rs::new_linux_device("/dev/i2c-1", Address::Ad0Low) {
        Ok(device) => device,
        Err(e) => {
            eprintln!("Error al abrir dispositivo I2C: {:?}", e);
            return;
        }
    };

    match device.who_am_i() {
        Ok(id) => println!("WHO_AM_I: 0x{:02X}", id),
        Err(e) => eprintln!("Error al leer WHO_AM_I: {:?}", e),
    }

    let mut component = Mpu9250Component::new(device);
    for channel in Channel::ALL {
        component.set_sink(channel, move |value: f32| {
            println!("{:?}: {:.3}", channel, value);
        });
    }

    // Inicializar el dispositivo y leer el ajuste de fábrica del magnetómetro
    if let Err(e) = component.setup() {
        eprintln!("Error al inicializar el dispositivo: {:?}", e);
        return;
    }
    println!(
        "Dispositivo inicializado, ajuste del magnetómetro: {:?}",
        component.device().mag_adjustment()
    );

    // Leer datos continuamente hasta que se presione Ctrl+C
    println!("Leyendo datos. Presiona Ctrl+C para detener...");
    let interval = component.update_interval();
    while running.load(Ordering::SeqCst) {
        if let Err(e) = component.update() {
            eprintln!("Error en la lectura (código {}): {:?}", e.status_code(), e);
        }
        println!("-------------------");
        thread::sleep(interval);
    }

    println!("Ejemplo finalizado");
}
