//! BitDogLab RP2040 - "Grid Dodge"
//!
//! Button A (GP5) = restart, Button B (GP6) = reboot to USB bootloader
//! Joystick X/Y (GP27/GP26) = steer ship / move OLED cursor
//! 5x5 WS2812 matrix (GP7), SSD1306 OLED on I2C1 (GP14/GP15)
//!
//! Host builds only produce a stub so `cargo test` can link the package.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod firmware;

#[cfg(not(target_os = "none"))]
fn main() {
    println!("grid-dodge is RP2040 firmware; build with --target thumbv6m-none-eabi");
}
