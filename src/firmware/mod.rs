//! Board bring-up and the tasks around the game loop.

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0, USB};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::{Duration, Instant, Timer};
use grid_dodge::{ButtonEvents, Config, Feedback, GameLoop, Joystick, Line, Tones};
use ssd1306::mode::DisplayConfigAsync;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306Async};
use {defmt_rtt as _, panic_probe as _};

mod board;

use board::{AdcMux, EmbassyClock, Oled, PwmBuzzer, StripLink};

#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 3] = [
    embassy_rp::binary_info::rp_program_name!(c"Grid Dodge"),
    embassy_rp::binary_info::rp_program_description!(
        c"Obstacle dodging on a 5x5 WS2812 matrix with joystick cursor on SSD1306"
    ),
    embassy_rp::binary_info::rp_cargo_version!(),
];

// --- Pins (BitDogLab) ---
// Button A      GP5     restart
// Button B      GP6     reboot to bootloader
// WS2812        GP7
// Buzzer A      GP10    PWM slice 5 channel A
// LED G/B/R     GP11/GP12/GP13
// OLED SDA/SCL  GP14/GP15 (I2C1)
// Stick click   GP22
// Joystick Y/X  GP26/GP27 (ADC0/ADC1)
const OLED_I2C_HZ: u32 = 400_000;

/// Filled by the button tasks, drained by the game loop.
static EVENTS: ButtonEvents = ButtonEvents::new(Config::DEFAULT.debounce_ms);

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

#[embassy_executor::task]
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}

/// Turns falling edges on one button into queued events. Never touches game
/// state directly.
#[embassy_executor::task(pool_size = 3)]
async fn button_task(mut pin: Input<'static>, line: Line) {
    loop {
        pin.wait_for_falling_edge().await;
        if let Some(event) = EVENTS.edge(line, Instant::now().as_millis()) {
            log::info!("{:?} pressed: {:?}", line, event);
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // USB serial logger
    let usb_driver = Driver::new(p.USB, Irqs);
    unwrap!(spawner.spawn(logger_task(usb_driver)));
    Timer::after(Duration::from_secs(2)).await;
    log::info!("=== Grid Dodge ===");

    // Status LEDs
    let green = Output::new(p.PIN_11, Level::Low);
    let _blue = Output::new(p.PIN_12, Level::Low);
    let red = Output::new(p.PIN_13, Level::Low);

    // Buttons (active-low, pull-up)
    unwrap!(spawner.spawn(button_task(Input::new(p.PIN_5, Pull::Up), Line::A)));
    unwrap!(spawner.spawn(button_task(Input::new(p.PIN_6, Pull::Up), Line::B)));
    #[cfg(feature = "joystick-reset")]
    unwrap!(spawner.spawn(button_task(Input::new(p.PIN_22, Pull::Up), Line::Stick)));

    // Joystick
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let vry = Channel::new_pin(p.PIN_26, Pull::None);
    let vrx = Channel::new_pin(p.PIN_27, Pull::None);

    // WS2812 matrix
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);

    // Buzzer
    let buzzer = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, pwm::Config::default());

    // SSD1306 OLED
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = OLED_I2C_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c_config);
    let mut oled = Ssd1306Async::new(
        I2CDisplayInterface::new(i2c),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode();
    if let Err(e) = oled.init().await {
        defmt::panic!("OLED init failed: {}", defmt::Debug2Format(&e));
    }
    log::info!("Peripherals ready!");

    let config = Config {
        seed: Instant::now().as_ticks() as u32,
        ..Config::DEFAULT
    };
    let mut game = GameLoop::new(
        config,
        &EVENTS,
        Joystick::new(AdcMux::new(adc, [vry, vrx]), &config),
        StripLink::new(ws2812),
        Oled(oled),
        Feedback::new(PwmBuzzer::new(buzzer), red, green, Tones::default()),
        EmbassyClock,
    );

    if let Err(e) = game.run().await {
        defmt::panic!("game loop failed: {}", defmt::Display2Format(&e));
    }

    info!("rebooting into USB bootloader");
    Timer::after(Duration::from_millis(50)).await;
    embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    loop {
        cortex_m::asm::wfi();
    }
}
