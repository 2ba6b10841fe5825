//! embassy-rp adapters for the game's peripheral traits.

use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_rp::pwm::{self, Pwm};
use embassy_time::{Instant, Timer};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use grid_dodge::config::CELL_COUNT;
use grid_dodge::{AnalogInput, Buzzer, Clock, Config, CursorDisplay, MatrixLink};
use smart_leds::RGB8;
use ssd1306::Ssd1306Async;
use ssd1306::mode::BufferedGraphicsModeAsync;
use ssd1306::prelude::*;

// --- WS2812 matrix ---

/// The PIO driver DMAs a whole frame at once, so words are staged until all
/// 25 LEDs have one.
pub struct StripLink {
    ws2812: PioWs2812<'static, PIO0, 0, CELL_COUNT>,
    frame: [RGB8; CELL_COUNT],
    next: usize,
}

impl StripLink {
    pub fn new(ws2812: PioWs2812<'static, PIO0, 0, CELL_COUNT>) -> Self {
        Self {
            ws2812,
            frame: [RGB8::default(); CELL_COUNT],
            next: 0,
        }
    }
}

impl MatrixLink for StripLink {
    async fn transmit(&mut self, word: u32) {
        let [g, r, b, _] = word.to_be_bytes();
        self.frame[self.next] = RGB8::new(r, g, b);
        self.next += 1;
        if self.next == CELL_COUNT {
            self.ws2812.write(&self.frame).await;
            self.next = 0;
        }
    }
}

// --- Joystick ADC ---

/// ADC0 and ADC1, addressed by input number like the RP2040 mux.
pub struct AdcMux {
    adc: Adc<'static, adc::Blocking>,
    channels: [Channel<'static>; 2],
    selected: usize,
}

impl AdcMux {
    pub fn new(adc: Adc<'static, adc::Blocking>, channels: [Channel<'static>; 2]) -> Self {
        Self {
            adc,
            channels,
            selected: 0,
        }
    }
}

impl AnalogInput for AdcMux {
    fn select(&mut self, channel: u8) {
        self.selected = usize::from(channel).min(self.channels.len() - 1);
    }

    fn read(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channels[self.selected]) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("ADC{} read failed: {:?}", self.selected, e);
                Config::DEFAULT.adc_center
            }
        }
    }
}

// --- Piezo ---

const PWM_DIVIDER: u8 = 16;

pub struct PwmBuzzer {
    pwm: Pwm<'static>,
    config: pwm::Config,
    level: u16,
}

impl PwmBuzzer {
    pub fn new(pwm: Pwm<'static>) -> Self {
        let mut config = pwm::Config::default();
        config.divider = PWM_DIVIDER.into();
        config.compare_a = 0;
        Self {
            pwm,
            config,
            level: 0,
        }
    }

    fn apply(&mut self) {
        let compare = u32::from(self.config.top) * u32::from(self.level) / u32::from(u16::MAX);
        self.config.compare_a = compare as u16;
        self.pwm.set_config(&self.config);
    }
}

impl Buzzer for PwmBuzzer {
    fn set_frequency(&mut self, hz: u32) {
        let ticks = embassy_rp::clocks::clk_sys_freq() / (u32::from(PWM_DIVIDER) * hz.max(1));
        self.config.top = ticks.saturating_sub(1).min(u32::from(u16::MAX)) as u16;
        self.apply();
    }

    fn set_level(&mut self, level: u16) {
        self.level = level;
        self.apply();
    }
}

// --- OLED ---

type Ssd1306 = Ssd1306Async<
    I2CInterface<I2c<'static, I2C1, i2c::Async>>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// Buffered SSD1306; `present` pushes the buffer over I2C.
pub struct Oled(pub Ssd1306);

impl Dimensions for Oled {
    fn bounding_box(&self) -> Rectangle {
        self.0.bounding_box()
    }
}

impl DrawTarget for Oled {
    type Color = BinaryColor;
    type Error = <Ssd1306 as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        DrawTarget::draw_iter(&mut self.0, pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        DrawTarget::clear(&mut self.0, color)
    }
}

impl CursorDisplay for Oled {
    async fn present(&mut self) -> Result<(), Self::Error> {
        self.0.flush().await
    }
}

// --- Time ---

pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    async fn sleep_ms(&mut self, ms: u64) {
        Timer::after_millis(ms).await;
    }
}
