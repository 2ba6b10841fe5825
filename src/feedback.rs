//! Buzzer and status-LED sequences for collisions and score milestones.
//!
//! Both sequences block the frame: they sleep on the same [`Clock`] the main
//! loop uses, so their time comes out of the frame budget.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::clock::Clock;
use crate::config::Tones;

/// PWM-driven piezo.
pub trait Buzzer {
    fn set_frequency(&mut self, hz: u32);
    /// Duty level, `0` is silent and `u16::MAX` is fully on.
    fn set_level(&mut self, level: u16);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Red LED, low tone.
    Failure,
    /// Green LED, high tone.
    Success,
}

pub struct Feedback<B, L> {
    buzzer: B,
    red: L,
    green: L,
    tones: Tones,
}

impl<B: Buzzer, L: OutputPin> Feedback<B, L> {
    pub fn new(buzzer: B, red: L, green: L, tones: Tones) -> Self {
        Self {
            buzzer,
            red,
            green,
            tones,
        }
    }

    pub async fn failure<C: Clock>(&mut self, clock: &mut C) {
        self.play(Pattern::Failure, clock).await;
    }

    pub async fn success<C: Clock>(&mut self, clock: &mut C) {
        self.play(Pattern::Success, clock).await;
    }

    /// Beep-and-flash `repeats` times with a short gap in between.
    pub async fn play<C: Clock>(&mut self, pattern: Pattern, clock: &mut C) {
        debug!("feedback {:?}", pattern);
        let (led, hz) = match pattern {
            Pattern::Failure => (&mut self.red, self.tones.failure_hz),
            Pattern::Success => (&mut self.green, self.tones.success_hz),
        };

        for beep in 0..self.tones.repeats {
            if beep > 0 {
                clock.sleep_ms(self.tones.gap_ms).await;
            }
            led.set_high().ok();
            self.buzzer.set_frequency(hz);
            self.buzzer.set_level(self.tones.level);
            clock.sleep_ms(self.tones.beep_ms).await;
            self.buzzer.set_level(0);
            led.set_low().ok();
        }
    }

    /// Buzzer off, both indicators dark.
    pub fn silence(&mut self) {
        self.buzzer.set_level(0);
        self.red.set_low().ok();
        self.green.set_low().ok();
    }
}
