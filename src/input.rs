//! Button edges and joystick sampling.
//!
//! Button edge handlers run outside the main loop, so they never touch game
//! state. They debounce the edge against a per-line atomic timestamp and push
//! an [`InputEvent`] into a lock-free queue that the main loop drains once
//! per frame.

use heapless::mpmc::Q8;
use log::warn;
use portable_atomic::{AtomicU64, Ordering};

use crate::config::{ADC_MAX, Config};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    ResetRequested,
    ShutdownRequested,
}

/// Monitored digital input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Button A: restart the game.
    A,
    /// Button B: reboot into the USB bootloader.
    B,
    /// Joystick click, wired as a second reset button on some builds.
    Stick,
}

const LINES: usize = 3;
const NEVER: u64 = u64::MAX;

impl Line {
    pub const fn event(self) -> InputEvent {
        match self {
            Line::A | Line::Stick => InputEvent::ResetRequested,
            Line::B => InputEvent::ShutdownRequested,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Line::A => 0,
            Line::B => 1,
            Line::Stick => 2,
        }
    }
}

/// Accepts at most one edge per line per window.
pub struct Debouncer {
    window_ms: u64,
    last: [AtomicU64; LINES],
}

impl Debouncer {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last: [const { AtomicU64::new(NEVER) }; LINES],
        }
    }

    /// Returns `true` if the edge counts as a press. The stored timestamp
    /// only moves on acceptance.
    pub fn accept(&self, line: Line, now_ms: u64) -> bool {
        let slot = &self.last[line.slot()];
        let last = slot.load(Ordering::Acquire);
        if last != NEVER && now_ms.saturating_sub(last) < self.window_ms {
            return false;
        }
        slot.compare_exchange(last, now_ms, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Debounced button events waiting for the main loop.
pub struct ButtonEvents {
    debounce: Debouncer,
    queue: Q8<InputEvent>,
}

impl ButtonEvents {
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            debounce: Debouncer::new(debounce_ms),
            queue: Q8::new(),
        }
    }

    /// Call on every falling edge of `line`. Never blocks.
    pub fn edge(&self, line: Line, now_ms: u64) -> Option<InputEvent> {
        if !self.debounce.accept(line, now_ms) {
            return None;
        }
        let event = line.event();
        match self.queue.enqueue(event) {
            Ok(()) => Some(event),
            Err(dropped) => {
                warn!("input queue full, dropping {:?}", dropped);
                None
            }
        }
    }

    /// Pending events, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = InputEvent> + '_ {
        core::iter::from_fn(|| self.queue.dequeue())
    }
}

/// One joystick reading. Both axes are raw 12-bit conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalogSample {
    pub x: u16,
    pub y: u16,
}

impl AnalogSample {
    pub const CENTERED: Self = Self { x: 2048, y: 2048 };
}

/// Single multiplexed ADC: pick an input, then convert.
pub trait AnalogInput {
    fn select(&mut self, channel: u8);
    /// Blocks for one conversion on the selected input.
    fn read(&mut self) -> u16;
}

/// Two-axis joystick on a multiplexed converter. No filtering is applied.
pub struct Joystick<A> {
    adc: A,
    x_channel: u8,
    y_channel: u8,
}

impl<A: AnalogInput> Joystick<A> {
    pub fn new(adc: A, config: &Config) -> Self {
        Self {
            adc,
            x_channel: config.x_channel,
            y_channel: config.y_channel,
        }
    }

    pub fn sample(&mut self) -> AnalogSample {
        self.adc.select(self.x_channel);
        let x = self.adc.read();
        self.adc.select(self.y_channel);
        let y = self.adc.read();
        AnalogSample {
            x: x.min(ADC_MAX),
            y: y.min(ADC_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_is_accepted() {
        let debounce = Debouncer::new(250);
        assert!(debounce.accept(Line::A, 0));
    }

    #[test]
    fn presses_inside_the_window_are_dropped() {
        let debounce = Debouncer::new(250);
        assert!(debounce.accept(Line::A, 1000));
        assert!(!debounce.accept(Line::A, 1001));
        assert!(!debounce.accept(Line::A, 1249));
        assert!(debounce.accept(Line::A, 1250));
    }

    #[test]
    fn rejected_edges_do_not_extend_the_window() {
        let debounce = Debouncer::new(250);
        assert!(debounce.accept(Line::B, 0));
        assert!(!debounce.accept(Line::B, 200));
        assert!(debounce.accept(Line::B, 250));
    }

    #[test]
    fn lines_are_debounced_independently() {
        let debounce = Debouncer::new(250);
        assert!(debounce.accept(Line::A, 500));
        assert!(debounce.accept(Line::B, 510));
        assert!(debounce.accept(Line::Stick, 520));
        assert!(!debounce.accept(Line::A, 600));
    }

    #[test]
    fn edges_become_queued_events() {
        let events = ButtonEvents::new(250);
        assert_eq!(events.edge(Line::A, 100), Some(InputEvent::ResetRequested));
        assert_eq!(events.edge(Line::A, 120), None);
        assert_eq!(events.edge(Line::B, 130), Some(InputEvent::ShutdownRequested));
        assert_eq!(events.edge(Line::Stick, 140), Some(InputEvent::ResetRequested));

        let drained: Vec<_> = events.drain().collect();
        assert_eq!(
            drained,
            [
                InputEvent::ResetRequested,
                InputEvent::ShutdownRequested,
                InputEvent::ResetRequested,
            ]
        );
        assert_eq!(events.drain().count(), 0);
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let events = ButtonEvents::new(250);
        let accepted = (0..20u64)
            .filter_map(|i| events.edge(Line::A, i * 250))
            .count();
        assert!(accepted < 20);
        assert_eq!(events.drain().count(), accepted);
    }

    struct FakeAdc {
        values: [u16; 2],
        selected: u8,
        selects: Vec<u8>,
    }

    impl AnalogInput for FakeAdc {
        fn select(&mut self, channel: u8) {
            self.selected = channel;
            self.selects.push(channel);
        }

        fn read(&mut self) -> u16 {
            self.values[self.selected as usize]
        }
    }

    #[test]
    fn sampler_reads_x_then_y_on_configured_channels() {
        let adc = FakeAdc {
            values: [300, 3900],
            selected: 0,
            selects: Vec::new(),
        };
        let mut joystick = Joystick::new(adc, &Config::default());

        let sample = joystick.sample();

        assert_eq!(sample, AnalogSample { x: 3900, y: 300 });
        assert_eq!(joystick.adc.selects, [1, 0]);
    }

    #[test]
    fn out_of_range_conversions_are_clamped() {
        let adc = FakeAdc {
            values: [u16::MAX, 5000],
            selected: 0,
            selects: Vec::new(),
        };
        let config = Config {
            x_channel: 0,
            y_channel: 1,
            ..Config::default()
        };
        let sample = Joystick::new(adc, &config).sample();
        assert_eq!(sample, AnalogSample { x: 4095, y: 4095 });
    }
}
