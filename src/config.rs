//! Game tunables.
//!
//! Geometry is fixed at compile time; everything a build might want to tweak
//! (timing, scoring, joystick calibration, tones) lives in [`Config`] and
//! [`Tones`].

// --- Grid ---
pub const GRID_SIZE: usize = 5;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
pub const SHIP_ROW: usize = GRID_SIZE - 1;
pub const SHIP_START_COLUMN: usize = 2;

// --- OLED ---
pub const DISPLAY_W: u32 = 128;
pub const DISPLAY_H: u32 = 64;
pub const CURSOR_SIZE: u32 = 8;

// --- ADC ---
pub const ADC_MAX: u16 = 4095;

/// Rules and input calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub initial_tick_ms: u32,
    pub min_tick_ms: u32,
    pub tick_step_ms: u32,
    /// Score interval at which the game speeds up.
    pub milestone: u32,
    pub score_per_frame: u32,
    pub adc_center: u16,
    pub dead_zone: u16,
    pub debounce_ms: u64,
    /// ADC input wired to the horizontal axis.
    pub x_channel: u8,
    pub y_channel: u8,
    pub seed: u32,
}

impl Config {
    pub const DEFAULT: Self = Self {
        initial_tick_ms: 300,
        min_tick_ms: 100,
        tick_step_ms: 50,
        milestone: 500,
        score_per_frame: 10,
        adc_center: 2048,
        dead_zone: 200,
        debounce_ms: 250,
        // BitDogLab routes VRx to GPIO27 (ADC1) and VRy to GPIO26 (ADC0).
        x_channel: 1,
        y_channel: 0,
        seed: 0x2545_F491,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Buzzer and indicator timing for the two feedback sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tones {
    pub failure_hz: u32,
    pub success_hz: u32,
    pub beep_ms: u64,
    pub gap_ms: u64,
    pub repeats: u8,
    /// PWM level while a beep sounds, out of `u16::MAX`.
    pub level: u16,
}

impl Default for Tones {
    fn default() -> Self {
        Self {
            failure_hz: 3300,
            success_hz: 4400,
            beep_ms: 100,
            gap_ms: 50,
            repeats: 2,
            level: 0x8000,
        }
    }
}
