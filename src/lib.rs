//! # grid-dodge
//!
//! Obstacle-dodging game for a 5x5 WS2812 matrix, written for the RP2040
//! BitDogLab board but independent of it: every peripheral is reached
//! through a small trait.
//!
//! - **Grid / rules**: 5x5 board, falling obstacles, wrap-around ship,
//!   collision latch, score and speed-up
//! - **Mapper / renderer**: serpentine LED addressing, packed GRB words,
//!   joystick cursor on a 128x64 monochrome display
//! - **Input**: debounced button events queued from edge handlers, two-axis
//!   joystick on a multiplexed ADC
//! - **Feedback**: buzzer + status LED sequences
//! - **Game loop**: one cooperative frame per tick interval
//!
//! ## Quick start
//!
//! ```rust,ignore
//! static EVENTS: ButtonEvents = ButtonEvents::new(Config::DEFAULT.debounce_ms);
//!
//! let feedback = Feedback::new(buzzer, red_led, green_led, Tones::default());
//! let joystick = Joystick::new(adc, &config);
//! let mut game = GameLoop::new(config, &EVENTS, joystick, strip, oled, feedback, clock);
//! game.run().await?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
mod error;
pub mod feedback;
pub mod game_loop;
pub mod grid;
pub mod input;
pub mod mapper;
pub mod render;
pub mod rng;
pub mod rules;

pub use clock::{Clock, FrameBudget};
pub use config::{Config, Tones};
pub use error::Error;
pub use feedback::{Buzzer, Feedback, Pattern};
pub use game_loop::{GameLoop, Step};
pub use grid::{Cell, GameState};
pub use input::{AnalogInput, AnalogSample, ButtonEvents, InputEvent, Joystick, Line};
pub use render::{CursorDisplay, MatrixLink};
pub use rng::Rng;
pub use rules::{Collision, Frame, Steer};
