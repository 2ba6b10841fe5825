//! Paints the game onto the LED matrix and the joystick cursor onto the OLED.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::config::{ADC_MAX, CELL_COUNT, CURSOR_SIZE, DISPLAY_H, DISPLAY_W, GRID_SIZE};
use crate::grid::{Cell, GameState};
use crate::input::AnalogSample;
use crate::mapper::physical_index;

/// Normalized per-channel intensity, `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Word layout shifted out by the WS2812 PIO program: `GGRRBB00`.
    pub fn pack(self) -> u32 {
        let scale = |c: f32| (c * 255.0) as u8 as u32;
        (scale(self.g) << 24) | (scale(self.r) << 16) | (scale(self.b) << 8)
    }
}

pub fn cell_color(cell: Cell) -> Rgb {
    match cell {
        Cell::Ship => Rgb::BLUE,
        Cell::Obstacle => Rgb::RED,
        Cell::Empty => Rgb::BLACK,
    }
}

/// One packed color per matrix LED, in strip transmission order.
pub fn matrix_words(state: &GameState) -> [u32; CELL_COUNT] {
    let cells = state.cells();
    core::array::from_fn(|slot| {
        let logical = physical_index(slot % GRID_SIZE, slot / GRID_SIZE);
        cell_color(cells[logical / GRID_SIZE][logical % GRID_SIZE]).pack()
    })
}

/// Bit-serial link to the LED matrix. Each call hands over one packed color
/// and returns once the transmitter has accepted it.
#[allow(async_fn_in_trait)]
pub trait MatrixLink {
    async fn transmit(&mut self, word: u32);
}

pub async fn render_matrix<M: MatrixLink>(link: &mut M, state: &GameState) {
    for word in matrix_words(state) {
        link.transmit(word).await;
    }
}

pub async fn blank_matrix<M: MatrixLink>(link: &mut M) {
    for _ in 0..CELL_COUNT {
        link.transmit(Rgb::BLACK.pack()).await;
    }
}

/// Monochrome display that buffers drawing until [`present`](Self::present).
#[allow(async_fn_in_trait)]
pub trait CursorDisplay: DrawTarget<Color = BinaryColor> {
    async fn present(&mut self) -> Result<(), Self::Error>;
}

/// Top-left corner of the cursor square for a joystick sample. Y grows
/// downwards on the display, so the axis is inverted.
pub fn cursor_origin(sample: AnalogSample) -> Point {
    let max = u32::from(ADC_MAX);
    let x = (u32::from(sample.x.min(ADC_MAX)) * DISPLAY_W) / max;
    let y = DISPLAY_H.saturating_sub((u32::from(sample.y.min(ADC_MAX)) * DISPLAY_H) / max);
    Point::new(
        x.min(DISPLAY_W - CURSOR_SIZE) as i32,
        y.min(DISPLAY_H - CURSOR_SIZE) as i32,
    )
}

/// Joystick cursor on the OLED. Remembers the last square so an unmoved
/// stick costs no I2C traffic.
#[derive(Debug, Default)]
pub struct CursorView {
    last: Option<Point>,
}

impl CursorView {
    pub const fn new() -> Self {
        Self { last: None }
    }

    pub fn last(&self) -> Option<Point> {
        self.last
    }

    /// Returns `true` if the display was redrawn.
    pub async fn draw<D: CursorDisplay>(
        &mut self,
        display: &mut D,
        sample: AnalogSample,
    ) -> Result<bool, D::Error> {
        let origin = cursor_origin(sample);
        if self.last == Some(origin) {
            return Ok(false);
        }

        display.clear(BinaryColor::Off)?;
        Rectangle::new(origin, Size::new(CURSOR_SIZE, CURSOR_SIZE))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(display)?;
        display.present().await?;

        self.last = Some(origin);
        Ok(true)
    }

    pub async fn blank<D: CursorDisplay>(&mut self, display: &mut D) -> Result<(), D::Error> {
        display.clear(BinaryColor::Off)?;
        display.present().await?;
        self.last = None;
        Ok(())
    }
}
