//! The cooperative frame loop.
//!
//! Each frame: drain button events, sample the joystick, advance the rules
//! (or hold the frozen board after a collision), render both outputs, check
//! the difficulty ramp, then sleep whatever is left of the tick interval.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::clock::{Clock, FrameBudget};
use crate::config::Config;
use crate::error::Error;
use crate::feedback::{Buzzer, Feedback};
use crate::grid::GameState;
use crate::input::{AnalogInput, ButtonEvents, InputEvent, Joystick};
use crate::render::{CursorDisplay, CursorView, MatrixLink, blank_matrix, render_matrix};
use crate::rng::Rng;
use crate::rules::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Outputs are blanked; the caller should reboot into the bootloader.
    Shutdown,
}

pub struct GameLoop<'e, M, D, A, B, L, C> {
    state: GameState,
    rng: Rng,
    events: &'e ButtonEvents,
    joystick: Joystick<A>,
    matrix: M,
    display: D,
    cursor: CursorView,
    feedback: Feedback<B, L>,
    clock: C,
}

impl<'e, M, D, A, B, L, C> GameLoop<'e, M, D, A, B, L, C>
where
    M: MatrixLink,
    D: CursorDisplay,
    A: AnalogInput,
    B: Buzzer,
    L: OutputPin,
    C: Clock,
{
    pub fn new(
        config: Config,
        events: &'e ButtonEvents,
        joystick: Joystick<A>,
        matrix: M,
        display: D,
        feedback: Feedback<B, L>,
        clock: C,
    ) -> Self {
        Self {
            state: GameState::new(config),
            rng: Rng::new(config.seed),
            events,
            joystick,
            matrix,
            display,
            cursor: CursorView::new(),
            feedback,
            clock,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Draws the initial board and clears the OLED.
    pub async fn start(&mut self) -> Result<(), Error<D::Error>> {
        info!(
            "game start: tick {} ms, seed {:#010x}",
            self.state.tick_interval_ms(),
            self.state.config().seed
        );
        render_matrix(&mut self.matrix, &self.state).await;
        self.cursor
            .blank(&mut self.display)
            .await
            .map_err(Error::Display)
    }

    /// Runs until a shutdown is requested.
    pub async fn run(&mut self) -> Result<(), Error<D::Error>> {
        self.start().await?;
        while self.step().await? == Step::Continue {}
        Ok(())
    }

    pub async fn step(&mut self) -> Result<Step, Error<D::Error>> {
        let frame = FrameBudget::start(&self.clock);

        let events = self.events;
        for event in events.drain() {
            match event {
                InputEvent::ResetRequested => {
                    info!("reset (score was {})", self.state.score());
                    self.state.reset();
                }
                InputEvent::ShutdownRequested => {
                    self.shutdown().await?;
                    return Ok(Step::Shutdown);
                }
            }
        }

        let sample = self.joystick.sample();
        if let Frame::Played { collision } = self.state.tick(sample.x, &mut self.rng) {
            if collision.is_some() {
                self.feedback.failure(&mut self.clock).await;
            }
            render_matrix(&mut self.matrix, &self.state).await;
            self.cursor
                .draw(&mut self.display, sample)
                .await
                .map_err(Error::Display)?;
        }

        if self.state.check_progression() {
            self.feedback.success(&mut self.clock).await;
        }

        frame
            .finish(&mut self.clock, u64::from(self.state.tick_interval_ms()))
            .await;
        Ok(Step::Continue)
    }

    async fn shutdown(&mut self) -> Result<(), Error<D::Error>> {
        warn!("shutdown requested at score {}", self.state.score());
        self.feedback.silence();
        blank_matrix(&mut self.matrix).await;
        self.cursor
            .blank(&mut self.display)
            .await
            .map_err(Error::Display)
    }
}
