//! Per-frame rules: obstacle descent, spawn, ship steering, scoring and the
//! difficulty ramp.
//!
//! Frame order is fixed: descent, stale cleanup, spawn, ship move, score.
//! The ship is only checked against post-descent obstacle positions.

use log::{debug, info};

use crate::config::{Config, GRID_SIZE, SHIP_ROW};
use crate::grid::{Cell, GameState};
use crate::rng::Rng;

/// Horizontal intent read from the joystick X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Hold,
}

impl Steer {
    /// Inside `center ± dead_zone` (inclusive) the ship holds still.
    pub fn from_sample(x: u16, config: &Config) -> Self {
        let low = config.adc_center.saturating_sub(config.dead_zone);
        let high = config.adc_center.saturating_add(config.dead_zone);
        if x < low {
            Steer::Left
        } else if x > high {
            Steer::Right
        } else {
            Steer::Hold
        }
    }

    /// Destination column, wrapping at both edges.
    pub fn apply(self, column: usize) -> usize {
        match self {
            Steer::Left => (column + GRID_SIZE - 1) % GRID_SIZE,
            Steer::Right => (column + 1) % GRID_SIZE,
            Steer::Hold => column,
        }
    }
}

/// What ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// An obstacle fell onto the ship's cell.
    Descent,
    /// The ship steered into an obstacle already on the bottom row.
    ShipMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Played { collision: Option<Collision> },
    /// Collision was latched on entry; score and speed were reset instead.
    Recovered,
}

impl GameState {
    /// Runs one frame: play it if the game is live, otherwise hold the frozen
    /// board and reset score and speed.
    pub fn tick(&mut self, x: u16, rng: &mut Rng) -> Frame {
        if self.collision {
            self.recover_from_collision();
            Frame::Recovered
        } else {
            Frame::Played {
                collision: self.advance(x, rng),
            }
        }
    }

    /// Plays one live frame. Returns the collision raised during it, if any.
    pub fn advance(&mut self, x: u16, rng: &mut Rng) -> Option<Collision> {
        let ship = self.ship_column;
        let stale: [bool; GRID_SIZE] =
            core::array::from_fn(|c| c != ship && self.cells[SHIP_ROW][c] == Cell::Obstacle);

        let mut collision = None;
        let arrived = self.descend();
        if arrived[ship] {
            collision = Some(Collision::Descent);
        }

        let row = self.ship_row();
        for column in 0..GRID_SIZE {
            if stale[column] && !arrived[column] {
                row[column] = Cell::Empty;
            }
        }

        let spawn = rng.below(GRID_SIZE as u32) as usize;
        self.cells[0][spawn] = Cell::Obstacle;

        if collision.is_none() {
            collision = self.steer(Steer::from_sample(x, &self.config));
        }

        self.score += self.config.score_per_frame;

        if let Some(cause) = collision {
            self.collision = true;
            info!("collision ({:?}) at column {}, score {}", cause, ship, self.score);
        }
        collision
    }

    /// Frozen-board frame: the grid is left as the collision drew it.
    pub fn recover_from_collision(&mut self) {
        self.score = 0;
        self.tick_interval_ms = self.config.initial_tick_ms;
    }

    /// Speeds the game up on every positive multiple of the milestone.
    /// Returns `true` when a milestone was hit this frame.
    pub fn check_progression(&mut self) -> bool {
        if self.score == 0 || self.score % self.config.milestone != 0 {
            return false;
        }
        if self.tick_interval_ms > self.config.min_tick_ms {
            self.tick_interval_ms = self
                .tick_interval_ms
                .saturating_sub(self.config.tick_step_ms)
                .max(self.config.min_tick_ms);
        }
        info!(
            "milestone {}: tick interval now {} ms",
            self.score, self.tick_interval_ms
        );
        true
    }

    /// Moves every obstacle one row down, bottom-up so nothing moves twice.
    /// Returns the columns that reached the ship row this frame.
    fn descend(&mut self) -> [bool; GRID_SIZE] {
        let mut arrived = [false; GRID_SIZE];
        for row in (0..SHIP_ROW).rev() {
            for column in 0..GRID_SIZE {
                if self.cells[row][column] != Cell::Obstacle {
                    continue;
                }
                self.cells[row][column] = Cell::Empty;
                self.cells[row + 1][column] = Cell::Obstacle;
                if row + 1 == SHIP_ROW {
                    arrived[column] = true;
                }
            }
        }
        arrived
    }

    fn steer(&mut self, steer: Steer) -> Option<Collision> {
        let from = self.ship_column;
        let to = steer.apply(from);
        if to == from {
            return None;
        }
        let row = self.ship_row();
        if row[to] == Cell::Obstacle {
            return Some(Collision::ShipMove);
        }
        row[from] = Cell::Empty;
        row[to] = Cell::Ship;
        self.ship_column = to;
        debug!("ship {} -> {}", from, to);
        None
    }
}
