//! The 5x5 playfield and the state the rules engine mutates each frame.
//!
//! Row 0 is the spawn edge, row [`SHIP_ROW`] holds the ship. The main loop is
//! the sole owner of a [`GameState`]; button handlers only queue events, so a
//! reset is always applied here as one whole-struct overwrite.

use crate::config::{Config, GRID_SIZE, SHIP_ROW, SHIP_START_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Obstacle,
}

pub type Grid = [[Cell; GRID_SIZE]; GRID_SIZE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) cells: Grid,
    pub(crate) ship_column: usize,
    pub(crate) collision: bool,
    pub(crate) score: u32,
    pub(crate) tick_interval_ms: u32,
    pub(crate) config: Config,
}

impl GameState {
    /// Ship centred on the bottom row, no obstacles, score zero.
    pub fn new(config: Config) -> Self {
        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        cells[SHIP_ROW][SHIP_START_COLUMN] = Cell::Ship;
        Self {
            cells,
            ship_column: SHIP_START_COLUMN,
            collision: false,
            score: 0,
            tick_interval_ms: config.initial_tick_ms,
            config,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn ship_column(&self) -> usize {
        self.ship_column
    }

    pub fn is_collided(&self) -> bool {
        self.collision
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn ship_row(&mut self) -> &mut [Cell; GRID_SIZE] {
        &mut self.cells[SHIP_ROW]
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
