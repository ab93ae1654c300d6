use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::grid::DEFAULT_VIEWPORT_PX;
use super::types::{Cell, Direction};

pub const DEFAULT_HEAD: Cell = Cell::new(10, 10);
pub const DEFAULT_DIRECTION: Direction = Direction::Right;

pub const FOOD_POINTS: u32 = 1;
pub const POWER_UP_POINTS: u32 = 5;
pub const POISON_PENALTY: u32 = 3;
pub const POWER_UP_DURATION_TICKS: u32 = 100;

pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Free cells ahead of the default head along the default direction.
const START_RUNWAY_CELLS: u32 = 4;
/// Every grid, fixed or viewport-derived, holds the default head plus its runway.
pub const MIN_GRID_CELLS: u32 = DEFAULT_HEAD.x as u32 + 1 + START_RUNWAY_CELLS;
pub const MAX_FIXED_GRID_CELLS: u32 = 100;
pub const MIN_CELL_SIZE_PX: u32 = 8;

const DEFAULT_VIEWPORT_SIDE_PX: u32 = if DEFAULT_VIEWPORT_PX.0 < DEFAULT_VIEWPORT_PX.1 {
    DEFAULT_VIEWPORT_PX.0
} else {
    DEFAULT_VIEWPORT_PX.1
};

/// Largest cell size that still fits `MIN_GRID_CELLS` into the default viewport.
pub const MAX_CELL_SIZE_PX: u32 = DEFAULT_VIEWPORT_SIDE_PX / MIN_GRID_CELLS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GridMode {
    Fixed { width: u32, height: u32 },
    Viewport { cell_size: u32 },
}

impl Default for GridMode {
    fn default() -> Self {
        GridMode::Fixed {
            width: 30,
            height: 30,
        }
    }
}

impl Validate for GridMode {
    fn validate(&self) -> Result<(), String> {
        match *self {
            GridMode::Fixed { width, height } => {
                let range = MIN_GRID_CELLS..=MAX_FIXED_GRID_CELLS;
                if !range.contains(&width) || !range.contains(&height) {
                    return Err(format!(
                        "Fixed grid dimensions must be between {} and {} cells",
                        MIN_GRID_CELLS, MAX_FIXED_GRID_CELLS
                    ));
                }
            }
            GridMode::Viewport { cell_size } => {
                if !(MIN_CELL_SIZE_PX..=MAX_CELL_SIZE_PX).contains(&cell_size) {
                    return Err(format!(
                        "Cell size must be between {}px and {}px",
                        MIN_CELL_SIZE_PX, MAX_CELL_SIZE_PX
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Delay between two ticks, always within the accepted range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickInterval(u64);

impl TickInterval {
    pub fn from_millis(ms: u64) -> Result<Self, String> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&ms) {
            return Err(format!(
                "Tick interval must be between {}ms and {}ms, got {}ms",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, ms
            ));
        }
        Ok(Self(ms))
    }

    /// Parses user-entered text such as the speed field.
    pub fn parse(text: &str) -> Result<Self, String> {
        let ms = text
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("Tick interval is not a number: {:?}", text))?;
        Self::from_millis(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(DEFAULT_TICK_INTERVAL_MS)
    }
}

pub fn validate_volume(volume: f32) -> Result<f32, String> {
    if !(0.0..=1.0).contains(&volume) {
        return Err(format!("Volume must be between 0.0 and 1.0, got {}", volume));
    }
    Ok(volume)
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SnakeGameConfig {
    pub grid: GridMode,
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SnakeGameConfig {
    pub fn tick_interval(&self) -> Result<TickInterval, String> {
        TickInterval::from_millis(self.tick_interval_ms)
    }
}

impl Default for SnakeGameConfig {
    fn default() -> Self {
        Self {
            grid: GridMode::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Validate for SnakeGameConfig {
    fn validate(&self) -> Result<(), String> {
        self.grid.validate()?;
        self.tick_interval()?;
        Ok(())
    }
}
