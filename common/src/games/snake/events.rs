use serde::Serialize;

use super::types::{Cell, DeathReason, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SoundCue {
    Eat,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameOverInfo {
    pub final_score: u32,
    pub reason: DeathReason,
    pub length: usize,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub grid_width: i32,
    pub grid_height: i32,
    pub snake: Vec<Cell>,
    pub direction: Direction,
    pub food: Cell,
    pub power_up: Cell,
    pub poison: Cell,
    pub score: u32,
    pub power_up_active: bool,
    pub power_up_ticks_remaining: u32,
}

impl RenderSnapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Render(RenderSnapshot),
    Sound(SoundCue),
    GameOver(GameOverInfo),
}
