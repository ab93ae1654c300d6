mod engine;
mod events;
mod game_state;
mod grid;
mod input;
mod power_up;
mod runner;
mod session;
mod settings;
mod snake;
mod types;

pub use engine::{TickEngine, TickReport};
pub use events::{GameEvent, GameOverInfo, RenderSnapshot, SoundCue};
pub use game_state::SnakeGameState;
pub use grid::{BoundsProvider, DEFAULT_VIEWPORT_PX, FixedGrid, GridModel, ViewportGrid};
pub use input::{InputController, MIN_SWIPE_DISTANCE};
pub use power_up::PowerUpState;
pub use runner::{RunSummary, SessionCommand, SessionRunner};
pub use session::{GameSession, SessionPhase};
pub use settings::{
    DEFAULT_DIRECTION, DEFAULT_HEAD, DEFAULT_TICK_INTERVAL_MS, GridMode, MAX_TICK_INTERVAL_MS,
    MIN_TICK_INTERVAL_MS, POWER_UP_DURATION_TICKS, SnakeGameConfig, TickInterval, validate_volume,
};
pub use snake::Snake;
pub use types::{Cell, Consumable, DeathReason, Direction};
