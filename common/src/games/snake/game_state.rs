use crate::games::SessionRng;
use super::events::RenderSnapshot;
use super::grid::GridModel;
use super::input::InputController;
use super::power_up::PowerUpState;
use super::settings::{DEFAULT_DIRECTION, DEFAULT_HEAD};
use super::snake::Snake;
use super::types::{Cell, Direction};

const INITIAL_FOOD: Cell = Cell::new(15, 15);
const INITIAL_POWER_UP: Cell = Cell::new(5, 5);
const INITIAL_POISON: Cell = Cell::new(8, 8);

/// Entity positions plus the per-session counters mutated by each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub input: InputController,
    pub food: Cell,
    pub power_up: Cell,
    pub poison: Cell,
    pub power_up_state: PowerUpState,
    pub score: u32,
    pub tick: u64,
}

impl SnakeGameState {
    /// Layout shown when the program starts, before any death.
    pub fn initial() -> Self {
        Self {
            snake: Snake::new(DEFAULT_HEAD),
            input: InputController::new(DEFAULT_DIRECTION),
            food: INITIAL_FOOD,
            power_up: INITIAL_POWER_UP,
            poison: INITIAL_POISON,
            power_up_state: PowerUpState::default(),
            score: 0,
            tick: 0,
        }
    }

    /// Canonical post-death state with every consumable placed independently at random.
    pub fn fresh(grid: &GridModel, rng: &mut SessionRng) -> Self {
        let food = grid.random_cell(rng);
        let power_up = grid.random_cell(rng);
        let poison = grid.random_cell(rng);
        Self {
            food,
            power_up,
            poison,
            ..Self::initial()
        }
    }

    /// Test and tooling hook: a state with explicit positions.
    pub fn with_layout(
        snake: Snake,
        direction: Direction,
        food: Cell,
        power_up: Cell,
        poison: Cell,
    ) -> Self {
        Self {
            snake,
            input: InputController::new(direction),
            food,
            power_up,
            poison,
            power_up_state: PowerUpState::default(),
            score: 0,
            tick: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.input.committed()
    }

    pub fn snapshot(&self, grid: &GridModel) -> RenderSnapshot {
        RenderSnapshot {
            tick: self.tick,
            grid_width: grid.width(),
            grid_height: grid.height(),
            snake: self.snake.to_vec(),
            direction: self.direction(),
            food: self.food,
            power_up: self.power_up,
            poison: self.poison,
            score: self.score,
            power_up_active: self.power_up_state.active,
            power_up_ticks_remaining: self.power_up_state.ticks_remaining,
        }
    }
}
