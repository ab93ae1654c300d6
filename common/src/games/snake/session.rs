use crate::config::Validate;
use crate::games::SessionRng;
use crate::{log, log_debug, log_warn};
use super::engine::{TickEngine, TickReport};
use super::events::RenderSnapshot;
use super::game_state::SnakeGameState;
use super::grid::GridModel;
use super::settings::{SnakeGameConfig, TickInterval};
use super::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    GameOver,
}

/// Single owner of all mutable game state. Input, configuration and ticks all go through it.
pub struct GameSession {
    state: SnakeGameState,
    grid: GridModel,
    rng: SessionRng,
    tick_interval: TickInterval,
    phase: SessionPhase,
    games_played: u64,
}

impl GameSession {
    pub fn new(config: &SnakeGameConfig) -> Result<Self, String> {
        config.validate()?;
        let tick_interval = config.tick_interval()?;
        let grid = GridModel::from_mode(&config.grid);
        let rng = SessionRng::from_optional_seed(config.seed);
        log!(
            "New snake session: {}x{} grid, {}ms ticks, seed {}",
            grid.width(),
            grid.height(),
            tick_interval.as_millis(),
            rng.seed()
        );
        Ok(Self::from_parts(SnakeGameState::initial(), grid, rng, tick_interval))
    }

    pub fn from_parts(
        state: SnakeGameState,
        grid: GridModel,
        rng: SessionRng,
        tick_interval: TickInterval,
    ) -> Self {
        Self {
            state,
            grid,
            rng,
            tick_interval,
            phase: SessionPhase::Running,
            games_played: 0,
        }
    }

    /// Runs one tick. A terminal tick resets the session before returning, so the caller only has
    /// to restart its timer when `report.is_game_over()`.
    pub fn tick(&mut self) -> TickReport {
        let report = TickEngine::step(&mut self.state, &self.grid, &mut self.rng);
        if let Some(info) = report.game_over {
            self.phase = SessionPhase::GameOver;
            log!(
                "Game over ({:?}) with score {} and length {}",
                info.reason,
                info.final_score,
                info.length
            );
            self.reset();
        }
        report
    }

    pub fn reset(&mut self) {
        self.state = SnakeGameState::fresh(&self.grid, &mut self.rng);
        self.phase = SessionPhase::Running;
        self.games_played += 1;
        log_debug!("Session reset, game #{}", self.games_played + 1);
    }

    pub fn request_direction(&mut self, direction: Direction) {
        self.state.input.request_direction(direction);
    }

    /// Rejected values leave the current interval untouched.
    pub fn set_tick_interval_ms(&mut self, ms: u64) -> Result<TickInterval, String> {
        match TickInterval::from_millis(ms) {
            Ok(interval) => {
                self.tick_interval = interval;
                log_debug!("Tick interval set to {}ms", ms);
                Ok(interval)
            }
            Err(e) => {
                log_warn!("Ignoring tick interval change: {}", e);
                Err(e)
            }
        }
    }

    pub fn resize_viewport(&mut self, width_px: u32, height_px: u32) {
        self.grid.resize_viewport(width_px, height_px);
    }

    pub fn tick_interval(&self) -> TickInterval {
        self.tick_interval
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SnakeGameState {
        &mut self.state
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.state.snapshot(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::events::{GameEvent, SoundCue};
    use crate::games::snake::grid::FixedGrid;
    use crate::games::snake::settings::{DEFAULT_HEAD, GridMode, MAX_CELL_SIZE_PX};
    use crate::games::snake::snake::Snake;
    use crate::games::snake::types::{Cell, DeathReason};

    fn seeded_session() -> GameSession {
        let config = SnakeGameConfig {
            seed: Some(42),
            ..SnakeGameConfig::default()
        };
        GameSession::new(&config).unwrap()
    }

    fn assert_canonical(session: &GameSession) {
        let state = session.state();
        assert_eq!(state.snake.to_vec(), vec![DEFAULT_HEAD]);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.input.pending(), Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.power_up_state.active);
        assert_eq!(session.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_new_session_uses_initial_layout() {
        let session = seeded_session();
        assert_canonical(&session);
        assert_eq!(session.state().food, Cell::new(15, 15));
        assert_eq!(session.seed(), 42);
    }

    #[test]
    fn test_invalid_interval_config_is_rejected() {
        let config = SnakeGameConfig {
            tick_interval_ms: 10,
            ..SnakeGameConfig::default()
        };
        assert!(GameSession::new(&config).is_err());
    }

    #[test]
    fn test_wall_death_resets_to_canonical_state() {
        let mut session = seeded_session();
        {
            let state = session.state_mut();
            state.snake = Snake::new(Cell::new(0, 0));
            state.input = crate::games::snake::input::InputController::new(Direction::Left);
            state.score = 9;
            state.power_up_state.activate();
        }

        let report = session.tick();

        let info = report.game_over.unwrap();
        assert_eq!(info.final_score, 9);
        assert_eq!(info.reason, DeathReason::WallCollision);
        assert!(report.events.contains(&GameEvent::Sound(SoundCue::GameOver)));
        assert_canonical(&session);
        assert_eq!(session.games_played(), 1);
    }

    #[test]
    fn test_reset_randomises_consumables_in_bounds() {
        let mut session = seeded_session();
        for _ in 0..20 {
            session.reset();
            let state = session.state();
            assert!(session.grid().is_in_bounds(state.food));
            assert!(session.grid().is_in_bounds(state.power_up));
            assert!(session.grid().is_in_bounds(state.poison));
        }
    }

    #[test]
    fn test_reset_clears_pending_turn() {
        let mut session = seeded_session();
        session.request_direction(Direction::Up);
        session.reset();
        assert_canonical(&session);
    }

    #[test]
    fn test_rejected_interval_keeps_previous() {
        let mut session = seeded_session();
        assert!(session.set_tick_interval_ms(300).is_ok());
        assert!(session.set_tick_interval_ms(20).is_err());
        assert!(session.set_tick_interval_ms(5000).is_err());
        assert_eq!(session.tick_interval().as_millis(), 300);
    }

    #[test]
    fn test_reverse_request_is_ignored_by_session() {
        let mut session = seeded_session();
        session.request_direction(Direction::Left);
        session.tick();
        assert_eq!(session.state().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_length_invariant_over_many_ticks() {
        let mut session = seeded_session();
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
        for i in 0..2000 {
            let before = session.state().snake.len();
            session.request_direction(turns[(i / 7) % turns.len()]);
            let report = session.tick();
            let after = session.state().snake.len();

            if report.is_game_over() {
                assert_eq!(after, 1);
            } else {
                use crate::games::snake::types::Consumable;
                match report.consumed {
                    Some(Consumable::Food) | Some(Consumable::PowerUp) => {
                        assert_eq!(after, before + 1)
                    }
                    _ => assert_eq!(after, before),
                }
            }
        }
    }

    #[test]
    fn test_invalid_grid_config_is_rejected() {
        let config = SnakeGameConfig {
            grid: GridMode::Fixed {
                width: 3,
                height: 3,
            },
            ..SnakeGameConfig::default()
        };
        assert!(GameSession::new(&config).is_err());

        let config = SnakeGameConfig {
            grid: GridMode::Viewport { cell_size: 64 },
            ..SnakeGameConfig::default()
        };
        assert!(GameSession::new(&config).is_err());
    }

    #[test]
    fn test_largest_viewport_cell_size_lets_the_snake_move() {
        let config = SnakeGameConfig {
            grid: GridMode::Viewport {
                cell_size: MAX_CELL_SIZE_PX,
            },
            seed: Some(5),
            ..SnakeGameConfig::default()
        };
        let mut session = GameSession::new(&config).unwrap();
        assert!(session.grid().is_in_bounds(DEFAULT_HEAD));

        let report = session.tick();
        assert!(!report.is_game_over());
        assert_eq!(session.state().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_shrunk_viewport_keeps_a_playable_start() {
        let config = SnakeGameConfig {
            grid: GridMode::Viewport { cell_size: 20 },
            seed: Some(5),
            ..SnakeGameConfig::default()
        };
        let mut session = GameSession::new(&config).unwrap();
        session.resize_viewport(100, 100);
        assert_eq!(session.grid().width(), 15);

        session.reset();
        for _ in 0..4 {
            assert!(!session.tick().is_game_over());
        }
    }

    #[test]
    fn test_viewport_resize_can_strand_the_snake() {
        let config = SnakeGameConfig {
            grid: GridMode::Viewport { cell_size: 20 },
            seed: Some(5),
            ..SnakeGameConfig::default()
        };
        let mut session = GameSession::new(&config).unwrap();
        session.state_mut().snake = Snake::new(Cell::new(25, 3));
        session.resize_viewport(200, 200);
        assert_eq!(session.grid().width(), 15);

        // The head at (25,3) is outside a 15x15 grid; the next step is fatal.
        let report = session.tick();
        assert_eq!(
            report.game_over.map(|i| i.reason),
            Some(DeathReason::WallCollision)
        );
    }

    #[test]
    fn test_from_parts_with_fixed_grid() {
        let session = GameSession::from_parts(
            SnakeGameState::initial(),
            GridModel::new(FixedGrid::new(40, 40)),
            SessionRng::new(3),
            TickInterval::default(),
        );
        assert_eq!(session.snapshot().grid_width, 40);
    }
}
