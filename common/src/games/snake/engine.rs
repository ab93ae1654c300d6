use crate::games::SessionRng;
use crate::log_debug;
use super::events::{GameEvent, GameOverInfo, SoundCue};
use super::game_state::SnakeGameState;
use super::grid::GridModel;
use super::settings::{FOOD_POINTS, POISON_PENALTY, POWER_UP_POINTS};
use super::types::{Cell, Consumable, DeathReason};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    pub consumed: Option<Consumable>,
    pub game_over: Option<GameOverInfo>,
}

impl TickReport {
    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }
}

/// Advances a [`SnakeGameState`] by one tick. Never resets on its own: a game-over report is
/// handed back to the owning session.
pub struct TickEngine;

impl TickEngine {
    pub fn step(state: &mut SnakeGameState, grid: &GridModel, rng: &mut SessionRng) -> TickReport {
        let mut report = TickReport::default();

        let direction = state.input.commit();
        let next_head = state.snake.head().neighbor(direction);

        if let Err(reason) = Self::check_termination(state, grid, next_head) {
            let info = GameOverInfo {
                final_score: state.score,
                reason,
                length: state.snake.len(),
            };
            report.events.push(GameEvent::Sound(SoundCue::GameOver));
            report.events.push(GameEvent::GameOver(info));
            report.game_over = Some(info);
            return report;
        }

        state.snake.push_head(next_head);
        report.consumed = Self::resolve_consumable(state, grid, rng, next_head);

        if let Some(Consumable::Food) = report.consumed {
            report.events.push(GameEvent::Sound(SoundCue::Eat));
        }

        state.power_up_state.decay();
        state.tick += 1;

        report.events.push(GameEvent::Render(state.snapshot(grid)));
        report
    }

    fn check_termination(
        state: &SnakeGameState,
        grid: &GridModel,
        next_head: Cell,
    ) -> Result<(), DeathReason> {
        if !grid.is_in_bounds(next_head) {
            return Err(DeathReason::WallCollision);
        }
        if state.snake.body_contains(next_head) {
            return Err(DeathReason::SelfCollision);
        }
        Ok(())
    }

    /// First match wins: food, then power-up, then poison. Only food and power-up keep the tail.
    fn resolve_consumable(
        state: &mut SnakeGameState,
        grid: &GridModel,
        rng: &mut SessionRng,
        head: Cell,
    ) -> Option<Consumable> {
        if head == state.food {
            state.score += FOOD_POINTS;
            state.food = grid.random_cell(rng);
            log_debug!("Food eaten at ({}, {}), score {}", head.x, head.y, state.score);
            Some(Consumable::Food)
        } else if head == state.power_up {
            state.score += POWER_UP_POINTS;
            state.power_up_state.activate();
            state.power_up = grid.random_cell(rng);
            log_debug!("Power-up taken at ({}, {}), score {}", head.x, head.y, state.score);
            Some(Consumable::PowerUp)
        } else if head == state.poison {
            state.score = state.score.saturating_sub(POISON_PENALTY);
            state.snake.pop_tail();
            state.poison = grid.random_cell(rng);
            log_debug!("Poison hit at ({}, {}), score {}", head.x, head.y, state.score);
            Some(Consumable::Poison)
        } else {
            state.snake.pop_tail();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::grid::FixedGrid;
    use crate::games::snake::settings::POWER_UP_DURATION_TICKS;
    use crate::games::snake::snake::Snake;
    use crate::games::snake::types::Direction;

    const FAR: Cell = Cell::new(29, 29);

    fn grid() -> GridModel {
        GridModel::new(FixedGrid::new(30, 30))
    }

    fn state_with(segments: &[(i32, i32)], direction: Direction) -> SnakeGameState {
        let snake = Snake::from_segments(segments.iter().map(|&(x, y)| Cell::new(x, y))).unwrap();
        SnakeGameState::with_layout(snake, direction, FAR, Cell::new(29, 0), Cell::new(0, 29))
    }

    fn rendered(report: &TickReport) -> bool {
        report.events.iter().any(|e| matches!(e, GameEvent::Render(_)))
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut state = state_with(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        let mut rng = SessionRng::new(42);
        let report = TickEngine::step(&mut state, &grid(), &mut rng);

        assert_eq!(
            state.snake.to_vec(),
            vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]
        );
        assert_eq!(report.consumed, None);
        assert!(rendered(&report));
    }

    #[test]
    fn test_eating_food() {
        let mut state = state_with(&[(10, 10)], Direction::Right);
        state.food = Cell::new(11, 10);
        let mut rng = SessionRng::new(42);
        let grid = grid();

        let report = TickEngine::step(&mut state, &grid, &mut rng);

        assert_eq!(state.snake.to_vec(), vec![Cell::new(11, 10), Cell::new(10, 10)]);
        assert_eq!(state.score, 1);
        assert!(grid.is_in_bounds(state.food));
        assert_eq!(report.consumed, Some(Consumable::Food));
        assert_eq!(report.events[0], GameEvent::Sound(SoundCue::Eat));
        assert!(matches!(report.events[1], GameEvent::Render(ref s) if s.score == 1));
    }

    #[test]
    fn test_power_up_awards_points_and_starts_timer() {
        let mut state = state_with(&[(10, 10)], Direction::Right);
        state.power_up = Cell::new(11, 10);
        let mut rng = SessionRng::new(42);

        let report = TickEngine::step(&mut state, &grid(), &mut rng);

        assert_eq!(state.score, 5);
        assert_eq!(state.snake.len(), 2);
        assert!(state.power_up_state.active);
        // The pickup tick already counts down once.
        assert_eq!(state.power_up_state.ticks_remaining, POWER_UP_DURATION_TICKS - 1);
        assert_eq!(report.consumed, Some(Consumable::PowerUp));
        assert!(!report.events.contains(&GameEvent::Sound(SoundCue::Eat)));
    }

    #[test]
    fn test_poison_penalises_without_growth() {
        let mut state = state_with(&[(5, 5), (4, 5)], Direction::Right);
        state.poison = Cell::new(6, 5);
        state.score = 10;
        let mut rng = SessionRng::new(42);

        let report = TickEngine::step(&mut state, &grid(), &mut rng);

        assert_eq!(state.snake.to_vec(), vec![Cell::new(6, 5), Cell::new(5, 5)]);
        assert_eq!(state.score, 7);
        assert_eq!(report.consumed, Some(Consumable::Poison));
    }

    #[test]
    fn test_poison_score_floors_at_zero() {
        let mut state = state_with(&[(5, 5), (4, 5)], Direction::Right);
        state.poison = Cell::new(6, 5);
        state.score = 2;
        let mut rng = SessionRng::new(42);

        TickEngine::step(&mut state, &grid(), &mut rng);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_food_wins_over_overlapping_power_up_and_poison() {
        let mut state = state_with(&[(10, 10)], Direction::Right);
        let target = Cell::new(11, 10);
        state.food = target;
        state.power_up = target;
        state.poison = target;
        let mut rng = SessionRng::new(42);

        let report = TickEngine::step(&mut state, &grid(), &mut rng);

        assert_eq!(report.consumed, Some(Consumable::Food));
        assert_eq!(state.score, 1);
        assert_eq!(state.power_up, target);
        assert_eq!(state.poison, target);
        assert!(!state.power_up_state.active);
    }

    #[test]
    fn test_power_up_wins_over_poison() {
        let mut state = state_with(&[(10, 10)], Direction::Right);
        let target = Cell::new(11, 10);
        state.power_up = target;
        state.poison = target;
        let mut rng = SessionRng::new(42);

        let report = TickEngine::step(&mut state, &grid(), &mut rng);
        assert_eq!(report.consumed, Some(Consumable::PowerUp));
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_wall_collision_reports_game_over() {
        let mut state = state_with(&[(0, 0)], Direction::Left);
        state.score = 4;
        let mut rng = SessionRng::new(42);

        let report = TickEngine::step(&mut state, &grid(), &mut rng);

        let info = report.game_over.unwrap();
        assert_eq!(info.final_score, 4);
        assert_eq!(info.reason, DeathReason::WallCollision);
        assert_eq!(
            report.events,
            vec![GameEvent::Sound(SoundCue::GameOver), GameEvent::GameOver(info)]
        );
        assert!(!rendered(&report));
    }

    #[test]
    fn test_each_wall_is_fatal() {
        let cases = [
            ((15, 0), Direction::Up),
            ((15, 29), Direction::Down),
            ((0, 15), Direction::Left),
            ((29, 15), Direction::Right),
        ];
        for ((x, y), direction) in cases {
            let mut state = state_with(&[(x, y)], direction);
            let mut rng = SessionRng::new(1);
            let report = TickEngine::step(&mut state, &grid(), &mut rng);
            assert_eq!(
                report.game_over.map(|i| i.reason),
                Some(DeathReason::WallCollision),
                "moving {:?} from ({}, {})",
                direction,
                x,
                y
            );
        }
    }

    #[test]
    fn test_self_collision_reports_game_over() {
        // Head at (5,5) turning up into its own body at (5,4).
        let mut state = state_with(&[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)], Direction::Left);
        state.input.request_direction(Direction::Up);
        let mut rng = SessionRng::new(42);

        let report = TickEngine::step(&mut state, &grid(), &mut rng);
        assert_eq!(
            report.game_over.map(|i| i.reason),
            Some(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn test_moving_into_current_tail_cell_is_fatal() {
        // Index >= 1 includes the tail even though it would move away this tick.
        let mut state = state_with(&[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::Left);
        let mut rng = SessionRng::new(42);

        let report = TickEngine::step(&mut state, &grid(), &mut rng);
        assert_eq!(
            report.game_over.map(|i| i.reason),
            Some(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn test_pending_turn_is_committed_before_moving() {
        let mut state = state_with(&[(10, 10)], Direction::Right);
        state.input.request_direction(Direction::Down);
        let mut rng = SessionRng::new(42);

        TickEngine::step(&mut state, &grid(), &mut rng);
        assert_eq!(state.snake.head(), Cell::new(10, 11));
        assert_eq!(state.direction(), Direction::Down);
    }

    #[test]
    fn test_power_up_expires_after_duration_without_pickup() {
        let mut state = state_with(&[(1, 1)], Direction::Right);
        state.power_up_state.active = true;
        state.power_up_state.ticks_remaining = POWER_UP_DURATION_TICKS;
        let mut rng = SessionRng::new(42);
        let grid = grid();

        for tick in 0..POWER_UP_DURATION_TICKS {
            assert!(state.power_up_state.active, "inactive too early at tick {}", tick);
            // Zig-zag inside the grid so the snake never hits a wall.
            let turn = if tick % 2 == 0 { Direction::Down } else { Direction::Right };
            if state.snake.head().y >= 27 {
                state.snake = Snake::new(Cell::new(1, 1));
            }
            state.input.request_direction(turn);
            let report = TickEngine::step(&mut state, &grid, &mut rng);
            assert!(!report.is_game_over());
        }
        assert!(!state.power_up_state.active);
    }

    #[test]
    fn test_tick_counter_only_advances_on_moves() {
        let mut state = state_with(&[(0, 0)], Direction::Left);
        let mut rng = SessionRng::new(42);
        TickEngine::step(&mut state, &grid(), &mut rng);
        assert_eq!(state.tick, 0);

        let mut state = state_with(&[(5, 5)], Direction::Right);
        TickEngine::step(&mut state, &grid(), &mut rng);
        assert_eq!(state.tick, 1);
    }
}
