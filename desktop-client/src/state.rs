use chrono::{DateTime, Local};
use eframe::egui;
use snake_common::games::snake::{GameOverInfo, RenderSnapshot};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
pub struct GameOverNotice {
    pub info: GameOverInfo,
    pub at: DateTime<Local>,
}

#[derive(Default)]
struct Inner {
    snapshot: Option<RenderSnapshot>,
    game_over: Option<GameOverNotice>,
    best_score: u32,
    deaths: u64,
    context: Option<egui::Context>,
}

/// State shared between the session runner thread and the UI thread.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<Inner>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        self.inner.lock().unwrap().context = Some(ctx);
    }

    pub fn has_context(&self) -> bool {
        self.inner.lock().unwrap().context.is_some()
    }

    pub fn update_snapshot(&self, snapshot: RenderSnapshot) {
        let ctx = {
            let mut inner = self.inner.lock().unwrap();
            inner.best_score = inner.best_score.max(snapshot.score);
            inner.snapshot = Some(snapshot);
            inner.context.clone()
        };
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    }

    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.inner.lock().unwrap().snapshot.clone()
    }

    pub fn set_game_over(&self, info: GameOverInfo) {
        let ctx = {
            let mut inner = self.inner.lock().unwrap();
            inner.deaths += 1;
            inner.game_over = Some(GameOverNotice {
                info,
                at: Local::now(),
            });
            inner.context.clone()
        };
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    }

    pub fn game_over(&self) -> Option<GameOverNotice> {
        self.inner.lock().unwrap().game_over.clone()
    }

    pub fn dismiss_game_over(&self) {
        self.inner.lock().unwrap().game_over = None;
    }

    /// Best score seen during this process; not persisted.
    pub fn best_score(&self) -> u32 {
        self.inner.lock().unwrap().best_score
    }

    pub fn deaths(&self) -> u64 {
        self.inner.lock().unwrap().deaths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::games::snake::{DeathReason, FixedGrid, GridModel, SnakeGameState};

    #[test]
    fn test_best_score_tracks_highest_snapshot() {
        let state = SharedState::new();
        let grid = GridModel::new(FixedGrid::new(30, 30));
        let mut game = SnakeGameState::initial();

        game.score = 8;
        state.update_snapshot(game.snapshot(&grid));
        game.score = 2;
        state.update_snapshot(game.snapshot(&grid));

        assert_eq!(state.best_score(), 8);
        assert_eq!(state.snapshot().map(|s| s.score), Some(2));
    }

    #[test]
    fn test_game_over_notice_until_dismissed() {
        let state = SharedState::new();
        state.set_game_over(GameOverInfo {
            final_score: 4,
            reason: DeathReason::SelfCollision,
            length: 6,
        });

        assert_eq!(state.deaths(), 1);
        assert_eq!(state.game_over().map(|n| n.info.final_score), Some(4));
        state.dismiss_game_over();
        assert!(state.game_over().is_none());
        assert_eq!(state.deaths(), 1);
    }
}
