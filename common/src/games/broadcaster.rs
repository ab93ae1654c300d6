use std::future::Future;

use super::snake::{GameEvent, GameOverInfo, RenderSnapshot, SoundCue};

/// Receives everything a session emits. Implemented by hosts (window, audio) and by test
/// recorders.
pub trait GameEventSink: Send + Sync + Clone + 'static {
    fn render(&self, snapshot: RenderSnapshot) -> impl Future<Output = ()> + Send;

    fn play_sound(&self, cue: SoundCue) -> impl Future<Output = ()> + Send;

    fn game_over(&self, info: GameOverInfo) -> impl Future<Output = ()> + Send;
}

pub async fn dispatch<S: GameEventSink>(sink: &S, events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::Render(snapshot) => sink.render(snapshot).await,
            GameEvent::Sound(cue) => sink.play_sound(cue).await,
            GameEvent::GameOver(info) => sink.game_over(info).await,
        }
    }
}
