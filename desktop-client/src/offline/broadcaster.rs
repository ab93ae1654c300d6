use snake_common::games::GameEventSink;
use snake_common::games::snake::{GameOverInfo, RenderSnapshot, SoundCue};

use crate::audio::AudioPlayer;
use crate::state::SharedState;

/// Delivers session events to the window state and the audio thread.
#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
    audio: AudioPlayer,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState, audio: AudioPlayer) -> Self {
        Self {
            shared_state,
            audio,
        }
    }
}

impl GameEventSink for LocalBroadcaster {
    async fn render(&self, snapshot: RenderSnapshot) {
        self.shared_state.update_snapshot(snapshot);
    }

    async fn play_sound(&self, cue: SoundCue) {
        self.audio.play(cue);
    }

    async fn game_over(&self, info: GameOverInfo) {
        self.shared_state.set_game_over(info);
    }
}
