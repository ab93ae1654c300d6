use std::thread::JoinHandle;

use snake_common::games::snake::{GameSession, SessionRunner, SnakeGameConfig};
use snake_common::{log, log_warn};
use tokio::sync::mpsc;

use crate::command_sender::CommandSender;

use super::LocalBroadcaster;

/// Starts the game on its own thread with a single-threaded runtime; the session never leaves it.
pub fn spawn_snake_game(
    config: &SnakeGameConfig,
    broadcaster: LocalBroadcaster,
) -> Result<(CommandSender, JoinHandle<()>), String> {
    let session = GameSession::new(config)?;
    let seed = session.seed();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let handle = std::thread::Builder::new()
        .name("snake-session".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    log_warn!("Failed to build session runtime: {}", e);
                    return;
                }
            };

            let summary = runtime.block_on(SessionRunner::run(session, command_rx, broadcaster));
            log!(
                "Session with seed {} finished: {} ticks, {} game overs",
                seed,
                summary.ticks,
                summary.games_over
            );
        })
        .map_err(|e| format!("Failed to spawn session thread: {}", e))?;

    Ok((CommandSender::new(command_tx), handle))
}
