use tokio::sync::mpsc;

use crate::games::broadcaster::{GameEventSink, dispatch};
use crate::games::timer::TickTimer;
use crate::{log, log_debug};
use super::session::GameSession;
use super::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    SetTickInterval { ms: u64 },
    ResizeViewport { width_px: u32, height_px: u32 },
    /// Host has shown the last game over; the fresh session may start moving.
    Resume,
    Shutdown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub games_over: u64,
}

pub struct SessionRunner;

impl SessionRunner {
    /// Owns `session` for its whole life. Commands and timer firings are handled one at a time;
    /// commands already queued when the timer fires are applied first. After a game over no tick
    /// runs until a `Resume` command arrives.
    pub async fn run(
        mut session: GameSession,
        mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
        sink: impl GameEventSink,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut timer = TickTimer::new(session.tick_interval().as_duration());
        let mut awaiting_resume = false;

        sink.render(session.snapshot()).await;

        loop {
            tokio::select! {
                biased;

                command = command_rx.recv() => {
                    match command {
                        Some(SessionCommand::Turn(direction)) => {
                            session.request_direction(direction);
                        }
                        Some(SessionCommand::SetTickInterval { ms }) => {
                            if let Ok(interval) = session.set_tick_interval_ms(ms) {
                                timer.restart(interval.as_duration());
                            }
                        }
                        Some(SessionCommand::ResizeViewport { width_px, height_px }) => {
                            session.resize_viewport(width_px, height_px);
                            log_debug!(
                                "Viewport {}x{}px -> grid {}x{}",
                                width_px,
                                height_px,
                                session.grid().width(),
                                session.grid().height()
                            );
                        }
                        Some(SessionCommand::Resume) => {
                            if awaiting_resume {
                                awaiting_resume = false;
                                timer.restart(session.tick_interval().as_duration());
                                sink.render(session.snapshot()).await;
                                log_debug!("Resumed after game over");
                            }
                        }
                        Some(SessionCommand::Shutdown) | None => break,
                    }
                }

                _ = timer.tick(), if !awaiting_resume => {
                    let report = session.tick();
                    summary.ticks += 1;

                    let game_over = report.is_game_over();
                    dispatch(&sink, report.events).await;

                    if game_over {
                        summary.games_over += 1;
                        awaiting_resume = true;
                    }
                }
            }
        }

        log!(
            "Session runner stopped after {} ticks and {} game overs",
            summary.ticks,
            summary.games_over
        );
        summary
    }
}
