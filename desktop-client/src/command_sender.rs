use snake_common::games::snake::{Direction, SessionCommand};
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self { tx }
    }

    /// A closed channel means the session already stopped; the command is dropped.
    pub fn send(&self, command: SessionCommand) {
        let _ = self.tx.send(command);
    }

    pub fn turn(&self, direction: Direction) {
        self.send(SessionCommand::Turn(direction));
    }

    pub fn set_tick_interval(&self, ms: u64) {
        self.send(SessionCommand::SetTickInterval { ms });
    }

    pub fn resize_viewport(&self, width_px: u32, height_px: u32) {
        self.send(SessionCommand::ResizeViewport {
            width_px,
            height_px,
        });
    }

    pub fn resume(&self) {
        self.send(SessionCommand::Resume);
    }

    pub fn shutdown(&self) {
        self.send(SessionCommand::Shutdown);
    }
}
