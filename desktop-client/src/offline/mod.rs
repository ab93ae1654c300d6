mod broadcaster;
mod snake_runner;

pub use broadcaster::LocalBroadcaster;
pub use snake_runner::spawn_snake_game;
