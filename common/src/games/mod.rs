mod broadcaster;
mod session_rng;
mod timer;

pub mod snake;

pub use broadcaster::{GameEventSink, dispatch};
pub use session_rng::SessionRng;
pub use timer::TickTimer;
