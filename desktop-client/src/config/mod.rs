mod audio_config;
mod main_config;

pub use audio_config::AudioConfig;
pub use main_config::{ClientConfigManager, Config, get_config_manager};
