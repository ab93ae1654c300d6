use serde::{Deserialize, Serialize};
use snake_common::config::Validate;
use snake_common::games::snake::validate_volume;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct AudioConfig {
    pub enabled: bool,
    pub volume: f32,
}

impl Validate for AudioConfig {
    fn validate(&self) -> Result<(), String> {
        validate_volume(self.volume)?;
        Ok(())
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.5,
        }
    }
}
