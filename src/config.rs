use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_PATH: &str = "chess_config.json";

/// Session options, read once at startup. A missing or unreadable
/// file falls back to the defaults rather than failing the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the UCI engine binary.
    pub engine_path: String,
    /// Engine strength, 1-20.
    pub skill_level: u8,
    /// Time budget per engine move, in seconds.
    pub move_time_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            engine_path: "stockfish".to_string(),
            skill_level: 10,
            move_time_secs: 0.1,
        }
    }
}

impl SessionConfig {
    pub fn load() -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(CONFIG_PATH)?;
        let config: SessionConfig = serde_json::from_str(&text)?;
        Ok(config.sanitized())
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    pub fn move_time(&self) -> Duration {
        Duration::from_secs_f64(self.move_time_secs)
    }

    fn sanitized(mut self) -> Self {
        self.skill_level = self.skill_level.clamp(1, 20);
        if !self.move_time_secs.is_finite() || self.move_time_secs <= 0.0 {
            self.move_time_secs = Self::default().move_time_secs;
        }
        self
    }
}
