use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use boid_core::{FlockConfig, UpdateMode};
use boid_shared::FlockSettings;

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub agent_count: Option<usize>,
    pub batched: bool,
}

impl Overrides {
    pub fn apply(&self, mut config: FlockConfig) -> FlockConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(agent_count) = self.agent_count {
            config.agent_count = agent_count;
        }
        if self.batched {
            config.update_mode = UpdateMode::Batched;
        }
        config
    }
}

/// Reads JSON settings from `path`, or the defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<FlockSettings> {
    let Some(path) = path else {
        return Ok(FlockSettings::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            width: Some(640.0),
            agent_count: Some(3),
            batched: true,
            ..Overrides::default()
        };
        let config = overrides.apply(FlockConfig::default());

        assert_eq!(config.width, 640.0);
        assert_eq!(config.height, 1200.0);
        assert_eq!(config.agent_count, 3);
        assert_eq!(config.update_mode, UpdateMode::Batched);
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = load_settings(None).unwrap();
        assert_eq!(FlockConfig::from(settings), FlockConfig::default());
    }
}
