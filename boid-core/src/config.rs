//! Flock configuration and its validation.

use thiserror::Error;

/// Order in which one tick reads and writes the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Update the velocity of agent `i` and move it before touching `i + 1`.
    /// Agents later in the array observe the already-moved state of earlier
    /// ones within the same tick.
    #[default]
    Sequential,
    /// Compute every velocity from the pre-tick snapshot, then move everyone.
    /// Produces different trajectories than `Sequential`.
    Batched,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("plane dimensions must be finite and positive, got {width}x{height}")]
    Plane { width: f32, height: f32 },

    #[error("agent count must be at least 1")]
    EmptyPopulation,

    #[error("agent count {requested} exceeds fixed capacity {capacity}")]
    Capacity { requested: usize, capacity: usize },

    #[error("max speed must be finite and positive, got {0}")]
    MaxSpeed(f32),

    #[error("max speed {speed} must be smaller than both plane dimensions")]
    SpeedExceedsPlane { speed: f32 },

    #[error("separation distance must be finite and positive, got {0}")]
    SeparationDistance(f32),

    #[error("{name} distance must be finite and non-negative, got {value}")]
    Radius { name: &'static str, value: f32 },

    #[error("cursor attraction must be finite, got {0}")]
    CursorAttraction(f32),

    #[error("initial velocity range must be finite and non-negative, got {0}")]
    InitialVelocity(f32),
}

/// Tunable constants of the simulation.
///
/// Every field is public so a presentation layer or a test can build its
/// own; call [`FlockConfig::validate`] (flock constructors do) before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    pub width: f32,
    pub height: f32,
    pub agent_count: usize,
    /// Upper bound on every agent's speed after a velocity update.
    pub max_speed: f32,
    pub separation_distance: f32,
    pub alignment_distance: f32,
    pub cohesion_distance: f32,
    /// Weight of the unit vector pointing at the pointer target.
    pub cursor_attraction: f32,
    /// Initial velocity components are drawn from `[-r, r)`.
    pub initial_velocity_range: f32,
    pub update_mode: UpdateMode,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            width: 1900.0,
            height: 1200.0,
            agent_count: 100,
            max_speed: 2.0,
            separation_distance: 20.0,
            alignment_distance: 50.0,
            cohesion_distance: 100.0,
            cursor_attraction: 1.55,
            initial_velocity_range: 1.0,
            update_mode: UpdateMode::Sequential,
        }
    }
}

impl FlockConfig {
    pub fn with_plane(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_agent_count(mut self, agent_count: usize) -> Self {
        self.agent_count = agent_count;
        self
    }

    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::Plane {
                width: self.width,
                height: self.height,
            });
        }
        if self.agent_count == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !positive(self.max_speed) {
            return Err(ConfigError::MaxSpeed(self.max_speed));
        }
        // Wrapping adds or subtracts one plane dimension, once.
        if self.max_speed >= self.width || self.max_speed >= self.height {
            return Err(ConfigError::SpeedExceedsPlane {
                speed: self.max_speed,
            });
        }
        if !positive(self.separation_distance) {
            return Err(ConfigError::SeparationDistance(self.separation_distance));
        }
        for (name, value) in [
            ("alignment", self.alignment_distance),
            ("cohesion", self.cohesion_distance),
        ] {
            if !non_negative(value) {
                return Err(ConfigError::Radius { name, value });
            }
        }
        if !self.cursor_attraction.is_finite() {
            return Err(ConfigError::CursorAttraction(self.cursor_attraction));
        }
        if !non_negative(self.initial_velocity_range) {
            return Err(ConfigError::InitialVelocity(self.initial_velocity_range));
        }
        Ok(())
    }
}
