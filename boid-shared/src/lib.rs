#![cfg_attr(not(feature = "std"), no_std)]

use boid_core::{Agent, FlockConfig, PointerTarget, UpdateMode};
use serde::{Deserialize, Serialize};

/// Represents a 2D position in plane coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer update fed to the simulation by whatever drives it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetUpdate {
    pub x: i32,
    pub y: i32,
}

impl From<TargetUpdate> for PointerTarget {
    fn from(update: TargetUpdate) -> Self {
        PointerTarget::new(update.x, update.y)
    }
}

impl From<PointerTarget> for TargetUpdate {
    fn from(target: PointerTarget) -> Self {
        Self {
            x: target.x,
            y: target.y,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    #[default]
    Sequential,
    Batched,
}

impl From<UpdateOrder> for UpdateMode {
    fn from(order: UpdateOrder) -> Self {
        match order {
            UpdateOrder::Sequential => UpdateMode::Sequential,
            UpdateOrder::Batched => UpdateMode::Batched,
        }
    }
}

impl From<UpdateMode> for UpdateOrder {
    fn from(mode: UpdateMode) -> Self {
        match mode {
            UpdateMode::Sequential => UpdateOrder::Sequential,
            UpdateMode::Batched => UpdateOrder::Batched,
        }
    }
}

/// Flock configuration as it appears in settings files.
///
/// Missing fields take the [`FlockConfig`] defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub width: f32,
    pub height: f32,
    pub agent_count: usize,
    pub max_speed: f32,
    pub separation_distance: f32,
    pub alignment_distance: f32,
    pub cohesion_distance: f32,
    pub cursor_attraction: f32,
    pub initial_velocity_range: f32,
    pub update_order: UpdateOrder,
}

impl Default for FlockSettings {
    fn default() -> Self {
        FlockConfig::default().into()
    }
}

impl From<FlockConfig> for FlockSettings {
    fn from(config: FlockConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            agent_count: config.agent_count,
            max_speed: config.max_speed,
            separation_distance: config.separation_distance,
            alignment_distance: config.alignment_distance,
            cohesion_distance: config.cohesion_distance,
            cursor_attraction: config.cursor_attraction,
            initial_velocity_range: config.initial_velocity_range,
            update_order: config.update_mode.into(),
        }
    }
}

impl From<FlockSettings> for FlockConfig {
    fn from(settings: FlockSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            agent_count: settings.agent_count,
            max_speed: settings.max_speed,
            separation_distance: settings.separation_distance,
            alignment_distance: settings.alignment_distance,
            cohesion_distance: settings.cohesion_distance,
            cursor_attraction: settings.cursor_attraction,
            initial_velocity_range: settings.initial_velocity_range,
            update_mode: settings.update_order.into(),
        }
    }
}

/// Read-only view of one agent for drawing or diagnostics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub position: Position,
    pub velocity: Position,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        Self {
            position: Position::new(agent.position.x, agent.position.y),
            velocity: Position::new(agent.velocity.x, agent.velocity.y),
        }
    }
}

/// State of the whole population after one tick
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub target: TargetUpdate,
    pub agents: Vec<AgentSnapshot>,
}

#[cfg(feature = "std")]
impl FrameSnapshot {
    pub fn capture(tick: u64, target: PointerTarget, agents: &[Agent]) -> Self {
        Self {
            tick,
            target: target.into(),
            agents: agents.iter().map(AgentSnapshot::from).collect(),
        }
    }

    /// Single-line JSON encoding, suitable for JSON-lines output.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
