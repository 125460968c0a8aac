//! Per-agent steering rules and position integration.
//!
//! All functions work on a plain `[Agent]` slice so that both the
//! `Vec`-backed [`crate::Flock`] and the fixed-capacity
//! [`crate::FixedFlock`] share one implementation. Neighbor search is an
//! exact scan over the whole slice.

use crate::{Agent, FlockConfig, UpdateMode, Vector2D};

/// The four rule vectors for one agent, before they are blended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringTerms {
    /// Unit vector away from neighbors inside the separation radius.
    pub separation: Vector2D,
    /// Mean velocity of neighbors inside the alignment radius. Not normalized.
    pub alignment: Vector2D,
    /// Unit vector toward the centroid of neighbors inside the cohesion radius.
    pub cohesion: Vector2D,
    /// Unit vector toward the pointer target.
    pub attraction: Vector2D,
    /// Distance to the pointer target, measured before normalization.
    pub cursor_distance: f32,
    /// `1 + (separation_distance - cursor_distance) / separation_distance`.
    /// Exceeds 1 near the target and turns negative far from it.
    pub separation_factor: f32,
}

impl SteeringTerms {
    /// Velocity change these terms produce.
    pub fn delta(&self, cursor_attraction: f32) -> Vector2D {
        self.separation * self.separation_factor
            + self.alignment
            + self.cohesion
            + self.attraction * cursor_attraction
    }
}

/// Evaluates the separation, alignment, cohesion and attraction rules for
/// `agents[index]` against every other agent in the slice.
///
/// The agent is excluded by index, so coincident agents still count as
/// neighbors of each other.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn steering_terms(
    agents: &[Agent],
    index: usize,
    target: Vector2D,
    config: &FlockConfig,
) -> SteeringTerms {
    let agent = agents[index];

    let mut separation = Vector2D::zero();
    let mut alignment = Vector2D::zero();
    let mut cohesion = Vector2D::zero();
    let mut alignment_count = 0usize;
    let mut cohesion_count = 0usize;

    for (i, other) in agents.iter().enumerate() {
        if i == index {
            continue;
        }

        let d = agent.position.distance(&other.position);
        if d < config.separation_distance {
            separation += agent.position - other.position;
        }
        if d < config.alignment_distance {
            alignment += other.velocity;
            alignment_count += 1;
        }
        if d < config.cohesion_distance {
            cohesion += other.position;
            cohesion_count += 1;
        }
    }

    let separation = separation.normalize();

    if alignment_count > 0 {
        alignment = alignment / alignment_count as f32;
    }

    if cohesion_count > 0 {
        cohesion = cohesion / cohesion_count as f32;
        cohesion -= agent.position;
        cohesion = cohesion.normalize();
    }

    let to_target = target - agent.position;
    let cursor_distance = to_target.magnitude();
    let attraction = to_target.normalize();
    let separation_factor =
        1.0 + (config.separation_distance - cursor_distance) / config.separation_distance;

    SteeringTerms {
        separation,
        alignment,
        cohesion,
        attraction,
        cursor_distance,
        separation_factor,
    }
}

/// Velocity `agents[index]` would have after one rule step, clamped to
/// `config.max_speed`. Does not modify the slice.
pub fn next_velocity(
    agents: &[Agent],
    index: usize,
    target: Vector2D,
    config: &FlockConfig,
) -> Vector2D {
    let terms = steering_terms(agents, index, target, config);
    let velocity = agents[index].velocity + terms.delta(config.cursor_attraction);
    velocity.limit(config.max_speed)
}

/// Applies one rule step to `agents[index]`'s velocity in place. Position
/// is left untouched.
pub fn compute_velocity_delta(
    agents: &mut [Agent],
    index: usize,
    target: Vector2D,
    config: &FlockConfig,
) {
    agents[index].velocity = next_velocity(agents, index, target, config);
}

/// Explicit Euler step of one tick followed by a single toroidal wrap per
/// axis. Leaves the position in `[0, width) x [0, height)` as long as the
/// speed is below both dimensions.
pub fn integrate(agent: &mut Agent, width: f32, height: f32) {
    agent.position += agent.velocity;
    agent.position.x = wrap(agent.position.x, width);
    agent.position.y = wrap(agent.position.y, height);
}

fn wrap(mut value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        value += extent;
    }
    // Also catches `-tiny + extent` rounding up to `extent`.
    if value >= extent {
        value -= extent;
    }
    value
}

/// Updates every velocity in index order, in place. Agents later in the
/// slice see the new velocities of earlier ones.
pub fn update_all(agents: &mut [Agent], target: Vector2D, config: &FlockConfig) {
    for i in 0..agents.len() {
        compute_velocity_delta(agents, i, target, config);
    }
}

pub fn move_all(agents: &mut [Agent], config: &FlockConfig) {
    for agent in agents.iter_mut() {
        integrate(agent, config.width, config.height);
    }
}

/// One tick in [`UpdateMode::Sequential`] order: each agent is updated and
/// moved before the next one is considered.
pub fn step_sequential(agents: &mut [Agent], target: Vector2D, config: &FlockConfig) {
    for i in 0..agents.len() {
        compute_velocity_delta(agents, i, target, config);
        integrate(&mut agents[i], config.width, config.height);
    }
}

/// One tick in [`UpdateMode::Batched`] order. `scratch` receives the new
/// velocities and must be at least as long as `agents`.
///
/// # Panics
///
/// Panics if `scratch` is shorter than `agents`.
pub fn step_batched(
    agents: &mut [Agent],
    target: Vector2D,
    config: &FlockConfig,
    scratch: &mut [Vector2D],
) {
    assert!(
        scratch.len() >= agents.len(),
        "scratch buffer holds {} velocities, need {}",
        scratch.len(),
        agents.len()
    );

    for (i, slot) in scratch.iter_mut().enumerate().take(agents.len()) {
        *slot = next_velocity(agents, i, target, config);
    }
    for (agent, velocity) in agents.iter_mut().zip(scratch.iter()) {
        agent.velocity = *velocity;
    }
    move_all(agents, config);
}

/// One tick in the order selected by `config.update_mode`.
pub fn step(
    agents: &mut [Agent],
    target: Vector2D,
    config: &FlockConfig,
    scratch: &mut [Vector2D],
) {
    match config.update_mode {
        UpdateMode::Sequential => step_sequential(agents, target, config),
        UpdateMode::Batched => step_batched(agents, target, config, scratch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f32, y: f32) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::zero())
    }

    #[test]
    fn test_isolated_agent_on_target_keeps_velocity() {
        let config = FlockConfig::default();
        let mut agents = [
            Agent::new(Vector2D::new(100.0, 100.0), Vector2D::new(0.5, -0.25)),
            still(1000.0, 1000.0),
        ];

        let terms = steering_terms(&agents, 0, Vector2D::new(100.0, 100.0), &config);
        assert_eq!(terms.separation, Vector2D::zero());
        assert_eq!(terms.alignment, Vector2D::zero());
        assert_eq!(terms.cohesion, Vector2D::zero());
        assert_eq!(terms.attraction, Vector2D::zero());

        compute_velocity_delta(&mut agents, 0, Vector2D::new(100.0, 100.0), &config);
        assert_eq!(agents[0].velocity, Vector2D::new(0.5, -0.25));
        assert_eq!(agents[0].position, Vector2D::new(100.0, 100.0));
    }

    #[test]
    fn test_isolated_agent_only_attracted() {
        let config = FlockConfig::default();
        let mut agents = [still(100.0, 100.0)];

        compute_velocity_delta(&mut agents, 0, Vector2D::new(100.0, 200.0), &config);
        assert!((agents[0].velocity.x).abs() < 1e-6);
        assert!((agents[0].velocity.y - 1.55).abs() < 1e-6);
    }

    #[test]
    fn test_alignment_is_mean_not_unit() {
        let config = FlockConfig::default();
        let agents = [
            still(100.0, 100.0),
            Agent::new(Vector2D::new(130.0, 100.0), Vector2D::new(0.2, 0.0)),
            Agent::new(Vector2D::new(100.0, 130.0), Vector2D::new(0.4, 0.0)),
        ];

        let terms = steering_terms(&agents, 0, Vector2D::new(100.0, 100.0), &config);
        assert!((terms.alignment.x - 0.3).abs() < 1e-6);
        assert_eq!(terms.alignment.y, 0.0);
    }

    #[test]
    fn test_cohesion_points_at_centroid() {
        let config = FlockConfig::default();
        let agents = [still(100.0, 100.0), still(160.0, 100.0), still(160.0, 160.0)];

        let terms = steering_terms(&agents, 0, Vector2D::new(100.0, 100.0), &config);
        let expected = Vector2D::new(60.0, 30.0).normalize();
        assert!((terms.cohesion.x - expected.x).abs() < 1e-6);
        assert!((terms.cohesion.y - expected.y).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_agents_have_zero_separation() {
        let config = FlockConfig::default();
        let agents = [still(50.0, 50.0), still(50.0, 50.0)];

        let terms = steering_terms(&agents, 0, Vector2D::new(50.0, 50.0), &config);
        assert_eq!(terms.separation, Vector2D::zero());
        // Still a neighbor for cohesion, whose centroid offset is zero too.
        assert_eq!(terms.cohesion, Vector2D::zero());
    }

    #[test]
    fn test_separation_factor_formula() {
        let config = FlockConfig::default();
        let agents = [still(0.0, 0.0)];

        let near = steering_terms(&agents, 0, Vector2D::new(0.0, 0.0), &config);
        assert_eq!(near.separation_factor, 2.0);

        let at_radius = steering_terms(&agents, 0, Vector2D::new(20.0, 0.0), &config);
        assert_eq!(at_radius.separation_factor, 1.0);

        let far = steering_terms(&agents, 0, Vector2D::new(60.0, 0.0), &config);
        assert_eq!(far.separation_factor, -1.0);
    }

    #[test]
    fn test_speed_is_clamped() {
        let config = FlockConfig::default();
        let mut agents = [Agent::new(Vector2D::new(10.0, 10.0), Vector2D::new(5.0, 5.0))];

        compute_velocity_delta(&mut agents, 0, Vector2D::new(500.0, 10.0), &config);
        assert!((agents[0].speed() - config.max_speed).abs() < 1e-5);
    }

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut agent = Agent::new(Vector2D::new(10.0, 20.0), Vector2D::new(1.5, -2.0));
        integrate(&mut agent, 100.0, 100.0);
        assert_eq!(agent.position, Vector2D::new(11.5, 18.0));
    }

    #[test]
    fn test_integrate_wraps_each_axis() {
        let mut agent = Agent::new(Vector2D::new(0.5, 99.5), Vector2D::new(-1.0, 1.0));
        integrate(&mut agent, 100.0, 100.0);
        assert_eq!(agent.position, Vector2D::new(99.5, 0.5));
    }

    #[test]
    fn test_integrate_never_lands_on_far_edge() {
        let mut agent = Agent::new(Vector2D::new(99.0, 0.0), Vector2D::new(1.0, 0.0));
        integrate(&mut agent, 100.0, 100.0);
        assert_eq!(agent.position.x, 0.0);

        let mut agent = Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(-1e-9, 0.0));
        integrate(&mut agent, 1900.0, 1200.0);
        assert!(agent.position.x >= 0.0 && agent.position.x < 1900.0);
    }

    #[test]
    fn test_sequential_and_batched_diverge() {
        let sequential = FlockConfig::default();
        let batched = sequential.with_update_mode(UpdateMode::Batched);
        let start = [
            Agent::new(Vector2D::new(100.0, 100.0), Vector2D::new(1.0, 0.0)),
            Agent::new(Vector2D::new(110.0, 100.0), Vector2D::new(0.0, 1.0)),
            Agent::new(Vector2D::new(100.0, 115.0), Vector2D::new(-1.0, 0.0)),
        ];
        let target = Vector2D::new(300.0, 300.0);

        let mut a = start;
        let mut b = start;
        let mut scratch = [Vector2D::zero(); 3];
        step(&mut a, target, &sequential, &mut scratch);
        step(&mut b, target, &batched, &mut scratch);

        // Agent 0 reads nothing fresh in either mode.
        assert_eq!(a[0], b[0]);
        assert_ne!(a[2], b[2]);
    }

    #[test]
    fn test_batched_reads_pre_tick_snapshot() {
        let config = FlockConfig::default().with_update_mode(UpdateMode::Batched);
        let start = [
            Agent::new(Vector2D::new(100.0, 100.0), Vector2D::new(1.0, 0.0)),
            Agent::new(Vector2D::new(110.0, 100.0), Vector2D::new(0.0, 1.0)),
        ];
        let target = Vector2D::new(300.0, 300.0);
        let expected_second = next_velocity(&start, 1, target, &config);

        let mut agents = start;
        let mut scratch = [Vector2D::zero(); 2];
        step_batched(&mut agents, target, &config, &mut scratch);
        assert_eq!(agents[1].velocity, expected_second);
    }

    #[test]
    #[should_panic(expected = "scratch buffer")]
    fn test_batched_rejects_short_scratch() {
        let config = FlockConfig::default();
        let mut agents = [still(1.0, 1.0), still(2.0, 2.0)];
        step_batched(&mut agents, Vector2D::zero(), &config, &mut []);
    }
}
