//! Random initial placement of the population.

use rand::Rng;

use crate::{Agent, FlockConfig, Vector2D};

/// Draws one agent uniformly over the plane, with each velocity component
/// uniform in `[-initial_velocity_range, initial_velocity_range)`.
pub fn random_agent<R: Rng + ?Sized>(config: &FlockConfig, rng: &mut R) -> Agent {
    let position = Vector2D::new(
        rng.gen_range(0.0..config.width),
        rng.gen_range(0.0..config.height),
    );
    let velocity = Vector2D::new(
        symmetric(rng, config.initial_velocity_range),
        symmetric(rng, config.initial_velocity_range),
    );
    Agent::new(position, velocity)
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    if range > 0.0 {
        rng.gen_range(-range..range)
    } else {
        0.0
    }
}

/// Yields `config.agent_count` freshly drawn agents.
pub fn spawn<'a, R: Rng + ?Sized>(
    config: &'a FlockConfig,
    rng: &'a mut R,
) -> impl Iterator<Item = Agent> + 'a {
    (0..config.agent_count).map(move |_| random_agent(config, &mut *rng))
}

/// Seed derived from the wall clock, for runs that do not ask for
/// reproducibility.
#[cfg(feature = "std")]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
