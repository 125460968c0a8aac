//! Simulation state owners: the agents, their configuration and the current
//! pointer target, advanced one tick at a time.

use log::{debug, trace};
use rand::Rng;

use crate::{engine, population, Agent, ConfigError, FlockConfig, PointerTarget, Vector2D};

/// A fixed-size population for std environments.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct Flock {
    agents: Vec<Agent>,
    config: FlockConfig,
    target: PointerTarget,
    ticks: u64,
    scratch: Vec<Vector2D>,
}

#[cfg(feature = "std")]
impl Flock {
    /// Validates `config` and places `config.agent_count` random agents.
    pub fn new<R: Rng + ?Sized>(config: FlockConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let agents = population::spawn(&config, rng).collect();
        Ok(Self::assemble(config, agents))
    }

    /// Like [`Flock::new`] with a `SmallRng` seeded from `seed`.
    pub fn with_seed(config: FlockConfig, seed: u64) -> Result<Self, ConfigError> {
        use rand::{rngs::SmallRng, SeedableRng};

        debug!("seeding population with {}", seed);
        Self::new(config, &mut SmallRng::seed_from_u64(seed))
    }

    /// Builds a flock from explicit agents. `config.agent_count` is replaced
    /// by the number of agents given.
    pub fn from_agents(
        config: FlockConfig,
        agents: impl IntoIterator<Item = Agent>,
    ) -> Result<Self, ConfigError> {
        let agents: Vec<Agent> = agents.into_iter().collect();
        let config = config.with_agent_count(agents.len());
        config.validate()?;
        Ok(Self::assemble(config, agents))
    }

    fn assemble(config: FlockConfig, agents: Vec<Agent>) -> Self {
        debug!(
            "flock of {} agents on {}x{} plane, {:?} updates",
            agents.len(),
            config.width,
            config.height,
            config.update_mode
        );
        let scratch = vec![Vector2D::zero(); agents.len()];
        Self {
            agents,
            config,
            target: PointerTarget::center_of(config.width, config.height),
            ticks: 0,
            scratch,
        }
    }

    pub fn set_target(&mut self, target: PointerTarget) {
        self.target = target;
    }

    pub fn target(&self) -> PointerTarget {
        self.target
    }

    /// Advances one tick toward the current target.
    pub fn step(&mut self) {
        self.step_towards(self.target.to_vector());
    }

    /// Advances one tick toward an arbitrary float target without changing
    /// the stored pointer target.
    pub fn step_towards(&mut self, target: Vector2D) {
        engine::step(&mut self.agents, target, &self.config, &mut self.scratch);
        self.ticks += 1;
        trace!("tick {} toward ({}, {})", self.ticks, target.x, target.y);
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector2D> + '_ {
        self.agents.iter().map(|agent| agent.position)
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn mean_speed(&self) -> f32 {
        mean_speed(&self.agents)
    }
}

/// A population of at most `N` agents with no heap allocation, for
/// embedded targets.
#[derive(Debug, Clone)]
pub struct FixedFlock<const N: usize> {
    agents: heapless::Vec<Agent, N>,
    config: FlockConfig,
    target: PointerTarget,
    ticks: u64,
    scratch: [Vector2D; N],
}

impl<const N: usize> FixedFlock<N> {
    pub fn new<R: Rng + ?Sized>(config: FlockConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut agents = heapless::Vec::new();
        for agent in population::spawn(&config, rng) {
            agents
                .push(agent)
                .map_err(|_| Self::capacity_error(config.agent_count))?;
        }
        Ok(Self::assemble(config, agents))
    }

    pub fn from_agents(config: FlockConfig, agents: &[Agent]) -> Result<Self, ConfigError> {
        let stored =
            heapless::Vec::from_slice(agents).map_err(|_| Self::capacity_error(agents.len()))?;
        let config = config.with_agent_count(agents.len());
        config.validate()?;
        Ok(Self::assemble(config, stored))
    }

    fn capacity_error(requested: usize) -> ConfigError {
        ConfigError::Capacity {
            requested,
            capacity: N,
        }
    }

    fn assemble(config: FlockConfig, agents: heapless::Vec<Agent, N>) -> Self {
        debug!("fixed flock of {}/{} agents", agents.len(), N);
        Self {
            agents,
            config,
            target: PointerTarget::center_of(config.width, config.height),
            ticks: 0,
            scratch: [Vector2D::zero(); N],
        }
    }

    pub fn set_target(&mut self, target: PointerTarget) {
        self.target = target;
    }

    pub fn target(&self) -> PointerTarget {
        self.target
    }

    pub fn step(&mut self) {
        let target = self.target.to_vector();
        engine::step(&mut self.agents, target, &self.config, &mut self.scratch);
        self.ticks += 1;
        trace!("tick {}", self.ticks);
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn mean_speed(&self) -> f32 {
        mean_speed(&self.agents)
    }
}

fn mean_speed(agents: &[Agent]) -> f32 {
    if agents.is_empty() {
        return 0.0;
    }
    agents.iter().map(Agent::speed).sum::<f32>() / agents.len() as f32
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_flock_creation() {
        let config = FlockConfig::default()
            .with_plane(800.0, 600.0)
            .with_agent_count(50);
        let flock = Flock::with_seed(config, 3).unwrap();
        assert_eq!(flock.agents().len(), 50);
        assert_eq!(flock.config().width, 800.0);
        assert_eq!(flock.config().height, 600.0);
        assert_eq!(flock.target(), PointerTarget::new(400, 300));
    }

    #[test]
    fn test_flock_rejects_invalid_config() {
        let config = FlockConfig::default().with_plane(-1.0, 600.0);
        assert!(Flock::with_seed(config, 0).is_err());
    }

    #[test]
    fn test_flock_update() {
        let config = FlockConfig::default().with_agent_count(10);
        let mut flock = Flock::with_seed(config, 11).unwrap();
        let initial_positions: Vec<_> = flock.positions().collect();

        flock.step();

        let changed = flock
            .positions()
            .zip(initial_positions.iter())
            .any(|(now, &initial)| now != initial);
        assert!(changed);
        assert_eq!(flock.ticks(), 1);
    }

    #[test]
    fn test_population_size_is_fixed() {
        let config = FlockConfig::default().with_agent_count(25);
        let mut flock = Flock::with_seed(config, 5).unwrap();
        for _ in 0..20 {
            flock.step();
        }
        assert_eq!(flock.agents().len(), 25);
    }

    #[test]
    fn test_from_agents_overrides_count() {
        let agents = [
            Agent::new(Vector2D::new(1.0, 1.0), Vector2D::zero()),
            Agent::new(Vector2D::new(2.0, 2.0), Vector2D::zero()),
        ];
        let flock = Flock::from_agents(FlockConfig::default(), agents).unwrap();
        assert_eq!(flock.config().agent_count, 2);
    }

    #[test]
    fn test_fixed_flock_capacity() {
        let config = FlockConfig::default().with_agent_count(9);
        let mut rng = SmallRng::seed_from_u64(1);
        let err = FixedFlock::<8>::new(config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Capacity {
                requested: 9,
                capacity: 8
            }
        );
    }

    #[test]
    fn test_fixed_flock_seeded_like_flock() {
        let config = FlockConfig::default().with_agent_count(24);
        let flock = Flock::new(config, &mut SmallRng::seed_from_u64(17)).unwrap();
        let fixed = FixedFlock::<24>::new(config, &mut SmallRng::seed_from_u64(17)).unwrap();

        assert_eq!(fixed.agents().len(), 24);
        assert_eq!(fixed.config().agent_count, 24);
        assert_eq!(fixed.ticks(), 0);
        assert_eq!(flock.agents(), fixed.agents());
    }

    #[test]
    fn test_fixed_flock_from_agents_over_capacity() {
        let agents = [Agent::new(Vector2D::new(1.0, 1.0), Vector2D::zero()); 3];
        let err = FixedFlock::<2>::from_agents(FlockConfig::default(), &agents).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Capacity {
                requested: 3,
                capacity: 2
            }
        );
    }

    #[test]
    fn test_fixed_flock_matches_flock() {
        let config = FlockConfig::default().with_agent_count(16);
        let mut flock = Flock::with_seed(config, 99).unwrap();
        let mut fixed = FixedFlock::<32>::from_agents(config, flock.agents()).unwrap();

        flock.set_target(PointerTarget::new(10, 10));
        fixed.set_target(PointerTarget::new(10, 10));
        for _ in 0..30 {
            flock.step();
            fixed.step();
        }
        assert_eq!(flock.agents(), fixed.agents());
    }
}
