use crate::config::EnvironmentConfig;
use crate::engine::Population;
use crate::error::Result;
use crate::stats::GenerationStats;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// One running simulation.
///
/// Owns a [`Population`], its validated configuration, the random number
/// generator, and an append-only history of per-generation statistics. The
/// core is single-threaded and non-reentrant; callers sharing an instance
/// across threads must wrap it in their own mutual-exclusion boundary.
pub struct Simulation {
    cfg: EnvironmentConfig,
    population: Population,
    history: Vec<GenerationStats>,
    rng: ChaCha12Rng,
}

impl Simulation {
    /// Create a new simulation from the given configuration.
    ///
    /// The configuration is validated up front; the generator is seeded from
    /// `cfg.seed` when set, otherwise from OS entropy.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::InvalidConfiguration`] if any
    /// parameter is out of bounds.
    pub fn new(cfg: EnvironmentConfig) -> Result<Self> {
        cfg.validate()?;

        let mut rng = match cfg.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_os_rng(),
        };

        let population = Population::new(cfg.pop_size, cfg.clone(), &mut rng)?;

        Ok(Self {
            cfg,
            population,
            history: Vec::new(),
            rng,
        })
    }

    /// Get the configuration of the simulation.
    pub fn config(&self) -> &EnvironmentConfig {
        &self.cfg
    }

    /// Get the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Advance the simulation by `steps` generations.
    ///
    /// Statistics are appended to the history after every individual
    /// evolution, not just the last. `steps == 0` is treated as 1.
    pub fn step(&mut self, steps: usize) -> GenerationStats {
        let steps = steps.max(1);

        let mut latest = self.population.stats();
        for _ in 0..steps {
            self.population.evolve(&mut self.rng);
            latest = self.population.stats();
            self.history.push(latest);
        }

        latest
    }

    /// Get the full history of the simulation, in chronological order.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Get the current state (latest statistics).
    ///
    /// Before the first step this is a freshly computed generation-0
    /// snapshot; [`Population::stats`] recomputes fitness internally, so the
    /// snapshot is meaningful without any priming call.
    pub fn current_state(&mut self) -> GenerationStats {
        match self.history.last() {
            Some(&stats) => stats,
            None => self.population.stats(),
        }
    }
}
