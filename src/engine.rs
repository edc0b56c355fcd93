use crate::config::EnvironmentConfig;
use crate::error::{Error, Result};
use crate::model::Individual;
use crate::stats::GenerationStats;
use rand::prelude::*;
use rand_distr::Uniform;
use std::ops::Range;

/// Number of candidates drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Hard floor on the population size after a logistic update.
pub const MIN_POPULATION_SIZE: usize = 2;

/// Genotype range for founding individuals. A design constant, not part of
/// the wire config; tests can pass an alternate range to
/// [`Population::with_init_range`].
pub const DEFAULT_INIT_RANGE: Range<f64> = -10.0..10.0;

/// The live generation and the evolutionary step.
///
/// Holds an ordered collection of individuals, the shared read-only
/// configuration, and the number of completed [`Population::evolve`] calls.
pub struct Population {
    individuals: Vec<Individual>,
    generation: u64,
    cfg: EnvironmentConfig,
}

impl Population {
    /// Create a population of `size` individuals with genotypes drawn
    /// uniformly from [`DEFAULT_INIT_RANGE`].
    pub fn new(size: usize, cfg: EnvironmentConfig, rng: &mut impl Rng) -> Result<Self> {
        Self::with_init_range(size, cfg, DEFAULT_INIT_RANGE, rng)
    }

    /// Create a population with founding genotypes drawn uniformly from
    /// `init_range`.
    pub fn with_init_range(
        size: usize,
        cfg: EnvironmentConfig,
        init_range: Range<f64>,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let genotype_dist = Uniform::new(init_range.start, init_range.end).map_err(|err| {
            Error::InvalidConfiguration(format!("invalid genotype init range: {err}"))
        })?;

        let mut individuals = Vec::with_capacity(size);
        for _ in 0..size {
            individuals.push(Individual::new(genotype_dist.sample(rng)));
        }

        Ok(Self {
            individuals,
            generation: 0,
            cfg,
        })
    }

    /// Get the individuals of the current generation.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Get the number of completed evolution steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Recompute the fitness of every individual.
    ///
    /// `fitness = exp(-(genotype - optimalValue)^2 / (2 * tolerance^2))`,
    /// so fitness is in (0, 1] with the peak exactly at the optimum.
    pub fn calculate_fitness(&mut self) {
        let opt = self.cfg.optimal_value;
        let tolerance = self.cfg.tolerance;

        for ind in &mut self.individuals {
            ind.set_fitness(fitness(ind.genotype(), opt, tolerance));
        }
    }

    /// Select a parent by tournament.
    ///
    /// Draws [`TOURNAMENT_SIZE`] candidates uniformly at random with
    /// replacement and returns the fittest; ties keep the first candidate
    /// seen. Requires fitness to be current for the whole population.
    ///
    /// # Panics
    /// Panics if the population is empty; the size floor of 2 keeps evolved
    /// populations away from this.
    pub fn select_parent<'a>(&'a self, rng: &mut impl Rng) -> &'a Individual {
        let mut best = &self.individuals[rng.random_range(0..self.individuals.len())];
        for _ in 1..TOURNAMENT_SIZE {
            let candidate = &self.individuals[rng.random_range(0..self.individuals.len())];
            if candidate.fitness() > best.fitness() {
                best = candidate;
            }
        }
        best
    }

    /// Compute the size of the next generation from the logistic-growth law:
    /// `max(2, floor(N + r * N * (1 - N / K)))`.
    ///
    /// There is no upper clamp beyond the damping of K itself; a large r can
    /// overshoot and oscillate, which is the intended logistic-map-like
    /// behavior.
    pub fn next_population_size(&self) -> usize {
        let n = self.individuals.len() as f64;
        let r = self.cfg.growth_rate;
        let k = self.cfg.carrying_capacity;

        let delta_n = r * n * (1.0 - n / k);
        let next_size = (n + delta_n).floor();

        (next_size.max(MIN_POPULATION_SIZE as f64)) as usize
    }

    /// Produce the next generation.
    ///
    /// Recomputes fitness, derives the next size from the logistic law, then
    /// fills the new generation by tournament selection over the old one,
    /// cloning the parent's genotype and mutating the offspring in place.
    pub fn evolve(&mut self, rng: &mut impl Rng) {
        self.calculate_fitness();

        let next_size = self.next_population_size();

        let mut next_gen = Vec::with_capacity(next_size);
        for _ in 0..next_size {
            let parent = self.select_parent(rng);
            let mut offspring = Individual::new(parent.genotype());
            offspring.mutate(self.cfg.mutation_rate, self.cfg.mutation_sigma, rng);
            next_gen.push(offspring);
        }

        self.individuals = next_gen;
        self.generation += 1;
    }

    /// Compute statistics of the current generation.
    ///
    /// Fitness is recomputed first, so the snapshot always reflects the
    /// genotypes it reports on; callers need no priming call after
    /// construction or [`Population::evolve`].
    pub fn stats(&mut self) -> GenerationStats {
        self.calculate_fitness();

        let n = self.individuals.len();
        if n == 0 {
            // Unreachable given the floor of 2, but the 0/0 is guarded anyway.
            return GenerationStats {
                generation: self.generation,
                population_size: 0,
                avg_fitness: 0.0,
                best_fitness: 0.0,
                best_genotype: 0.0,
            };
        }

        let total_fitness: f64 = self.individuals.iter().map(Individual::fitness).sum();

        let mut best = &self.individuals[0];
        for ind in &self.individuals[1..] {
            if ind.fitness() > best.fitness() {
                best = ind;
            }
        }

        GenerationStats {
            generation: self.generation,
            population_size: n,
            avg_fitness: total_fitness / n as f64,
            best_fitness: best.fitness(),
            best_genotype: best.genotype(),
        }
    }
}

/// Gaussian fitness of a genotype given the environmental optimum and
/// tolerance.
pub fn fitness(genotype: f64, optimal_value: f64, tolerance: f64) -> f64 {
    let diff = genotype - optimal_value;
    (-(diff * diff) / (2.0 * tolerance * tolerance)).exp()
}
