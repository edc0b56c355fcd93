//! Simulation data types.

use crate::rng::{standard_normal, uniform};
use rand::Rng;

/// A single organism in the population.
///
/// Each individual carries a continuous trait value (`genotype`) and a
/// derived `fitness`. Fitness is recomputed every generation by the engine;
/// a freshly created individual starts at 0 until the next evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genotype: f64,
    fitness: f64,
}

impl Individual {
    /// Create a new individual with the given genotype and zero fitness.
    pub fn new(genotype: f64) -> Self {
        Self {
            genotype,
            fitness: 0.0,
        }
    }

    /// Get the current trait value of the individual.
    pub fn genotype(&self) -> f64 {
        self.genotype
    }

    /// Get the fitness computed by the last evaluation.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Mutate the genotype in place.
    ///
    /// With probability `rate` the genotype is perturbed by a draw from
    /// `N(0, sigma)`. Fitness is left untouched; the caller recomputes it
    /// before the next read.
    pub fn mutate(&mut self, rate: f64, sigma: f64, rng: &mut impl Rng) {
        if uniform(rng) < rate {
            self.genotype += standard_normal(rng) * sigma;
        }
    }
}
