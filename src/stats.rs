use serde::{Deserialize, Serialize};

/// Snapshot of a population at the end of a generation.
///
/// Immutable once appended to the simulation history. Field names are
/// camelCase on the wire for compatibility with the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub generation: u64,
    pub population_size: usize,
    pub avg_fitness: f64,
    pub best_fitness: f64,
    pub best_genotype: f64,
}

/// Streaming mean and standard deviation (Welford's algorithm).
///
/// Used by the CLI runner to summarize a run without keeping every value.
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        if self.n_vals > 1 {
            (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
        } else {
            f64::NAN
        }
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
