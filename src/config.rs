use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Simulation configuration parameters.
///
/// Immutable for the lifetime of a simulation. Every field has a documented
/// default, so a partial JSON body or TOML file is enough to start a run.
/// Field names are camelCase on the wire for compatibility with the UI.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentConfig {
    /// Initial population size (N0).
    pub pop_size: usize,

    /// Per-individual probability of mutation on reproduction.
    pub mutation_rate: f64,
    /// Standard deviation of the mutation magnitude.
    pub mutation_sigma: f64,

    /// Location of the fitness peak (x_opt).
    pub optimal_value: f64,
    /// Width of the fitness curve (sigma_env).
    pub tolerance: f64,

    /// Carrying capacity (K).
    pub carrying_capacity: f64,
    /// Intrinsic growth rate (r); may be negative.
    pub growth_rate: f64,

    /// Seed for the random number generator. Unset means OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            pop_size: 50,
            mutation_rate: 0.1,
            mutation_sigma: 1.0,
            optimal_value: 10.0,
            tolerance: 5.0,
            carrying_capacity: 1000.0,
            growth_rate: 0.5,
            seed: None,
        }
    }
}

impl EnvironmentConfig {
    /// Load an [`EnvironmentConfig`] from a TOML file.
    ///
    /// Missing fields take their defaults. Performs validation on all
    /// parameters before returning.
    pub fn from_file<P: AsRef<Path>>(file: P) -> anyhow::Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: EnvironmentConfig =
            toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    /// Validate all parameters.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] on the first violated bound.
    /// NaN fails every check, so invalid input is rejected here rather than
    /// surfacing later as NaN propagation in the engine.
    pub fn validate(&self) -> Result<()> {
        check_num("popSize", self.pop_size, 2..=100_000)?;
        check_num("mutationRate", self.mutation_rate, 0.0..=1.0)?;
        check_non_negative("mutationSigma", self.mutation_sigma)?;
        check_finite("optimalValue", self.optimal_value)?;
        check_positive("tolerance", self.tolerance)?;
        check_positive("carryingCapacity", self.carrying_capacity)?;
        check_finite("growthRate", self.growth_rate)?;
        Ok(())
    }
}

fn check_num<T, R>(name: &str, num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        return Err(Error::InvalidConfiguration(format!(
            "{name} must be in the range {range:?}, but is {num:?}"
        )));
    }
    Ok(())
}

fn check_finite(name: &str, num: f64) -> Result<()> {
    if !num.is_finite() {
        return Err(Error::InvalidConfiguration(format!(
            "{name} must be a finite number, but is {num}"
        )));
    }
    Ok(())
}

fn check_positive(name: &str, num: f64) -> Result<()> {
    if !(num.is_finite() && num > 0.0) {
        return Err(Error::InvalidConfiguration(format!(
            "{name} must be a positive finite number, but is {num}"
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, num: f64) -> Result<()> {
    if !(num.is_finite() && num >= 0.0) {
        return Err(Error::InvalidConfiguration(format!(
            "{name} must be a non-negative finite number, but is {num}"
        )));
    }
    Ok(())
}
