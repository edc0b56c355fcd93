//! Natural-selection simulator.
//!
//! A population of individuals carrying a continuous trait evolves toward an
//! environmental optimum: fitness is a Gaussian function of the distance to
//! the optimum, parents are chosen by tournament selection, reproduction is
//! asexual cloning with stochastic Gaussian mutation, and the population
//! size follows a discrete logistic-growth law with carrying capacity K.
//!
//! The engine lives in [`engine`] and [`simulation`]; [`server`] is a thin
//! HTTP JSON adapter over one live [`simulation::Simulation`].

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod rng;
pub mod server;
pub mod simulation;
pub mod stats;
