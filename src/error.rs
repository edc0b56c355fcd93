use thiserror::Error;

/// Errors produced by the simulation core.
///
/// Everything here is recoverable at the adapter boundary: the CLI logs and
/// exits, the HTTP layer maps to a structured failure response.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation was requested before a simulation was started (or after
    /// it was reset).
    #[error("no active simulation")]
    NoActiveSimulation,
}

pub type Result<T> = std::result::Result<T, Error>;
