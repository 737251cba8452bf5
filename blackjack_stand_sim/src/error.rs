use thiserror::Error;

/// Errors that can abort a simulation run. Every outcome of a round (bust, push, an empty deck,
/// running out of money) is an ordinary value, so the only error the game itself raises is
/// `InvalidConfiguration`; the remaining variants come from loading a strategy file.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("unable to read strategy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse strategy file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimulationError {
    /// Convenience constructor for an `InvalidConfiguration` error.
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        SimulationError::InvalidConfiguration(message.into())
    }
}
