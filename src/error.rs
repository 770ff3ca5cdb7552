use thiserror::Error;

/// Stepping stopped because simulated time reached its configured ceiling.
///
/// This is the normal end of a simulation, not a bus failure: a transaction
/// that sees it simply has no clock left to finish on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("simulation horizon reached at {time_ns} ns")]
pub struct HorizonReached {
    pub time_ns: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Why an [`AxiLiteMaster`](crate::master::AxiLiteMaster) could not be built.
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Horizon(#[from] HorizonReached),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    #[error(transparent)]
    Horizon(#[from] HorizonReached),
    #[error("{0}")]
    Failed(String),
}

impl SeqError {
    pub fn failed(msg: impl Into<String>) -> Self {
        SeqError::Failed(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize junit report: {0}")]
    Junit(String),
}
