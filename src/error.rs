use thiserror::Error;

/// Failures the link graph can report back to its caller
#[derive(Debug, Error, PartialEq)]
pub enum RankError {
    #[error("no link with identifier `{0}` in the graph")]
    NotFound(String),

    #[error("invalid rank configuration: {0}")]
    InvalidConfig(String),

    /// Propagation started at `start` processed `steps` nodes without the queue emptying
    #[error("rank propagation from `{start}` exceeded {steps} steps")]
    StepLimitExceeded { start: String, steps: usize },
}

pub type Result<T> = std::result::Result<T, RankError>;
