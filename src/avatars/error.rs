//! Boundary errors. The pipeline itself never fails; only decoding what the
//! host hands us and re-encoding the plan can.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid page snapshot: {0}")]
    Snapshot(String),

    #[error("invalid engine config: {0}")]
    Config(String),

    #[error("plan serialization failed: {0}")]
    PlanEncode(String),
}
