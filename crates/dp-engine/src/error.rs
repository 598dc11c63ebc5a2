use dp_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid scenario configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn agent thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
