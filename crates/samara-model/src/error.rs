use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown merge strategy: {0}")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
