use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("geometry error: {0}")]
    Geometry(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
