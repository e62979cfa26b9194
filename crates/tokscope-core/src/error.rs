use thiserror::Error;
use tokscope_tokens::EncodingError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
