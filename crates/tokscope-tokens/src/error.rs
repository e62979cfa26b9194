//! Error types for tokscope-tokens

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EncodingError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Failed to load encoding '{name}': {message}")]
    Load { name: String, message: String },

    #[error("Encountered text corresponding to disallowed special token '{0}'")]
    DisallowedSpecialToken(String),

    #[error("Decode error: {0}")]
    Decode(String),
}
