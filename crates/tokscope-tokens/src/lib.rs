//! Text <-> token conversion for tokscope
//!
//! This crate contains:
//! - The `EncodingProvider` trait the rest of the workspace talks to
//! - A tiktoken-backed provider (cl100k_base, o200k_base, p50k, r50k)

pub mod error;
pub mod provider;
pub mod tiktoken;

pub use error::{EncodingError, Result};
pub use provider::{EncodingProvider, TokenId};
pub use tiktoken::{Encoding, TiktokenProvider};
