//! Core logic for tokscope
//!
//! This crate contains:
//! - Tokenization results and their JSON / report renderings
//! - Display helpers for truncated token breakdowns
//! - The interactive session state machine
//! - Batch precomputation of prompt files

pub mod batch;
pub mod display;
pub mod error;
pub mod session;
pub mod tokenization;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{precompute, PromptBatch, PromptRecord};
pub use display::DisplayLimits;
pub use error::{CoreError, Result};
pub use session::{Session, SessionState, Turn};
pub use tokenization::{ErrorResult, TokenizationOutcome, TokenizationResult};
