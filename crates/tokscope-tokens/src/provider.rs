//! Encoding provider trait

use crate::error::Result;

/// Integer identifier of a subword unit in a vocabulary.
pub type TokenId = u32;

/// Text <-> token conversion under a fixed vocabulary.
///
/// Implementations are loaded once and then used read-only, so every method
/// takes `&self`. Encoding must be deterministic: the same text always yields
/// the same ids.
pub trait EncodingProvider {
    /// Name of the encoding (e.g. `cl100k_base`)
    fn name(&self) -> &str;

    /// Encode text into an ordered sequence of token ids
    fn encode(&self, text: &str) -> Result<Vec<TokenId>>;

    /// Decode a full id sequence back into text
    fn decode(&self, ids: &[TokenId]) -> Result<String>;

    /// Decode a single id into the text fragment it represents
    fn decode_one(&self, id: TokenId) -> Result<String>;
}
