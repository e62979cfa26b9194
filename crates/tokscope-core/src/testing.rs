//! Deterministic provider for unit tests: one token per character.

use tokscope_tokens::{EncodingError, EncodingProvider, Result, TokenId};

pub struct CharProvider;

impl EncodingProvider for CharProvider {
    fn name(&self) -> &str {
        "char_level"
    }

    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        if text.contains('\u{0}') {
            return Err(EncodingError::DisallowedSpecialToken("\\0".to_string()));
        }
        // Control characters are dropped, so some non-empty input encodes to nothing.
        Ok(text
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .map(|c| c as TokenId)
            .collect())
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        ids.iter().map(|id| self.decode_one(*id)).collect()
    }

    fn decode_one(&self, id: TokenId) -> Result<String> {
        char::from_u32(id)
            .map(String::from)
            .ok_or_else(|| EncodingError::Decode(format!("invalid token id {id}")))
    }
}
