use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tiktoken_rs::CoreBPE;

use crate::error::{EncodingError, Result};
use crate::provider::{EncodingProvider, TokenId};

/// Encodings shipped with tiktoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// GPT-4, GPT-3.5-turbo
    #[default]
    Cl100kBase,
    /// GPT-4o
    O200kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl Encoding {
    pub const ALL: [Encoding; 5] = [
        Encoding::Cl100kBase,
        Encoding::O200kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }

    /// Literal forms of the special tokens registered for this encoding
    pub fn special_tokens(&self) -> &'static [&'static str] {
        match self {
            Encoding::Cl100kBase => &[
                "<|endoftext|>",
                "<|fim_prefix|>",
                "<|fim_middle|>",
                "<|fim_suffix|>",
                "<|endofprompt|>",
            ],
            Encoding::O200kBase => &["<|endoftext|>", "<|endofprompt|>"],
            Encoding::P50kEdit => &[
                "<|endoftext|>",
                "<|fim_prefix|>",
                "<|fim_middle|>",
                "<|fim_suffix|>",
            ],
            Encoding::P50kBase | Encoding::R50kBase => &["<|endoftext|>"],
        }
    }

    fn load(&self) -> anyhow::Result<CoreBPE> {
        match self {
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::P50kEdit => tiktoken_rs::p50k_edit(),
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        Encoding::ALL
            .into_iter()
            .find(|encoding| encoding.as_str() == s)
            .ok_or_else(|| EncodingError::UnknownEncoding(s.to_string()))
    }
}

/// Encoding provider backed by tiktoken BPE tables
pub struct TiktokenProvider {
    encoding: Encoding,
    bpe: Arc<CoreBPE>,
}

impl TiktokenProvider {
    /// Load the BPE tables for `encoding`
    pub fn new(encoding: Encoding) -> Result<Self> {
        let bpe = encoding.load().map_err(|e| EncodingError::Load {
            name: encoding.as_str().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(encoding = %encoding, "loaded tiktoken encoding");

        Ok(Self {
            encoding,
            bpe: Arc::new(bpe),
        })
    }

    /// Resolve an encoding by name and load it
    pub fn from_name(name: &str) -> Result<Self> {
        Self::new(name.parse()?)
    }

    /// First special token (by position) that appears literally in `text`
    fn find_special_token(&self, text: &str) -> Option<&'static str> {
        self.encoding
            .special_tokens()
            .iter()
            .filter_map(|token| text.find(token).map(|pos| (pos, *token)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, token)| token)
    }
}

impl Default for TiktokenProvider {
    fn default() -> Self {
        Self::new(Encoding::default()).expect("Failed to load tiktoken encoding")
    }
}

impl EncodingProvider for TiktokenProvider {
    fn name(&self) -> &str {
        self.encoding.as_str()
    }

    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        if let Some(token) = self.find_special_token(text) {
            return Err(EncodingError::DisallowedSpecialToken(token.to_string()));
        }
        Ok(self.bpe.encode_ordinary(text))
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        self.bpe
            .decode(ids.to_vec())
            .map_err(|e| EncodingError::Decode(e.to_string()))
    }

    fn decode_one(&self, id: TokenId) -> Result<String> {
        let err = match self.bpe.decode(vec![id]) {
            Ok(text) => return Ok(text),
            Err(err) => err.to_string(),
        };

        // Only a known id can fail the UTF-8 check; anything else is an
        // unknown id, which `_decode_native_and_split` would panic on.
        if !err.contains("UTF-8") {
            return Err(EncodingError::Decode(err));
        }

        // The token holds part of a multi-byte character.
        self.bpe
            ._decode_native_and_split(vec![id])
            .next()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .ok_or(EncodingError::Decode(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encoding_names() {
        for encoding in Encoding::ALL {
            assert_eq!(encoding.as_str().parse::<Encoding>().unwrap(), encoding);
        }
        assert_eq!(Encoding::default(), Encoding::Cl100kBase);
    }

    #[test]
    fn test_unknown_encoding() {
        let err = TiktokenProvider::from_name("gpt2_base").err().unwrap();
        assert_eq!(err, EncodingError::UnknownEncoding("gpt2_base".to_string()));
        assert_eq!(err.to_string(), "Unknown encoding 'gpt2_base'");
    }

    #[test]
    fn test_basic_encoding() {
        let provider = TiktokenProvider::default();
        assert_eq!(provider.name(), "cl100k_base");

        let ids = provider.encode("Hello, world!").unwrap();
        assert!(!ids.is_empty() && ids.len() < 10);

        // Empty string
        assert!(provider.encode("").unwrap().is_empty());
    }

    #[test]
    fn test_deterministic() {
        let provider = TiktokenProvider::default();
        let first = provider.encode("The quick brown fox jumps").unwrap();
        let second = provider.encode("The quick brown fox jumps").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip() {
        let provider = TiktokenProvider::default();
        let samples = [
            "Hello, world!",
            "line one\nline two\n",
            "  leading and trailing  ",
            "Grüße aus München",
            "日本語のテキスト",
            "emoji 🦀 crab",
        ];

        for text in samples {
            let ids = provider.encode(text).unwrap();
            assert_eq!(provider.decode(&ids).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_one_aligns_with_ids() {
        let provider = TiktokenProvider::default();
        let ids = provider.encode("Hello, world!").unwrap();
        let pieces: Vec<String> = ids
            .iter()
            .map(|id| provider.decode_one(*id).unwrap())
            .collect();

        assert_eq!(pieces.len(), ids.len());
        assert_eq!(pieces.concat(), "Hello, world!");
    }

    #[test]
    fn test_decode_one_partial_character() {
        let provider = TiktokenProvider::default();
        let ids = provider.encode("🦀").unwrap();
        let pieces: Vec<String> = ids
            .iter()
            .map(|id| provider.decode_one(*id).unwrap())
            .collect();

        assert_eq!(pieces.len(), ids.len());
        assert!(pieces.iter().any(|piece| piece.contains('\u{FFFD}')));
        // Strict decode of the whole sequence is still exact
        assert_eq!(provider.decode(&ids).unwrap(), "🦀");
    }

    #[test]
    fn test_decode_one_unknown_id() {
        let provider = TiktokenProvider::default();
        let err = provider.decode_one(u32::MAX).unwrap_err();
        assert!(matches!(err, EncodingError::Decode(_)));
    }

    #[test]
    fn test_disallowed_special_token() {
        let provider = TiktokenProvider::default();
        let err = provider.encode("before <|endoftext|> after").unwrap_err();
        assert_eq!(
            err,
            EncodingError::DisallowedSpecialToken("<|endoftext|>".to_string())
        );
    }

    #[test]
    fn test_special_token_reported_by_position() {
        let provider = TiktokenProvider::default();
        let err = provider
            .encode("<|fim_prefix|> then <|endoftext|>")
            .unwrap_err();
        assert_eq!(
            err,
            EncodingError::DisallowedSpecialToken("<|fim_prefix|>".to_string())
        );
    }

    #[test]
    fn test_special_tokens_are_per_encoding() {
        let provider = TiktokenProvider::new(Encoding::R50kBase).unwrap();
        // Not a special token under r50k_base
        assert!(provider.encode("<|endofprompt|>").is_ok());
        assert!(provider.encode("<|endoftext|>").is_err());
    }
}
