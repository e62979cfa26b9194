//! Tokenization results and their renderings

use std::io::Write;

use serde::Serialize;
use tokscope_tokens::{EncodingError, EncodingProvider, TokenId};

use crate::display::format_id_list;

/// Full breakdown of one text under one encoding.
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenizationResult {
    pub text: String,
    #[serde(rename = "encoding")]
    pub encoding_name: String,
    pub token_count: usize,
    #[serde(rename = "tokens")]
    pub token_ids: Vec<TokenId>,
    /// Per-id decodes, position-aligned with `token_ids`
    pub token_strings: Vec<String>,
    pub char_count: usize,
    pub chars_per_token: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

/// Exactly one of a result or an error, never a mix of fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenizationOutcome {
    Success(TokenizationResult),
    Error(ErrorResult),
}

impl TokenizationResult {
    /// Encode `text` and decode every id on its own.
    pub fn build(provider: &dyn EncodingProvider, text: &str) -> Result<Self, EncodingError> {
        let token_ids = provider.encode(text)?;
        let token_strings = token_ids
            .iter()
            .map(|id| provider.decode_one(*id))
            .collect::<Result<Vec<_>, _>>()?;

        let token_count = token_ids.len();
        let char_count = text.chars().count();

        Ok(Self {
            text: text.to_string(),
            encoding_name: provider.name().to_string(),
            token_count,
            token_ids,
            token_strings,
            char_count,
            chars_per_token: chars_per_token(char_count, token_count),
        })
    }

    /// Human-readable single-shot report
    pub fn write_report(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "Text: {}", self.text)?;
        writeln!(out, "Tokens: {}", self.token_count)?;
        writeln!(out, "Token IDs: {}", format_id_list(&self.token_ids))?;
        writeln!(out, "Characters: {}", self.char_count)?;
        writeln!(out, "Chars/Token: {:.2}", self.chars_per_token)?;
        Ok(())
    }
}

/// Characters per token, zero when there are no tokens
pub fn chars_per_token(char_count: usize, token_count: usize) -> f64 {
    if token_count > 0 {
        char_count as f64 / token_count as f64
    } else {
        0.0
    }
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<EncodingError> for ErrorResult {
    fn from(err: EncodingError) -> Self {
        Self::new(err.to_string())
    }
}

impl TokenizationOutcome {
    /// Tokenize `text`, turning any provider failure into an error object.
    pub fn new(provider: &dyn EncodingProvider, text: &str) -> Self {
        match TokenizationResult::build(provider, text) {
            Ok(result) => TokenizationOutcome::Success(result),
            Err(err) => {
                tracing::debug!(error = %err, "tokenization failed");
                TokenizationOutcome::Error(err.into())
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TokenizationOutcome::Error(_))
    }

    /// Pretty-printed JSON (2-space indent)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<EncodingError> for TokenizationOutcome {
    fn from(err: EncodingError) -> Self {
        TokenizationOutcome::Error(err.into())
    }
}
