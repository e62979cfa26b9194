//! Batch precomputation of prompt files

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokscope_tokens::{EncodingError, EncodingProvider, TokenId};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub text: String,
    pub tokens: Vec<TokenId>,
    pub token_count: usize,
}

/// Encoded prompts in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptBatch {
    pub prompts: Vec<PromptRecord>,
}

impl PromptRecord {
    pub fn encode(
        provider: &dyn EncodingProvider,
        text: &str,
    ) -> std::result::Result<Self, EncodingError> {
        let tokens = provider.encode(text)?;
        Ok(Self {
            text: text.to_string(),
            token_count: tokens.len(),
            tokens,
        })
    }
}

impl PromptBatch {
    /// Encode every non-blank line of `content`, trimmed, in order
    pub fn from_lines(
        provider: &dyn EncodingProvider,
        content: &str,
    ) -> std::result::Result<Self, EncodingError> {
        let prompts = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| PromptRecord::encode(provider, line))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { prompts })
    }

    /// Read and encode a prompt file
    pub fn read_from(provider: &dyn EncodingProvider, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let batch = Self::from_lines(provider, &content)?;
        tracing::debug!(
            path = %path.display(),
            lines = content.lines().count(),
            prompts = batch.len(),
            "encoded prompt file"
        );
        Ok(batch)
    }

    /// Write as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn total_tokens(&self) -> usize {
        self.prompts.iter().map(|p| p.token_count).sum()
    }
}

/// Encode `input` line by line and write the batch to `output`
pub fn precompute(
    provider: &dyn EncodingProvider,
    input: &Path,
    output: &Path,
) -> Result<PromptBatch> {
    let batch = PromptBatch::read_from(provider, input)?;
    batch.write_to(output)?;
    Ok(batch)
}
