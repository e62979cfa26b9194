use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use super::ProviderRef;

/// Encode a prompt file and write the JSON batch. I/O errors are fatal.
pub fn run(
    provider: ProviderRef<'_>,
    input: &Path,
    output: &Path,
    out: &mut impl Write,
) -> Result<ExitCode> {
    let provider = provider.map_err(Clone::clone)?;
    let batch = tokscope_core::precompute(provider, input, output)?;

    tracing::info!(
        prompts = batch.len(),
        tokens = batch.total_tokens(),
        "precomputed tokens"
    );
    writeln!(out, "✓ Precomputed tokens for {} prompts", batch.len())?;
    writeln!(out, "  Output: {}", output.display())?;

    Ok(ExitCode::SUCCESS)
}
