use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;

use super::ProviderRef;

/// Print only the number of tokens in `text`
pub fn run(provider: ProviderRef<'_>, text: &str, out: &mut impl Write) -> Result<ExitCode> {
    let provider = provider.map_err(Clone::clone)?;
    let ids = provider.encode(text)?;

    writeln!(out, "{}", ids.len())?;
    Ok(ExitCode::SUCCESS)
}
