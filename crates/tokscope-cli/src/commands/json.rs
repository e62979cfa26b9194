use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use tokscope_core::TokenizationOutcome;

use super::ProviderRef;

/// Print a JSON result or error object. Encoding failures still exit 0.
pub fn run(provider: ProviderRef<'_>, text: &str, out: &mut impl Write) -> Result<ExitCode> {
    let outcome = match provider {
        Ok(provider) => TokenizationOutcome::new(provider, text),
        Err(e) => e.clone().into(),
    };

    writeln!(out, "{}", outcome.to_json()?)?;
    Ok(ExitCode::SUCCESS)
}
