use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use tokscope_core::TokenizationOutcome;

use super::ProviderRef;

/// Print the single-shot report, or `Error: <message>` with exit status 1
pub fn run(provider: ProviderRef<'_>, text: &str, out: &mut impl Write) -> Result<ExitCode> {
    let outcome = match provider {
        Ok(provider) => TokenizationOutcome::new(provider, text),
        Err(e) => e.clone().into(),
    };

    match outcome {
        TokenizationOutcome::Success(result) => {
            result.write_report(out)?;
            Ok(ExitCode::SUCCESS)
        }
        TokenizationOutcome::Error(err) => {
            writeln!(out, "Error: {}", err.error)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
