pub mod count;
pub mod interactive;
pub mod json;
pub mod precompute;
pub mod report;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use tokscope_config::Config;
use tokscope_core::DisplayLimits;
use tokscope_tokens::{EncodingError, EncodingProvider, TiktokenProvider};

use crate::cli::Command;

/// The loaded provider, or the reason it could not be loaded
pub type ProviderRef<'a> = std::result::Result<&'a dyn EncodingProvider, &'a EncodingError>;

/// Process-wide state: the configuration and the provider, loaded once.
///
/// A provider that failed to load is kept as an error so each mode can
/// report it its own way.
pub struct Context {
    pub config: Config,
    provider: std::result::Result<TiktokenProvider, EncodingError>,
}

impl Context {
    /// `encoding` overrides the configured encoding
    pub fn new(config: Config, encoding: Option<&str>) -> Self {
        let name = encoding.unwrap_or(&config.encoding).to_string();
        let provider = TiktokenProvider::from_name(&name);
        if let Err(e) = &provider {
            tracing::warn!(encoding = %name, error = %e, "failed to load encoding");
        }
        Self { config, provider }
    }

    pub fn provider(&self) -> ProviderRef<'_> {
        self.provider
            .as_ref()
            .map(|provider| provider as &dyn EncodingProvider)
    }

    pub fn display_limits(&self) -> DisplayLimits {
        DisplayLimits {
            max_token_strings: self.config.display.max_token_strings,
            max_token_ids: self.config.display.max_token_ids,
        }
    }
}

/// Run a parsed command against stdin/stdout
pub async fn run(command: Command, ctx: &Context) -> Result<ExitCode> {
    tracing::debug!(?command, "dispatching");
    let mut stdout = std::io::stdout();

    let code = match command {
        Command::Interactive => interactive::run(ctx).await?,
        Command::Json(source) => {
            let text = source.read(std::io::stdin())?;
            json::run(ctx.provider(), &text, &mut stdout)?
        }
        Command::Count(text) => count::run(ctx.provider(), &text, &mut stdout)?,
        Command::Report(text) => report::run(ctx.provider(), &text, &mut stdout)?,
        Command::Precompute { input, output } => {
            precompute::run(ctx.provider(), &input, &output, &mut stdout)?
        }
    };

    stdout.flush()?;
    Ok(code)
}
