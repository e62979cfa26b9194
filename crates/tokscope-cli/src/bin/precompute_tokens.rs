use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tokscope_cli::cli::PrecomputeCli;
use tokscope_cli::commands::{self, Context};
use tokscope_cli::logging;
use tokscope_config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    logging::init();

    let cli = PrecomputeCli::parse();

    let command = match cli.command() {
        Ok(command) => command,
        Err(usage) => {
            usage.report(&mut std::io::stdout())?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = Config::load(cli.config.as_deref())?;
    let ctx = Context::new(config, cli.encoding.as_deref());

    commands::run(command, &ctx).await
}
