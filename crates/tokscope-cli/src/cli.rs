use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tokscope_core::{ErrorResult, TokenizationOutcome};

#[derive(Parser, Debug)]
#[command(name = "tokscope")]
#[command(about = "Inspect how text is split into subword tokens", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print the tokenization as JSON (`-` reads the text from stdin)
    #[arg(
        long,
        value_name = "TEXT",
        num_args = 0..=1,
        allow_hyphen_values = true
    )]
    pub json: Option<Option<String>>,

    /// Print only the token count
    #[arg(
        long,
        value_name = "TEXT",
        num_args = 0..=1,
        allow_hyphen_values = true
    )]
    pub count: Option<Option<String>>,

    /// Encoding name (cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base)
    #[arg(long, short)]
    pub encoding: Option<String>,

    /// Config file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Text to tokenize; starts an interactive session when omitted
    #[arg(allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Arguments past the text are ignored
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(name = "precompute-tokens")]
#[command(about = "Encode a file of prompts, one per line, into a JSON document", long_about = None)]
#[command(version)]
pub struct PrecomputeCli {
    /// Prompt file, one prompt per line
    pub input: Option<PathBuf>,

    /// JSON file to write
    pub output: Option<PathBuf>,

    /// Encoding name
    #[arg(long, short)]
    pub encoding: Option<String>,

    /// Config file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(hide = true, num_args = 0..)]
    pub rest: Vec<String>,
}

/// Where `--json` takes its text from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Arg(String),
    /// All of stdin, newlines included, as one text
    Stdin,
}

impl TextSource {
    pub fn read(self, mut stdin: impl Read) -> std::io::Result<String> {
        match self {
            TextSource::Arg(text) => Ok(text),
            TextSource::Stdin => {
                let mut text = String::new();
                stdin.read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// A parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Interactive,
    Json(TextSource),
    Count(String),
    Report(String),
    Precompute { input: PathBuf, output: PathBuf },
}

/// A required argument is missing for the selected mode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("No text provided")]
    MissingJsonText,

    #[error("No text provided")]
    MissingCountText,

    #[error("Usage: precompute-tokens <input_file> <output_file>")]
    MissingPrecomputePaths,
}

impl UsageError {
    /// Print the mode-specific failure output
    pub fn report(&self, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            UsageError::MissingJsonText => {
                let outcome = TokenizationOutcome::Error(ErrorResult::new(self.to_string()));
                writeln!(out, "{}", outcome.to_json()?)?;
            }
            UsageError::MissingCountText => writeln!(out, "0")?,
            UsageError::MissingPrecomputePaths => writeln!(out, "{}", self)?,
        }
        Ok(())
    }
}

impl Cli {
    /// Resolve the mode: `--json`, then `--count`, then text, else interactive
    pub fn command(&self) -> Result<Command, UsageError> {
        if let Some(json) = &self.json {
            return match json.as_deref() {
                Some("-") => Ok(Command::Json(TextSource::Stdin)),
                Some(text) => Ok(Command::Json(TextSource::Arg(text.to_string()))),
                None => Err(UsageError::MissingJsonText),
            };
        }

        if let Some(count) = &self.count {
            return count
                .clone()
                .map(Command::Count)
                .ok_or(UsageError::MissingCountText);
        }

        Ok(match &self.text {
            Some(text) => Command::Report(text.clone()),
            None => Command::Interactive,
        })
    }
}

impl PrecomputeCli {
    pub fn command(&self) -> Result<Command, UsageError> {
        match (&self.input, &self.output) {
            (Some(input), Some(output)) => Ok(Command::Precompute {
                input: input.clone(),
                output: output.clone(),
            }),
            _ => Err(UsageError::MissingPrecomputePaths),
        }
    }
}
