//! Interactive tokenization session
//!
//! The session is a two-state machine (`Running` -> `Terminated`). Each line of
//! input produces a [`Turn`]; the caller renders it and reads the next line
//! while the session is still running. Reading input and catching interrupts
//! are left to the caller so the state machine stays synchronous.

use std::io::Write;

use tokscope_tokens::EncodingProvider;

use crate::display::{format_token_ids, format_token_strings, DisplayLimits};
use crate::tokenization::TokenizationResult;

pub const PROMPT: &str = "You: ";
const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "q"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// Outcome of one line of input
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Blank line, nothing to report
    Skip,
    /// Exit command, the session is over
    Exit,
    Report(TokenizationResult),
    /// Processing failed; the session keeps running
    Failed(String),
}

/// True for exactly `exit`, `quit` or `q` in any case, no surrounding spaces
pub fn is_exit_command(input: &str) -> bool {
    EXIT_COMMANDS
        .iter()
        .any(|cmd| input.eq_ignore_ascii_case(cmd))
}

pub struct Session<'a> {
    provider: &'a dyn EncodingProvider,
    limits: DisplayLimits,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(provider: &'a dyn EncodingProvider, limits: DisplayLimits) -> Self {
        Self {
            provider,
            limits,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Process one line of input (without its line terminator)
    pub fn handle_line(&mut self, line: &str) -> Turn {
        if self.state == SessionState::Terminated {
            return Turn::Exit;
        }

        if is_exit_command(line) {
            self.state = SessionState::Terminated;
            return Turn::Exit;
        }

        if line.trim().is_empty() {
            return Turn::Skip;
        }

        match TokenizationResult::build(self.provider, line) {
            Ok(result) => Turn::Report(result),
            Err(err) => {
                tracing::debug!(error = %err, "interactive turn failed");
                Turn::Failed(err.to_string())
            }
        }
    }

    /// Interrupt or end of input
    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Header plus token counts for a few example strings
    pub fn write_banner(
        &self,
        examples: &[String],
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        writeln!(out, "=== tokscope: subword tokenizer ===")?;
        writeln!(out, "Using {} encoding", self.provider.name())?;
        writeln!(out, "Type your prompts to see accurate tokenization!")?;
        writeln!(out, "Type 'exit' or 'quit' to end the session.")?;
        writeln!(out, "===================================")?;
        writeln!(out)?;

        if !examples.is_empty() {
            writeln!(out, "Examples:")?;
            for example in examples {
                match self.provider.encode(example) {
                    Ok(ids) => writeln!(out, "  \"{}\" -> {} tokens", example, ids.len())?,
                    Err(err) => writeln!(out, "  \"{}\" -> Error: {}", example, err)?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn write_prompt(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "\n{}", PROMPT)?;
        out.flush()
    }

    pub fn write_farewell(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "\nGoodbye!")?;
        out.flush()
    }

    /// Render a turn. `Skip` and `Exit` print nothing.
    pub fn write_turn(&self, turn: &Turn, out: &mut impl Write) -> std::io::Result<()> {
        match turn {
            Turn::Skip | Turn::Exit => Ok(()),
            Turn::Failed(message) => writeln!(out, "Error: {}", message),
            Turn::Report(result) => self.write_report(result, out),
        }
    }

    fn write_report(
        &self,
        result: &TokenizationResult,
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        writeln!(out, "\n--- Tokenization Results ---")?;
        writeln!(out, "Token count: {}", result.token_count)?;
        writeln!(out, "Characters: {}", result.char_count)?;
        // chars_per_token is zero-guarded, so zero-token input shows 0.00
        writeln!(out, "Avg chars/token: {:.2}\n", result.chars_per_token)?;

        writeln!(
            out,
            "Tokens ({}): {}\n",
            result.token_count,
            format_token_strings(&result.token_strings, self.limits.max_token_strings)
        )?;
        writeln!(
            out,
            "Token IDs: {}",
            format_token_ids(&result.token_ids, self.limits.max_token_ids)
        )?;
        Ok(())
    }
}
