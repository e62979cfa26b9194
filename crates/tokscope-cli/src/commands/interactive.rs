use std::future::Future;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokscope_core::{Session, Turn};

use super::Context;

/// Why the session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exit,
    Interrupted,
    EndOfInput,
}

/// Run the interactive session on stdin/stdout until exit, Ctrl-C or EOF
pub async fn run(ctx: &Context) -> Result<ExitCode> {
    let provider = ctx.provider().map_err(Clone::clone)?;
    let mut session = Session::new(provider, ctx.display_limits());
    let mut stdout = std::io::stdout();

    session.write_banner(&ctx.config.session.examples, &mut stdout)?;

    let input = BufReader::new(tokio::io::stdin());
    let end = drive(&mut session, input, tokio::signal::ctrl_c(), &mut stdout).await?;
    tracing::debug!(?end, "interactive session finished");

    if end == SessionEnd::Interrupted {
        // The blocking stdin read behind tokio::io::stdin cannot be cancelled,
        // so the runtime would wait for one more line before shutting down.
        stdout.flush()?;
        std::process::exit(0);
    }

    Ok(ExitCode::SUCCESS)
}

/// Read-encode-report loop. Each line is fully reported before the next read.
pub async fn drive<R, I>(
    session: &mut Session<'_>,
    mut input: R,
    interrupt: I,
    out: &mut impl Write,
) -> Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    I: Future<Output = std::io::Result<()>>,
{
    let mut buf = Vec::new();
    tokio::pin!(interrupt);

    while session.is_running() {
        session.write_prompt(out)?;

        buf.clear();
        let read = tokio::select! {
            read = input.read_until(b'\n', &mut buf) => read?,
            _ = &mut interrupt => {
                session.terminate();
                writeln!(out)?;
                session.write_farewell(out)?;
                return Ok(SessionEnd::Interrupted);
            }
        };

        if read == 0 {
            session.terminate();
            session.write_farewell(out)?;
            return Ok(SessionEnd::EndOfInput);
        }

        // Undecodable input fails this turn only
        let turn = match line_text(&buf) {
            Ok(line) => session.handle_line(line),
            Err(err) => {
                tracing::debug!(error = %err, "interactive line is not UTF-8");
                Turn::Failed(format!("Input is not valid UTF-8: {}", err))
            }
        };
        if turn == Turn::Exit {
            session.write_farewell(out)?;
            return Ok(SessionEnd::Exit);
        }
        session.write_turn(&turn, out)?;
    }

    Ok(SessionEnd::Exit)
}

/// One raw line without its `\n` or `\r\n` terminator
fn line_text(buf: &[u8]) -> std::result::Result<&str, std::str::Utf8Error> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    std::str::from_utf8(line)
}
