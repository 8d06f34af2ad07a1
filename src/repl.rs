//! Interactive read-evaluate-print loop.
//!
//! Reads one line at a time, resolves the first word against the registry
//! and writes whatever the command produced. Exits on the exit keyword, an
//! interrupt, or end of input; every path logs the shutdown. An interrupt
//! also cancels a command that is still running.

use std::future::Future;
use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::commands::{CommandRegistry, DispatchOutcome, SHOW_MENU};
use crate::config::ReplConfig;
use crate::error::Result;

/// A source of input lines.
#[async_trait]
pub trait LineSource: Send {
    /// Returns the next line without its terminator, or `None` at end of input.
    async fn next_line(&mut self) -> Result<Option<String>>;
}

#[async_trait]
impl<R> LineSource for Lines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(Lines::next_line(self).await?)
    }
}

/// Lines read from the process's stdin on a dedicated thread.
///
/// A blocking read stays on its own thread, so an interrupt can end the
/// session without waiting for the user to press enter.
pub struct StdinLines {
    rx: mpsc::Receiver<std::io::Result<String>>,
}

impl StdinLines {
    /// Starts the reader thread.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lines() {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }
}

#[async_trait]
impl LineSource for StdinLines {
    async fn next_line(&mut self) -> Result<Option<String>> {
        match self.rx.recv().await {
            Some(line) => Ok(Some(line?)),
            None => Ok(None),
        }
    }
}

/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    Running,
    Terminated(ExitReason),
}

/// Why the loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user typed the exit keyword.
    ExitKeyword,
    /// An interrupt signal arrived.
    Interrupted,
    /// The input source was closed.
    EndOfInput,
}

/// What happened during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplReport {
    pub exit: ExitReason,
    /// Lines read, including the one that ended the session.
    pub lines: usize,
    /// Command names that were not registered.
    pub unknown_commands: Vec<String>,
    /// Command names whose execution failed.
    pub failed_commands: Vec<String>,
}

/// Splits a line into a command name and its arguments.
///
/// Returns `None` for blank lines.
pub fn split_command(line: &str) -> Option<(&str, Vec<String>)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.map(String::from).collect()))
}

/// The REPL driver.
pub struct Repl<'a> {
    registry: &'a mut CommandRegistry,
    prompt: String,
    exit_keyword: String,
}

impl<'a> Repl<'a> {
    pub fn new(registry: &'a mut CommandRegistry, config: &ReplConfig) -> Self {
        Self {
            registry,
            prompt: config.prompt.clone(),
            exit_keyword: config.exit_keyword.trim().to_lowercase(),
        }
    }

    /// Runs until exit keyword or end of input.
    pub async fn run<S, W>(&mut self, input: &mut S, output: &mut W) -> ReplReport
    where
        S: LineSource + ?Sized,
        W: Write,
    {
        self.run_until(input, output, std::future::pending::<()>())
            .await
    }

    /// Runs until exit keyword, end of input, or `interrupt` resolves.
    ///
    /// A failed write to `output` ends the session as if input had closed.
    pub async fn run_until<S, W, F>(
        &mut self,
        input: &mut S,
        output: &mut W,
        interrupt: F,
    ) -> ReplReport
    where
        S: LineSource + ?Sized,
        W: Write,
        F: Future<Output = ()>,
    {
        let mut report = ReplReport {
            exit: ExitReason::EndOfInput,
            lines: 0,
            unknown_commands: Vec::new(),
            failed_commands: Vec::new(),
        };

        if let Err(e) = self.drive(input, output, interrupt, &mut report).await {
            error!("Error writing output: {}", e);
            report.exit = ExitReason::EndOfInput;
        }

        match report.exit {
            ExitReason::ExitKeyword => info!("Application exit."),
            ExitReason::Interrupted => info!("Application interrupted and exiting gracefully."),
            ExitReason::EndOfInput => info!("Input closed, exiting."),
        }
        info!("Application shutdown.");

        report
    }

    async fn drive<S, W, F>(
        &mut self,
        input: &mut S,
        output: &mut W,
        interrupt: F,
        report: &mut ReplReport,
    ) -> Result<()>
    where
        S: LineSource + ?Sized,
        W: Write,
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);
        let mut state = ReplState::Running;

        while state == ReplState::Running {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            // A pending interrupt wins over input that is already buffered
            let line = tokio::select! {
                biased;
                () = &mut interrupt => None,
                line = input.next_line() => Some(line),
            };
            let Some(line) = line else {
                writeln!(output)?;
                state = ReplState::Terminated(ExitReason::Interrupted);
                continue;
            };

            state = match line {
                Ok(Some(line)) => {
                    report.lines += 1;
                    let handled = tokio::select! {
                        biased;
                        () = &mut interrupt => None,
                        handled = self.handle_line(&line, output, report) => Some(handled),
                    };
                    match handled {
                        Some(next) => next?,
                        None => {
                            info!("Command interrupted.");
                            writeln!(output)?;
                            ReplState::Terminated(ExitReason::Interrupted)
                        }
                    }
                }
                Ok(None) => {
                    writeln!(output)?;
                    ReplState::Terminated(ExitReason::EndOfInput)
                }
                Err(e) => {
                    error!("Error reading input: {}", e);
                    ReplState::Terminated(ExitReason::EndOfInput)
                }
            };
        }

        if let ReplState::Terminated(reason) = state {
            report.exit = reason;
        }
        Ok(())
    }

    async fn handle_line<W: Write>(
        &mut self,
        line: &str,
        output: &mut W,
        report: &mut ReplReport,
    ) -> Result<ReplState> {
        let trimmed = line.trim();

        if trimmed.to_lowercase() == self.exit_keyword {
            return Ok(ReplState::Terminated(ExitReason::ExitKeyword));
        }

        let Some((name, args)) = split_command(trimmed) else {
            self.show_menu(output).await?;
            return Ok(ReplState::Running);
        };

        match self.registry.execute(name, &args).await {
            DispatchOutcome::Success(result) => write_output(output, result.render())?,
            DispatchOutcome::NotFound => {
                error!("Unknown command: {}", trimmed);
                report.unknown_commands.push(name.to_string());
                self.show_menu(output).await?;
            }
            DispatchOutcome::ExecutionError(_) => {
                report.failed_commands.push(name.to_string());
            }
        }

        Ok(ReplState::Running)
    }

    async fn show_menu<W: Write>(&mut self, output: &mut W) -> Result<()> {
        match self.registry.execute(SHOW_MENU, &[]).await {
            DispatchOutcome::Success(menu) => write_output(output, menu.render()),
            DispatchOutcome::NotFound | DispatchOutcome::ExecutionError(_) => Ok(()),
        }
    }
}

fn write_output<W: Write>(output: &mut W, rendered: Option<String>) -> Result<()> {
    if let Some(text) = rendered {
        writeln!(output, "{text}")?;
    }
    Ok(())
}
