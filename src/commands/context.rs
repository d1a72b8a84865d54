//! State shared by every command: configuration and output mode.

use std::sync::Arc;

use is_terminal::IsTerminal;
use keel::domain::ports::{AssumeYes, Confirmer, DeployEventSink};
use keel::infrastructure::{LineConfirmer, TerminalConfirmer};
use keel::Config;

use crate::ui::sink::ConsoleEventSink;

pub struct CommandContext {
    pub config: Config,
    pub json: bool,
}

impl CommandContext {
    pub fn new(config: Config, json: bool) -> Self {
        Self { config, json }
    }

    /// `--yes` or `deploy.assume_yes` skips the prompt; otherwise ask on
    /// the terminal, falling back to line input when stdin is piped.
    pub fn confirmer(&self, yes: bool) -> Arc<dyn Confirmer> {
        if yes || self.config.deploy.assume_yes {
            Arc::new(AssumeYes)
        } else if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            Arc::new(TerminalConfirmer::new())
        } else {
            Arc::new(LineConfirmer::stdio())
        }
    }

    /// Under `--json` stdout carries only the final event, so warnings go
    /// to stderr.
    pub fn event_sink(&self) -> Arc<dyn DeployEventSink> {
        if self.json {
            Arc::new(ConsoleEventSink::stderr().warnings_only())
        } else {
            Arc::new(ConsoleEventSink::stdout())
        }
    }
}
