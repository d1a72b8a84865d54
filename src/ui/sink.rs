//! Console event sink

use std::io::Write;
use std::sync::Mutex;

use keel::domain::ports::{DeployEvent, DeployEventSink};

use super::views::render_event;

/// Prints rendered events, one per line.
pub struct ConsoleEventSink<W: Write> {
    out: Mutex<W>,
    warnings_only: bool,
}

impl<W: Write> ConsoleEventSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            warnings_only: false,
        }
    }

    /// Drop progress lines and keep only operator warnings.
    pub fn warnings_only(mut self) -> Self {
        self.warnings_only = true;
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ConsoleEventSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl ConsoleEventSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> DeployEventSink for ConsoleEventSink<W> {
    fn on_event(&self, event: DeployEvent) {
        tracing::trace!(?event, "deploy event");
        if self.warnings_only && !event.is_warning() {
            return;
        }
        let Some(line) = render_event(&event) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }
}
