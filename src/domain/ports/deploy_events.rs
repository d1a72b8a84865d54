//! Deploy Event Port
//!
//! Provides an observable interface for bootstrap and deploy operations.
//! The controller never prints; it reports through a sink.

use std::path::PathBuf;

/// Flag the operator passed to act on an existing instance model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingInstanceAction {
    Resume,
    Force,
}

impl ExistingInstanceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExistingInstanceAction::Resume => "resume",
            ExistingInstanceAction::Force => "force",
        }
    }
}

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Store inspected
    StateInspected {
        store: PathBuf,
        instances_present: bool,
    },

    /// Resume/force against an existing model; confirmation follows
    ExistingInstanceWarning { action: ExistingInstanceAction },

    /// Model exists and neither resume nor force was requested
    InstanceExists,

    /// Previous instance model removed after a confirmed force
    InstancesCleared,

    /// Template reference recorded (or reused)
    TemplateResolved { template: PathBuf, recorded: bool },

    /// Effective inputs persisted
    InputsRecorded { count: usize, overridden: bool },

    /// Handoff to the topology executor
    DeployStarted { workers: usize },

    /// Executor finished successfully
    DeployCompleted,
}

impl DeployEvent {
    /// Events the operator must see even when normal output is suppressed.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            DeployEvent::ExistingInstanceWarning { .. } | DeployEvent::InstanceExists
        )
    }
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: human-readable lines (warnings only under `--json`)
/// - NoopEventSink: Silent operation
pub trait DeployEventSink {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}

/// Event sink that records events (for testing)
#[derive(Default)]
pub struct RecordingEventSink {
    events: std::sync::Mutex<Vec<DeployEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl DeployEventSink for RecordingEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
