//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod confirmer;
pub mod deploy_events;
pub mod instance_store;
pub mod template;

pub use confirmer::{AssumeNo, AssumeYes, Confirmer, FailFast};
pub use deploy_events::{
    DeployEvent, DeployEventSink, ExistingInstanceAction, NoopEventSink, RecordingEventSink,
};
pub use instance_store::{keys, InstanceStore};
pub use template::{ServiceAst, ServiceTemplate, TemplateLoader, Topology};
