//! Init Use Case
//!
//! Records a template reference and its inputs without deploying, so a later
//! `deploy` can run with no arguments. With `clean`, a previous instance model
//! is discarded first (after confirmation).

use std::path::PathBuf;

use crate::domain::ports::{
    keys, Confirmer, DeployEvent, DeployEventSink, ExistingInstanceAction, InstanceStore,
};
use crate::domain::value_objects::Inputs;
use crate::error::KeelResult;

use super::deploy::{InputOverride, NoOpReason, CONFIRM_PROMPT};
use super::resolve::{resolve_inputs, resolve_template, validate_instance_path};

/// Request for the init use case
#[derive(Debug, Clone)]
pub struct InitRequest {
    pub instance_path: Option<PathBuf>,
    pub template: PathBuf,
    pub inputs: Option<InputOverride>,
    pub clean: bool,
}

impl InitRequest {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            instance_path: None,
            template: template.into(),
            inputs: None,
            clean: false,
        }
    }

    pub fn with_instance_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.instance_path = Some(path.into());
        self
    }

    pub fn with_inputs(mut self, inputs: InputOverride) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }
}

/// Result of an init
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    Initialized { template_ref: PathBuf, inputs: Inputs },
    NoOp(NoOpReason),
}

/// Init use case
pub struct InitUseCase<S: InstanceStore> {
    store: S,
}

impl<S: InstanceStore> InitUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn execute(
        &self,
        request: &InitRequest,
        confirmer: &dyn Confirmer,
        event_sink: &dyn DeployEventSink,
    ) -> KeelResult<InitOutcome> {
        validate_instance_path(request.instance_path.as_deref())?;

        if request.clean && self.store.exists(keys::INSTANCES) {
            let action = ExistingInstanceAction::Force;
            event_sink.on_event(DeployEvent::ExistingInstanceWarning { action });
            if !confirmer.confirm(CONFIRM_PROMPT)? {
                return Ok(InitOutcome::NoOp(NoOpReason::Declined(action)));
            }
            self.store.remove(keys::INSTANCES)?;
            tracing::warn!(
                store = %self.store.root().display(),
                "previous instance model removed"
            );
            event_sink.on_event(DeployEvent::InstancesCleared);
        }

        let template_ref =
            resolve_template(&self.store, Some(request.template.as_path()), event_sink)?;
        let inputs = resolve_inputs(&self.store, request.inputs.as_ref(), event_sink)?;
        Ok(InitOutcome::Initialized {
            template_ref,
            inputs,
        })
    }
}
