//! Deploy Use Case
//!
//! Orchestrates a single deploy invocation:
//! 1. Validate the request (flags, instance path, workers)
//! 2. Reconcile with any existing instance model (resume / force / no-op)
//! 3. Record the template reference and the effective inputs
//! 4. Load the template, bind inputs, instantiate and deploy the topology
//!
//! Steps 1-3 are `bootstrap`; step 4 only runs when bootstrap says `Proceed`.
//! Nothing here is retried.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::resolve::{resolve_inputs, resolve_template, validate_instance_path};
use crate::domain::ports::{
    keys, Confirmer, DeployEvent, DeployEventSink, ExistingInstanceAction, FailFast,
    InstanceStore, NoopEventSink, TemplateLoader,
};
use crate::domain::value_objects::Workers;
use crate::error::{KeelError, KeelResult};

use super::options::DeployRequest;
use super::result::{DeployOutcome, NoOpReason, ResolvedDeployment};

/// Question asked before acting on an existing instance model
pub const CONFIRM_PROMPT: &str = "Do you want to continue?";

/// Deploy use case - the bootstrap controller
///
/// Parameterized by its store and template loader so tests can run it
/// entirely in memory.
pub struct DeployUseCase<S, L>
where
    S: InstanceStore,
    L: TemplateLoader,
{
    store: S,
    loader: L,
    working_dir: PathBuf,
}

impl<S, L> DeployUseCase<S, L>
where
    S: InstanceStore,
    L: TemplateLoader,
{
    pub fn new(store: S, loader: L) -> Self {
        Self {
            store,
            loader,
            working_dir: PathBuf::from("."),
        }
    }

    /// Directory template references are resolved against
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute without a way to ask the operator.
    ///
    /// Acting on an existing instance model fails with
    /// `ConfirmationUnavailable`.
    pub fn execute(&self, request: &DeployRequest) -> KeelResult<DeployOutcome> {
        self.execute_full(request, Arc::new(FailFast), Arc::new(NoopEventSink))
    }

    /// Execute, asking `confirmer` before acting on an existing instance model
    pub fn execute_with_confirmer(
        &self,
        request: &DeployRequest,
        confirmer: Arc<dyn Confirmer>,
    ) -> KeelResult<DeployOutcome> {
        self.execute_full(request, confirmer, Arc::new(NoopEventSink))
    }

    /// Execute with confirmation and event reporting.
    ///
    /// The template reference and inputs are persisted by `bootstrap` before
    /// the template is loaded. A run that fails to parse or deploy can be
    /// repeated after fixing the template without resupplying either.
    pub fn execute_full(
        &self,
        request: &DeployRequest,
        confirmer: Arc<dyn Confirmer>,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> KeelResult<DeployOutcome> {
        let outcome = self.bootstrap(request, confirmer.as_ref(), event_sink.as_ref())?;
        if let DeployOutcome::Proceed(resolved) = &outcome {
            self.deploy(resolved, event_sink.as_ref())?;
        }
        Ok(outcome)
    }

    /// Decide whether and how to deploy, recording template and inputs.
    ///
    /// Usage conflicts are rejected before the store is touched.
    pub fn bootstrap(
        &self,
        request: &DeployRequest,
        confirmer: &dyn Confirmer,
        event_sink: &dyn DeployEventSink,
    ) -> KeelResult<DeployOutcome> {
        let workers = validate(request)?;

        let instances_present = self.store.exists(keys::INSTANCES);
        tracing::debug!(
            store = %self.store.root().display(),
            instances_present,
            "instance store inspected"
        );
        event_sink.on_event(DeployEvent::StateInspected {
            store: self.store.root().to_path_buf(),
            instances_present,
        });

        if instances_present {
            if let Some(reason) =
                self.reconcile_existing(request, confirmer, event_sink)?
            {
                return Ok(DeployOutcome::NoOp(reason));
            }
        }

        let template_ref =
            resolve_template(&self.store, request.template.as_deref(), event_sink)?;
        let inputs = resolve_inputs(&self.store, request.inputs.as_ref(), event_sink)?;

        Ok(DeployOutcome::Proceed(ResolvedDeployment {
            template_ref,
            inputs,
            workers,
        }))
    }

    /// Hand a resolved deployment to the template loader and executor.
    pub fn deploy(
        &self,
        resolved: &ResolvedDeployment,
        event_sink: &dyn DeployEventSink,
    ) -> KeelResult<()> {
        let ast = self
            .loader
            .load(&self.working_dir, &resolved.template_ref)?;
        let template = ast.template(&resolved.inputs)?;
        let topology = template.instantiate(&self.store)?;

        tracing::info!(
            template = %resolved.template_ref.display(),
            workers = resolved.workers.get(),
            "deploying topology"
        );
        event_sink.on_event(DeployEvent::DeployStarted {
            workers: resolved.workers.get(),
        });
        topology.deploy(resolved.workers)?;
        event_sink.on_event(DeployEvent::DeployCompleted);
        Ok(())
    }

    /// Returns the no-op reason when the deploy must stop here.
    fn reconcile_existing(
        &self,
        request: &DeployRequest,
        confirmer: &dyn Confirmer,
        event_sink: &dyn DeployEventSink,
    ) -> KeelResult<Option<NoOpReason>> {
        let Some(action) = request.existing_instance_action() else {
            event_sink.on_event(DeployEvent::InstanceExists);
            return Ok(Some(NoOpReason::InstanceExists));
        };

        event_sink.on_event(DeployEvent::ExistingInstanceWarning { action });
        if !confirmer.confirm(CONFIRM_PROMPT)? {
            tracing::debug!(action = action.as_str(), "operator declined");
            return Ok(Some(NoOpReason::Declined(action)));
        }

        if action == ExistingInstanceAction::Force {
            self.store.remove(keys::INSTANCES)?;
            tracing::warn!(
                store = %self.store.root().display(),
                "previous instance model removed"
            );
            event_sink.on_event(DeployEvent::InstancesCleared);
        }
        Ok(None)
    }
}

/// Side-effect free request checks, in order: flags, instance path, workers.
fn validate(request: &DeployRequest) -> KeelResult<Workers> {
    if request.resume && request.force {
        return Err(KeelError::ConflictingFlags);
    }
    validate_instance_path(request.instance_path.as_deref())?;
    Workers::new(request.workers)
}
