//! Plain text rendering of deploy events and outcomes

use keel::application::{DeployOutcome, InitOutcome, NoOpReason};
use keel::domain::ports::DeployEvent;

/// One human-readable line per event worth showing; `None` for the rest.
pub fn render_event(event: &DeployEvent) -> Option<String> {
    match event {
        DeployEvent::StateInspected { .. } => None,
        DeployEvent::ExistingInstanceWarning { action } => Some(format!(
            "The {} deploy option might have unexpected consequences on the already deployed blueprint.",
            action.as_str()
        )),
        DeployEvent::InstanceExists => Some(
            "The instance model already exists. To redeploy use --force option or --resume to continue."
                .to_string(),
        ),
        DeployEvent::InstancesCleared => Some("Removed the previous instance model.".to_string()),
        DeployEvent::TemplateResolved { template, recorded } => Some(if *recorded {
            format!("Template: {}", template.display())
        } else {
            format!("Template: {} (recorded)", template.display())
        }),
        DeployEvent::InputsRecorded { count, overridden } => {
            overridden.then(|| format!("Inputs: {} value(s) recorded", count))
        }
        DeployEvent::DeployStarted { workers } => {
            Some(format!("Deploying with {} worker(s)...", workers))
        }
        DeployEvent::DeployCompleted => Some("Deployment complete.".to_string()),
    }
}

/// Closing line for a deploy, if the event stream did not already say it all.
pub fn render_deploy_outcome(outcome: &DeployOutcome) -> Option<String> {
    match outcome {
        DeployOutcome::NoOp(NoOpReason::Declined(_)) => {
            Some("Deploy cancelled; the instance model was left unchanged.".to_string())
        }
        DeployOutcome::NoOp(NoOpReason::InstanceExists) | DeployOutcome::Proceed(_) => None,
    }
}

pub fn render_init_outcome(outcome: &InitOutcome) -> String {
    match outcome {
        InitOutcome::Initialized { template_ref, inputs } => format!(
            "Initialized with template {} and {} input(s). Run 'keel deploy' to deploy it.",
            template_ref.display(),
            inputs.len()
        ),
        InitOutcome::NoOp(_) => {
            "Init cancelled; the instance model was left unchanged.".to_string()
        }
    }
}
