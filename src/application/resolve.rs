//! Shared resolution steps for `init` and `deploy`
//!
//! Both commands record the template reference and the effective inputs the
//! same way, so a later deploy without arguments picks them up.

use std::path::{Path, PathBuf};

use crate::domain::ports::{keys, DeployEvent, DeployEventSink, InstanceStore};
use crate::domain::value_objects::Inputs;
use crate::error::{KeelError, KeelResult};

use super::deploy::InputOverride;

/// Reject a caller-supplied store directory that does not exist.
pub(crate) fn validate_instance_path(path: Option<&Path>) -> KeelResult<()> {
    match path {
        Some(path) if !path.is_dir() => Err(KeelError::InvalidInstancePath {
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

/// Use the supplied template reference (recording it), or the recorded one.
pub(crate) fn resolve_template(
    store: &dyn InstanceStore,
    supplied: Option<&Path>,
    sink: &dyn DeployEventSink,
) -> KeelResult<PathBuf> {
    let (template, recorded) = match supplied {
        Some(template) => {
            store.write(keys::ROOT_FILE, &template.to_string_lossy())?;
            tracing::info!(template = %template.display(), "template reference recorded");
            (template.to_path_buf(), true)
        }
        None if store.exists(keys::ROOT_FILE) => {
            let recorded = store.read(keys::ROOT_FILE)?;
            (PathBuf::from(recorded.trim()), false)
        }
        None => return Err(KeelError::MissingTemplate),
    };

    sink.on_event(DeployEvent::TemplateResolved {
        template: template.clone(),
        recorded,
    });
    Ok(template)
}

/// Work out the effective inputs and persist them.
///
/// The store always holds an `inputs` record afterwards. A failing override
/// leaves any previously recorded inputs untouched.
pub(crate) fn resolve_inputs(
    store: &dyn InstanceStore,
    supplied: Option<&InputOverride>,
    sink: &dyn DeployEventSink,
) -> KeelResult<Inputs> {
    let baseline_recorded = store.exists(keys::INPUTS);
    if !baseline_recorded {
        store.write_json(keys::INPUTS, &Inputs::new().to_value())?;
    }

    let inputs = match supplied {
        Some(source) => {
            let inputs = Inputs::parse_override(&source.read()?)?;
            store.write_json(keys::INPUTS, &inputs.to_value())?;
            tracing::info!(count = inputs.len(), "input override recorded");
            inputs
        }
        None if baseline_recorded => Inputs::from_stored(&store.read(keys::INPUTS)?)?,
        None => Inputs::new(),
    };

    sink.on_event(DeployEvent::InputsRecorded {
        count: inputs.len(),
        overridden: supplied.is_some(),
    });
    Ok(inputs)
}
