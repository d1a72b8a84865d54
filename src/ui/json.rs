//! JSON output for `--json`: one NDJSON event per command.

use std::io::{self, Write};

use serde_json::{json, Value};

use keel::application::{DeployOutcome, InitOutcome};
use keel::KeelError;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &Value) -> io::Result<()> {
    let line = serde_json::to_string(event).map_err(io::Error::other)?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Write an event to stdout.
pub fn emit(event: Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

pub fn deploy_event(outcome: &DeployOutcome) -> Value {
    match outcome {
        DeployOutcome::Proceed(resolved) => json!({
            "event": "deploy",
            "status": "deployed",
            "template": resolved.template_ref.display().to_string(),
            "inputs": resolved.inputs.to_value(),
            "workers": resolved.workers.get(),
        }),
        DeployOutcome::NoOp(reason) => json!({
            "event": "deploy",
            "status": "noop",
            "reason": reason.code(),
        }),
    }
}

pub fn init_event(outcome: &InitOutcome) -> Value {
    match outcome {
        InitOutcome::Initialized {
            template_ref,
            inputs,
        } => json!({
            "event": "init",
            "status": "initialized",
            "template": template_ref.display().to_string(),
            "inputs": inputs.to_value(),
        }),
        InitOutcome::NoOp(reason) => json!({
            "event": "init",
            "status": "noop",
            "reason": reason.code(),
        }),
    }
}

/// Failure event; `code` comes from the underlying `KeelError` when there is one.
pub fn error_event(command: &str, error: &anyhow::Error) -> Value {
    let code = error
        .downcast_ref::<KeelError>()
        .map(KeelError::code)
        .unwrap_or("error");
    json!({
        "event": command,
        "status": "error",
        "code": code,
        "message": format!("{:#}", error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel::application::{NoOpReason, ResolvedDeployment};
    use keel::domain::ports::ExistingInstanceAction;
    use keel::domain::value_objects::{Inputs, Workers};

    fn line(event: &Value) -> String {
        let mut out = Vec::new();
        write_event(&mut out, event).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn write_event_emits_one_line() {
        let rendered = line(&json!({"event": "deploy"}));
        assert_eq!(rendered, "{\"event\":\"deploy\"}\n");
    }

    #[test]
    fn deployed_event() {
        let mut inputs = Inputs::new();
        inputs.insert("region", json!("eu-west-1"));
        let outcome = DeployOutcome::Proceed(ResolvedDeployment {
            template_ref: "app.yaml".into(),
            inputs,
            workers: Workers::new(3).unwrap(),
        });

        insta::assert_snapshot!(
            line(&deploy_event(&outcome)).trim_end(),
            @r#"{"event":"deploy","inputs":{"region":"eu-west-1"},"status":"deployed","template":"app.yaml","workers":3}"#
        );
    }

    #[test]
    fn noop_events_carry_reason() {
        let exists = deploy_event(&DeployOutcome::NoOp(NoOpReason::InstanceExists));
        let declined = deploy_event(&DeployOutcome::NoOp(NoOpReason::Declined(
            ExistingInstanceAction::Resume,
        )));

        insta::assert_snapshot!(
            line(&exists).trim_end(),
            @r#"{"event":"deploy","reason":"instance_exists","status":"noop"}"#
        );
        assert_eq!(declined["reason"], "declined");
    }

    #[test]
    fn init_event_lists_inputs() {
        let event = init_event(&InitOutcome::Initialized {
            template_ref: "app.yaml".into(),
            inputs: Inputs::new(),
        });
        assert_eq!(event["status"], "initialized");
        assert_eq!(event["inputs"], json!({}));
    }

    #[test]
    fn error_event_uses_keel_code() {
        let err = anyhow::Error::new(KeelError::ConflictingFlags);
        let event = error_event("deploy", &err);
        assert_eq!(event["code"], "conflicting_flags");
        assert_eq!(event["status"], "error");

        let other = anyhow::anyhow!("boom");
        assert_eq!(error_event("deploy", &other)["code"], "error");
    }
}
