//! `keel deploy`

use anyhow::Result;
use keel::application::{DeployRequest, DeployUseCase, InputOverride};
use keel::infrastructure::{FileInstanceStore, ManifestLoader};

use super::CommandContext;
use crate::cli::DeployArgs;
use crate::ui::json;
use crate::ui::views::render_deploy_outcome;

/// Build the controller request; CLI values win over configuration.
pub fn build_request(args: &DeployArgs, ctx: &CommandContext) -> DeployRequest {
    let mut request = DeployRequest::new()
        .with_workers(args.workers.unwrap_or(ctx.config.deploy.workers))
        .with_resume(args.resume)
        .with_force(args.force);
    if let Some(path) = &args.instance_path {
        request = request.with_instance_path(path);
    }
    if let Some(template) = &args.template {
        request = request.with_template(template);
    }
    if let Some(file) = &args.inputs {
        request = request.with_inputs(InputOverride::File(file.clone()));
    }
    request
}

pub fn cmd_deploy(args: &DeployArgs, ctx: &CommandContext) -> Result<i32> {
    let request = build_request(args, ctx);
    let store = FileInstanceStore::new(request.store_root(&ctx.config.storage.instance_path));
    let cwd = std::env::current_dir()?;
    let use_case = DeployUseCase::new(store, ManifestLoader::new()).with_working_dir(cwd);

    let outcome = use_case.execute_full(&request, ctx.confirmer(args.yes), ctx.event_sink())?;

    if ctx.json {
        json::emit(json::deploy_event(&outcome))?;
    } else if let Some(line) = render_deploy_outcome(&outcome) {
        println!("{}", line);
    }
    Ok(outcome.exit_code())
}
