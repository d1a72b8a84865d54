//! `keel init`

use anyhow::Result;
use keel::application::{InitRequest, InitUseCase, InputOverride};
use keel::infrastructure::FileInstanceStore;

use super::CommandContext;
use crate::cli::InitArgs;
use crate::ui::json;
use crate::ui::views::render_init_outcome;

pub fn cmd_init(args: &InitArgs, ctx: &CommandContext) -> Result<i32> {
    let mut request = InitRequest::new(&args.template).with_clean(args.clean);
    if let Some(path) = &args.instance_path {
        request = request.with_instance_path(path);
    }
    if let Some(file) = &args.inputs {
        request = request.with_inputs(InputOverride::File(file.clone()));
    }

    let root = request
        .instance_path
        .clone()
        .unwrap_or_else(|| ctx.config.storage.instance_path.clone());
    let use_case = InitUseCase::new(FileInstanceStore::new(root));

    let confirmer = ctx.confirmer(args.yes);
    let sink = ctx.event_sink();
    let outcome = use_case.execute(&request, confirmer.as_ref(), sink.as_ref())?;

    if ctx.json {
        json::emit(json::init_event(&outcome))?;
    } else {
        println!("{}", render_init_outcome(&outcome));
    }
    Ok(0)
}
