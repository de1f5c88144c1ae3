//! `terravalet remove`: `terraform state rm` for everything a plan destroys.

use std::path::PathBuf;

use clap::Args;
use terravalet_io::load_plan;

use crate::config::Settings;
use crate::script::{render_remove, write_scripts};
use crate::CliError;

#[derive(Args)]
pub struct RemoveArgs {
    /// Plan whose destroyed resources should only leave the state
    #[arg(long)]
    plan: PathBuf,

    /// Script that removes them
    #[arg(long)]
    up: PathBuf,
}

pub fn cmd_remove(args: RemoveArgs, settings: &Settings) -> Result<(), CliError> {
    let changes = load_plan(&args.plan).map_err(|e| CliError::plan("plan", e))?;
    if !changes.create.is_empty() {
        return Err(CliError::contract(format!(
            "plan contains resources to create: [{}]",
            changes.create.sorted().join(", ")
        ))
        .with_hint("remove only works on plans that purely destroy"));
    }

    let addresses = changes.destroy.sorted();
    tracing::info!(removals = addresses.len(), "collected resources to remove");
    let up = render_remove(&addresses, &settings.script);
    write_scripts(&[(args.up.as_path(), up.as_str())])
}
