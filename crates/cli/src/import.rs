//! `terravalet import`: `terraform import` scripts for resources created outside terraform.

use std::path::PathBuf;

use clap::Args;
use terravalet_io::import::load_definitions;
use terravalet_io::plan::read_file;
use terravalet_io::{build_imports, PlanDocument};

use crate::config::Settings;
use crate::script::{render_import, render_import_rollback, write_scripts};
use crate::CliError;

#[derive(Args)]
pub struct ImportArgs {
    /// JSON map of resource type to { separator, priority, variables }
    #[arg(long)]
    res_defs: PathBuf,

    /// Output of `terraform show -json` for a plan that creates the resources
    #[arg(long)]
    src_plan: PathBuf,

    /// Script that imports the resources
    #[arg(long)]
    up: PathBuf,

    /// Script that removes them from the state again
    #[arg(long)]
    down: PathBuf,
}

pub fn cmd_import(args: ImportArgs, settings: &Settings) -> Result<(), CliError> {
    let defs = load_definitions(&args.res_defs).map_err(|e| CliError::plan("res-defs", e))?;
    let document = read_file(&args.src_plan)
        .and_then(|text| PlanDocument::from_json(&text))
        .map_err(|e| CliError::plan("src-plan", e))?;
    let plan = build_imports(&document, &defs).map_err(|e| CliError::plan("src-plan", e))?;
    tracing::info!(imports = plan.imports.len(), "built import plan");

    let up = render_import(&plan.imports, &settings.script);
    let down = render_import_rollback(&plan.removals, &settings.script);
    write_scripts(&[(args.up.as_path(), up.as_str()), (args.down.as_path(), down.as_str())])
}
