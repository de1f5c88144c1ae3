//! `terravalet rename` and `terravalet move`: `terraform state mv` scripts.

use std::path::{Path, PathBuf};

use clap::Args;
use terravalet_io::{load_plan, PlannedChanges};
use terravalet_recon::{run, AddressSet, MatchOptions, Reconciliation};

use crate::config::Settings;
use crate::exit_codes::EXIT_ERROR;
use crate::script::{render_mv, shell_word, write_scripts};
use crate::CliError;

#[derive(Args)]
pub struct RenameArgs {
    /// Output of `terraform plan` (text) or `terraform show -json`
    #[arg(long)]
    plan: PathBuf,

    /// Script that applies the renames
    #[arg(long)]
    up: PathBuf,

    /// Script that reverts them
    #[arg(long)]
    down: PathBuf,

    /// Local state file the scripts operate on
    #[arg(long, default_value = "local.tfstate")]
    state: String,

    /// Pair what exact matching leaves behind by q-gram distance
    #[arg(long)]
    fuzzy_match: bool,

    /// Print the match table and summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Plan of the root the resources leave; may only destroy
    #[arg(long)]
    src_plan: PathBuf,

    /// Plan of the root the resources join; may only create
    #[arg(long)]
    dst_plan: PathBuf,

    /// Local copy of the source state
    #[arg(long)]
    src_state: String,

    /// Local copy of the destination state
    #[arg(long)]
    dst_state: String,

    /// Script that applies the move
    #[arg(long)]
    up: PathBuf,

    /// Script that reverts it
    #[arg(long)]
    down: PathBuf,

    /// Print the match table and summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn read_plan(what: &str, path: &Path) -> Result<PlannedChanges, CliError> {
    load_plan(path).map_err(|e| CliError::plan(what, e))
}

fn sorted_list(set: &AddressSet) -> String {
    format!("[{}]", set.sorted().join(", "))
}

fn print_report(result: &Reconciliation) -> Result<(), CliError> {
    let report = serde_json::json!({
        "up": result.table.up(),
        "down": result.table.down(),
        "summary": result.summary,
    });
    let text = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
    println!("{text}");
    Ok(())
}

pub fn cmd_rename(args: RenameArgs, settings: &Settings) -> Result<(), CliError> {
    let changes = read_plan("plan", &args.plan)?;
    let options = MatchOptions {
        fuzzy: args.fuzzy_match || settings.matching.fuzzy,
    };

    let result = run(changes.create, changes.destroy, &options).map_err(CliError::recon)?;
    let summary = &result.summary;
    tracing::info!(
        exact = summary.exact,
        fuzzy = summary.fuzzy,
        unmatched_create = summary.unmatched_create,
        unmatched_destroy = summary.unmatched_destroy,
        "matched plan"
    );

    if !result.is_complete() {
        let stage = if options.fuzzy { "fuzzy matching" } else { "exact matching" };
        let err = CliError::unmatched(stage, &result.residue);
        return Err(if options.fuzzy {
            err
        } else {
            err.with_hint("re-run with --fuzzy-match and review the generated script")
        });
    }
    if options.fuzzy && summary.fuzzy == 0 {
        tracing::warn!("fuzzy matching requested but exact matching already paired everything");
    }
    if summary.fuzzy > 0 {
        tracing::warn!(pairs = summary.fuzzy, "fuzzy pairs are guesses, review the up script");
    }

    let state_flags = format!("-state={}", shell_word(&args.state));
    let up = render_mv(result.table.up(), &state_flags, &settings.script);
    let down = render_mv(result.table.down(), &state_flags, &settings.script);
    write_scripts(&[(args.up.as_path(), up.as_str()), (args.down.as_path(), down.as_str())])?;

    if args.json {
        print_report(&result)?;
    }
    Ok(())
}

pub fn cmd_move(args: MoveArgs, settings: &Settings) -> Result<(), CliError> {
    let src = read_plan("src-plan", &args.src_plan)?;
    if !src.create.is_empty() {
        return Err(CliError::contract(format!(
            "src-plan contains resources to create: {}",
            sorted_list(&src.create)
        )));
    }
    let dst = read_plan("dst-plan", &args.dst_plan)?;
    if !dst.destroy.is_empty() {
        return Err(CliError::contract(format!(
            "dst-plan contains resources to destroy: {}",
            sorted_list(&dst.destroy)
        )));
    }

    let result = run(dst.create, src.destroy, &MatchOptions::exact_only()).map_err(CliError::recon)?;
    if !result.is_complete() {
        return Err(CliError::unmatched("exact matching", &result.residue));
    }
    tracing::info!(moves = result.table.len(), "matched src and dst plans");

    let (src_state, dst_state) = (shell_word(&args.src_state), shell_word(&args.dst_state));
    let up_flags = format!("-state={src_state} -state-out={dst_state}");
    let down_flags = format!("-state={dst_state} -state-out={src_state}");
    let up = render_mv(result.table.up(), &up_flags, &settings.script);
    let down = render_mv(result.table.down(), &down_flags, &settings.script);
    write_scripts(&[(args.up.as_path(), up.as_str()), (args.down.as_path(), down.as_str())])?;

    if args.json {
        print_report(&result)?;
    }
    Ok(())
}
