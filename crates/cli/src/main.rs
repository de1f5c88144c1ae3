// terravalet - generate terraform state migration scripts from plans

mod config;
mod exit_codes;
mod import;
mod migrate;
mod remove;
mod script;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use terravalet_io::PlanError;
use terravalet_recon::{ReconError, Residue};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Settings;
use exit_codes::{
    EXIT_AMBIGUOUS, EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_PLAN_CONTRACT, EXIT_SUCCESS,
    EXIT_UNMATCHED,
};

#[derive(Parser)]
#[command(name = "terravalet")]
#[command(about = "Generate terraform state mv, import and rm scripts from a plan")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config with [match] and [script] settings
    #[arg(long, global = true, env = "TERRAVALET_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging on stderr (TERRAVALET_LOG overrides the filter otherwise)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename resources inside one state (module refactors, for_each conversions)
    #[command(after_help = "\
Examples:
  terraform plan -no-color > plan.txt
  terravalet rename --plan plan.txt --up up.sh --down down.sh
  terravalet rename --plan plan.txt --up up.sh --down down.sh --fuzzy-match
  terravalet rename --plan plan.json --state prod.tfstate --up up.sh --down down.sh --json

Fuzzy matches are guesses: read the up script before running it.")]
    Rename(migrate::RenameArgs),

    /// Move resources from one state to another
    #[command(after_help = "\
Examples:
  terravalet move \\
    --src-plan src.txt --src-state src.tfstate \\
    --dst-plan dst.txt --dst-state dst.tfstate \\
    --up up.sh --down down.sh")]
    Move(migrate::MoveArgs),

    /// Import resources created out-of-band of terraform
    #[command(after_help = "\
Examples:
  terraform show -json plan.bin > plan.json
  terravalet import --res-defs defs.json --src-plan plan.json --up import.sh --down rollback.sh")]
    Import(import::ImportArgs),

    /// Remove resources from the state without destroying them
    #[command(after_help = "\
Examples:
  terravalet remove --plan plan.txt --up remove.sh")]
    Remove(remove::RemoveArgs),
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
            "\nscript_output_format: 2",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
            "\nscript_output_format: 2",
        )
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TERRAVALET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = Settings::load(cli.config.as_deref()).and_then(|settings| match cli.command {
        Commands::Rename(args) => migrate::cmd_rename(args, &settings),
        Commands::Move(args) => migrate::cmd_move(args, &settings),
        Commands::Import(args) => import::cmd_import(args, &settings),
        Commands::Remove(args) => remove::cmd_remove(args, &settings),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Plan or definitions failure; `what` names the input (e.g. "src-plan").
    pub fn plan(what: &str, err: PlanError) -> Self {
        let code = match &err {
            PlanError::Read { .. } => EXIT_IO,
            PlanError::NoResourcesToCreate | PlanError::OnlyUndefinedResources => {
                EXIT_PLAN_CONTRACT
            }
            _ => EXIT_PARSE,
        };
        Self::new(code, format!("{what}: {err}"))
    }

    pub fn recon(err: ReconError) -> Self {
        match err {
            ReconError::AmbiguousMigration { .. } => Self::new(EXIT_AMBIGUOUS, err.to_string())
                .with_hint("rename one of the resources by hand first, or pair them with an explicit `terraform state mv`"),
            other => Self::new(EXIT_ERROR, other.to_string()),
        }
    }

    pub fn unmatched(stage: &str, residue: &Residue) -> Self {
        Self::new(EXIT_UNMATCHED, format!("{stage} left addresses unmatched:\n{residue}"))
    }

    /// Plan parsed fine but asks for something this command cannot do.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::new(EXIT_PLAN_CONTRACT, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_errors_map_to_exit_codes() {
        let read = PlanError::Read {
            path: "x".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(CliError::plan("plan", read).code, EXIT_IO);
        assert_eq!(
            CliError::plan("src-plan", PlanError::OnlyUndefinedResources).code,
            EXIT_PLAN_CONTRACT
        );
        let err = CliError::plan("plan", PlanError::Json("eof".into()));
        assert_eq!(err.code, EXIT_PARSE);
        assert_eq!(err.message, "plan: parsing the plan: eof");
    }

    #[test]
    fn ambiguity_gets_its_own_code_and_a_hint() {
        let err = CliError::recon(ReconError::AmbiguousMigration {
            first: ("a".into(), "b".into()),
            second: ("c".into(), "b".into()),
        });
        assert_eq!(err.code, EXIT_AMBIGUOUS);
        assert!(err.hint.is_some());
    }
}
