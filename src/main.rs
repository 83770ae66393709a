use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};

use sgit::cli::{run_workflow, WorkflowArgs};
use sgit::domain::{IncrementRequest, Version};
use sgit::git::{discover_root, CommandGit};
use sgit::store::VersionStore;
use sgit::{config, ui, SgitError};

#[derive(clap::Parser)]
#[command(
    name = "sgit",
    version,
    about = "Bump a semantic version, pick files, commit and push in one go"
)]
struct Args {
    #[arg(short = 'M', long, help = "Increment major version (resets minor and patch)")]
    major: bool,

    #[arg(short = 'm', long, help = "Increment minor version (resets patch)")]
    minor: bool,

    #[arg(short = 'p', long, help = "Increment patch version (default)")]
    patch: bool,

    #[arg(
        short = 's',
        long = "set",
        value_name = "VERSION",
        value_parser = Version::parse,
        help = "Set the version directly, e.g. 01.02.03"
    )]
    set: Option<Version>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        let code = e
            .downcast_ref::<SgitError>()
            .map(SgitError::exit_code)
            .unwrap_or(1);

        match e.downcast_ref::<SgitError>() {
            Some(SgitError::UserAbort(reason)) => ui::display_status(reason),
            _ => ui::display_error(&format!("{:#}", e)),
        }
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let root = discover_root(&cwd).context("Not in a git repository")?;

    let config = config::load_config(args.config.as_deref(), &root)?;
    let store = VersionStore::in_repo(&root, &config.version_file);
    let git = CommandGit::new(&root);

    let workflow_args = WorkflowArgs {
        request: IncrementRequest::from_flags(args.major, args.minor, args.patch, args.set),
        dry_run: args.dry_run,
    };

    run_workflow(&workflow_args, &config, &store, &git, ui::terminal())?;
    Ok(())
}
