//! Rock Tools CLI - Plugin scaffolding and version synchronization for the
//! Rock platform

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rock_plugin_core::error::ToolError;
use rock_plugin_core::tui::CreateArgs;
use rock_plugin_core::version::sync;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "rock-tools")]
#[command(about = "CLI for scaffolding Rock platform plugins and keeping package versions in sync")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Rock plugin project
    Create(CliCreateArgs),
    /// Stamp the canonical <Version> into tracked package manifests
    SyncVersion(VersionArgs),
    /// Verify tracked package manifests against the canonical <Version>
    CheckVersion(VersionArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory containing templates (defaults to ./templates)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Rock platform version to target
    #[arg(long = "rock-version")]
    pub rock_version: Option<String>,

    /// Include REST API support (true/false)
    #[arg(long = "rest-api")]
    pub rest_api: Option<bool>,

    /// Copy build output into the RockWeb folder after each build (true/false)
    #[arg(long = "copy-to-rock-web")]
    pub copy_to_rock_web: Option<bool>,

    /// Path to the RockWeb folder
    #[arg(long = "rock-web-path")]
    pub rock_web_path: Option<String>,

    /// Canonical properties file supplying the tool version stamp
    #[arg(long)]
    pub props: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            directory: args.directory,
            rock_version: args.rock_version,
            rest_api: args.rest_api,
            copy_to_rock_web: args.copy_to_rock_web,
            rock_web_path: args.rock_web_path,
            props: args.props,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct VersionArgs {
    /// Canonical properties file holding the <Version> declaration
    #[arg(long, default_value = "Directory.Build.props")]
    pub props: PathBuf,

    /// Package manifests tracking the canonical version (repeatable)
    #[arg(short, long = "manifest", default_value = "package.json")]
    pub manifests: Vec<PathBuf>,
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => run_create(create_args.into()),
        Some(Command::SyncVersion(version_args)) => sync_version(&version_args),
        Some(Command::CheckVersion(version_args)) => check_version(&version_args),
        // No subcommand provided, default to create (interactive mode)
        None => run_create(CreateArgs::default()),
    }
}

fn run_create(args: CreateArgs) -> Result<()> {
    let result = rock_plugin_core::run(args, CLI_VERSION);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

fn sync_version(args: &VersionArgs) -> Result<()> {
    for manifest in &args.manifests {
        let version = sync::sync_manifest(&args.props, manifest)?;
        println!(
            "{} {} -> version {}",
            "Synced".green().bold(),
            manifest.display(),
            version
        );
    }
    Ok(())
}

fn check_version(args: &VersionArgs) -> Result<()> {
    for manifest in &args.manifests {
        if let Err(e) = sync::check_manifest(&args.props, manifest) {
            let drifted = matches!(
                e.downcast_ref::<ToolError>(),
                Some(ToolError::VersionMismatch { .. })
            );
            if drifted {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                eprintln!(
                    "Run `rock-tools sync-version` first, then commit the updated manifest."
                );
                std::process::exit(1);
            }
            return Err(e);
        }
    }
    // Everything matches: stay silent and exit 0
    Ok(())
}
