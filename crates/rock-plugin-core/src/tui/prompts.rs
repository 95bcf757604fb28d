//! Interactive create flow using cliclack

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{collect, Choice, ConfigValue, PromptDriver, Question, ScaffoldConfig};
use crate::error::{ToolError, ToolResult};
use crate::templates::{check_compatibility, scaffold, TemplateManifest, TemplateSet};
use crate::version;
use crate::{SUPPORTED_ROCK_VERSIONS, UPGRADE_COMMAND};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Directory holding the template assets (defaults to ./templates)
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Rock platform version to target
    pub rock_version: Option<String>,

    /// Include REST API support
    pub rest_api: Option<bool>,

    /// Copy build output into the RockWeb folder after each build
    pub copy_to_rock_web: Option<bool>,

    /// Path to the RockWeb folder
    pub rock_web_path: Option<String>,

    /// Canonical properties file supplying the tool version stamp
    pub props: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// cliclack-backed prompt driver
///
/// Any interaction failure is treated as an operator abort, so partial
/// configurations never escape the collector.
pub struct CliclackDriver;

impl PromptDriver for CliclackDriver {
    fn select(&mut self, question: &Question) -> ToolResult<usize> {
        let mut select = cliclack::select(&question.prompt);
        for (idx, choice) in question.choices().iter().enumerate() {
            select = select.item(idx, &choice.label, &choice.hint);
        }
        select.interact().map_err(|_| ToolError::PromptAborted)
    }
}

/// Run the create command with interactive prompts
pub fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("Rock Plugin Tools")?;

    // Step 1: Locate templates and pick one
    let template_root = args
        .template_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("templates"));
    let set = TemplateSet::open(template_root)?;
    let (name, manifest) = select_template(&set, args.template.as_deref())?;

    // Step 2: Check tool/template compatibility
    if let Some(warning) = check_compatibility(cli_version, &manifest.version, UPGRADE_COMMAND) {
        cliclack::log::warning(warning)?;
    }

    // Step 3: Select directory
    let project_dir = select_directory(&args)?;

    // Step 4: Collect the scaffold configuration
    let config = collect_config(&args, cli_version)?;

    // Step 5: Render the project files
    let written = scaffold(&set, &name, &manifest, &config, &project_dir)?;
    cliclack::log::success(format!(
        "Created {} files in {}",
        written.len(),
        project_dir.display()
    ))?;

    // Step 6: Show next steps
    print_next_steps(&project_dir)?;

    Ok(())
}

fn select_template(
    set: &TemplateSet,
    specified: Option<&str>,
) -> Result<(String, TemplateManifest)> {
    let names = set.list()?;
    if names.is_empty() {
        anyhow::bail!("No templates found in {}", set.root().display());
    }

    // If a template was specified via --template flag, use it directly
    if let Some(name) = specified {
        if !names.iter().any(|n| n == name) {
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                name,
                names.join(", ")
            );
        }
        let manifest = set.load_manifest(name)?;
        cliclack::log::info(format!(
            "Template: {} - {}",
            manifest.name, manifest.description
        ))?;
        return Ok((name.to_string(), manifest));
    }

    let mut templates: Vec<(String, TemplateManifest)> = Vec::new();
    for name in &names {
        templates.push((name.clone(), set.load_manifest(name)?));
    }

    // If only one template, use it automatically
    if templates.len() == 1 {
        let (name, manifest) = templates.into_iter().next().unwrap();
        cliclack::log::info(format!(
            "Using template: {} - {}",
            manifest.name, manifest.description
        ))?;
        return Ok((name, manifest));
    }

    let mut select = cliclack::select("Select a template");
    for (idx, (_, manifest)) in templates.iter().enumerate() {
        select = select.item(idx, &manifest.name, &manifest.description);
    }
    let selected: usize = select.interact().map_err(|_| ToolError::PromptAborted)?;

    Ok(templates.into_iter().nth(selected).unwrap())
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir.clone()
    } else {
        let input: String = cliclack::input("Plugin project directory")
            .placeholder(".")
            .default_input(".")
            .interact()
            .map_err(|_| ToolError::PromptAborted)?;

        if input.is_empty() || input == "." {
            current_dir.clone()
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()
                        .map_err(|_| ToolError::PromptAborted)?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn rock_version_question() -> Question {
    let choices = SUPPORTED_ROCK_VERSIONS
        .iter()
        .map(|v| Choice::new(ConfigValue::Text((*v).to_string()), *v))
        .collect();
    Question::select("RockVersion", "Which Rock version do you target?", choices)
}

/// Build the full scaffold configuration from flags plus prompts.
///
/// Flags answer their question up front; `--yes` falls back to defaults for
/// anything unanswered; everything else is asked interactively.
fn collect_config(args: &CreateArgs, cli_version: &str) -> Result<ScaffoldConfig> {
    let mut config = ScaffoldConfig::new();

    // ToolVersion comes from the canonical properties file when one is
    // given, otherwise from the running binary
    let tool_version = match &args.props {
        Some(path) => version::read_version_file(path)?,
        None => cli_version.to_string(),
    };
    config.set_text("ToolVersion", tool_version);

    let mut questions = Vec::new();

    match &args.rock_version {
        Some(rock_version) => {
            // The choice list is closed; a flag cannot widen it
            if !SUPPORTED_ROCK_VERSIONS.contains(&rock_version.as_str()) {
                anyhow::bail!(
                    "Unsupported Rock version '{}'. Supported: {}",
                    rock_version,
                    SUPPORTED_ROCK_VERSIONS.join(", ")
                );
            }
            config.set_text("RockVersion", rock_version.clone());
        }
        None if args.yes => config.set_text("RockVersion", SUPPORTED_ROCK_VERSIONS[0]),
        None => questions.push(rock_version_question()),
    }

    match args.rest_api {
        Some(value) => config.set_bool("RestApiSupport", value),
        None if args.yes => config.set_bool("RestApiSupport", false),
        None => questions.push(Question::yes_no(
            "RestApiSupport",
            "Include REST API support?",
        )),
    }

    match args.copy_to_rock_web {
        Some(value) => config.set_bool("Copy", value),
        None if args.yes => config.set_bool("Copy", false),
        None => questions.push(Question::yes_no(
            "Copy",
            "Copy build output into the RockWeb folder?",
        )),
    }

    let answers = collect(&mut CliclackDriver, &questions)?;
    config.merge(answers);

    let copy = config
        .get("Copy")
        .and_then(ConfigValue::as_bool)
        .unwrap_or(false);
    let rock_web_path = match &args.rock_web_path {
        Some(path) => path.clone(),
        None if copy && !args.yes => cliclack::input("Path to the RockWeb folder")
            .placeholder("C:/RockWeb")
            .default_input("C:/RockWeb")
            .interact()
            .map_err(|_| ToolError::PromptAborted)?,
        None => "C:/RockWeb".to_string(),
    };
    config.set_text("RockWebPath", rock_web_path);

    Ok(config)
}

fn print_next_steps(project_dir: &Path) -> Result<()> {
    let current = std::env::current_dir().ok();

    let mut steps = Vec::new();
    if current.as_deref() != Some(project_dir) {
        steps.push(format!("cd {}", project_dir.display()));
    }
    steps.push("dotnet build".to_string());
    steps.push("rock-tools check-version (your CI gate before publishing)".to_string());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
