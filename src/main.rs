use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use scaffolder::{available_licenses, available_templates, generate, GenerateOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the package descriptor (JSON, or YAML for .yaml/.yml)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Descriptor fields as key=value, applied after --data
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    set: Vec<String>,

    /// Path to a YAML options file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Template name
    #[arg(short, long, global = true)]
    template: Option<String>,

    /// Destination directory
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Rewrite files that already exist in the destination
    #[arg(long = "override", global = true)]
    overwrite: bool,

    /// Dry run mode - don't write files
    #[arg(long, global = true)]
    dry_run: bool,

    /// Maximum number of files processed at once
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    /// Directory containing template sets
    #[arg(long, global = true)]
    templates_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a project from a template (default command)
    New,
    /// List the available templates
    Templates,
    /// List the license identifiers templates can be filled with
    Licenses,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::New) | None => new_project(&cli)?,
        Some(Commands::Templates) => {
            for template in available_templates() {
                println!("{}", template);
            }
        }
        Some(Commands::Licenses) => {
            for license in available_licenses() {
                println!("{}", license);
            }
        }
    }

    Ok(())
}

/// Loads `--config` when given, then applies the command line flags over it.
fn resolve_options(cli: &Cli) -> Result<GenerateOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            info!("Loading options from {:?}", path);
            GenerateOptions::load(path).context("Failed to load options")?
        }
        None => GenerateOptions::default(),
    };
    if let Some(template) = &cli.template {
        options.template = template.clone();
    }
    if let Some(output) = &cli.output {
        options.cwd = output.clone();
    }
    options.overwrite |= cli.overwrite;
    options.dry_run |= cli.dry_run;
    if cli.jobs.is_some() {
        options.jobs = cli.jobs;
    }
    if cli.templates_dir.is_some() {
        options.templates_dir = cli.templates_dir.clone();
    }
    Ok(options)
}

fn new_project(cli: &Cli) -> Result<()> {
    let options = resolve_options(cli)?;

    let mut pkg = match &cli.data {
        Some(path) => load_descriptor(path)?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };
    apply_overrides(&mut pkg, &cli.set)?;

    if options.dry_run {
        info!("=== DRY RUN MODE ===");
    }

    let summary = generate(&pkg, &options)?;
    for path in &summary.skipped {
        info!("Kept existing {:?}", path);
    }
    println!(
        "{} file(s) written, {} skipped in {}",
        summary.written.len(),
        summary.skipped.len(),
        options.cwd.display()
    );

    Ok(())
}

fn load_descriptor(path: &Path) -> Result<serde_json::Value> {
    info!("Loading package descriptor from {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read package descriptor {:?}", path))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value = if is_yaml {
        serde_yaml::from_str(&content).context("Failed to parse YAML descriptor")?
    } else {
        serde_json::from_str(&content).context("Failed to parse JSON descriptor")?
    };
    Ok(value)
}

fn apply_overrides(pkg: &mut serde_json::Value, pairs: &[String]) -> Result<()> {
    if pairs.is_empty() {
        return Ok(());
    }
    let map = pkg
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("--set requires the descriptor to be an object"))?;
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected KEY=VALUE, got '{}'", pair))?;
        map.insert(
            key.trim().to_string(),
            serde_json::Value::String(value.to_string()),
        );
    }
    Ok(())
}
