mod cmd;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use ilm_core::config::{Config, CONFIG_FILE};
use ilm_core::LifecycleRegistry;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ilm",
    about = "Check index lifecycle policies and show the order their phases and actions run in",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./ilm.yaml, missing file means defaults)
    #[arg(long, global = true, env = "ILM_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log debug output to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate policy files against their lifecycle type
    Validate {
        /// Policy files (.yaml, .yml or .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Report every violation instead of stopping at the first
        #[arg(long)]
        all: bool,
    },

    /// Validate a policy and print its phases and actions in execution order
    Plan {
        /// Policy file (.yaml, .yml or .json)
        file: PathBuf,
    },

    /// List lifecycle types with their phases and actions
    Types,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    let registry = LifecycleRegistry::builtin();

    match cli.command {
        Commands::Validate { files, all } => {
            cmd::validate::run(&registry, &config, &files, all || config.report_all, cli.json)
        }
        Commands::Plan { file } => cmd::plan::run(&registry, &config, &file, cli.json),
        Commands::Types => cmd::types::run(&registry, cli.json),
        Commands::Config { subcommand } => {
            cmd::config::run(&registry, &config, subcommand, cli.json)
        }
    }
}
