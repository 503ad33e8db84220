use crate::output::print_json;
use clap::Subcommand;
use ilm_core::config::{Config, WarnLevel};
use ilm_core::LifecycleRegistry;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(
    registry: &LifecycleRegistry,
    config: &Config,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(config, json),
        ConfigSubcommand::Validate => validate(registry, config, json),
    }
}

fn show(config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(config);
    }
    println!("version:      {}", config.version);
    println!("default_type: {}", config.default_type);
    println!("report_all:   {}", config.report_all);
    Ok(())
}

fn validate(registry: &LifecycleRegistry, config: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate(registry);

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
