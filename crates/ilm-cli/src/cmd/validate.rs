use crate::output::print_json;
use ilm_core::config::Config;
use ilm_core::document::load_policy;
use ilm_core::LifecycleRegistry;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct FileReport {
    file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lifecycle_type: Option<String>,
    valid: bool,
    errors: Vec<String>,
}

pub fn run(
    registry: &LifecycleRegistry,
    config: &Config,
    files: &[PathBuf],
    all: bool,
    json: bool,
) -> anyhow::Result<()> {
    let reports: Vec<FileReport> = files
        .iter()
        .map(|file| check_file(registry, config, file, all))
        .collect();

    if json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            if report.valid {
                let policy = report.policy.as_deref().unwrap_or_default();
                println!("ok     {} ({policy})", report.file.display());
            } else {
                for error in &report.errors {
                    println!("[error] {}: {error}", report.file.display());
                }
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} policies failed validation", reports.len());
    }
    Ok(())
}

fn check_file(
    registry: &LifecycleRegistry,
    config: &Config,
    file: &Path,
    all: bool,
) -> FileReport {
    let policy = match load_policy(file, &config.default_type) {
        Ok(policy) => policy,
        Err(e) => {
            tracing::debug!(file = %file.display(), error = %e, "policy not loaded");
            return FileReport {
                file: file.to_path_buf(),
                policy: None,
                lifecycle_type: None,
                valid: false,
                errors: vec![format!("failed to load policy: {e}")],
            };
        }
    };

    let errors = match registry.get(&policy.lifecycle_type) {
        Ok(lifecycle) if all => lifecycle
            .violations(policy.phases.values())
            .iter()
            .map(ToString::to_string)
            .collect(),
        Ok(lifecycle) => match lifecycle.validate(policy.phases.values()) {
            Ok(()) => Vec::new(),
            Err(e) => vec![e.to_string()],
        },
        Err(e) => vec![e.to_string()],
    };

    tracing::debug!(
        file = %file.display(),
        policy = %policy.name,
        errors = errors.len(),
        "policy checked"
    );

    FileReport {
        file: file.to_path_buf(),
        policy: Some(policy.name),
        lifecycle_type: Some(policy.lifecycle_type),
        valid: errors.is_empty(),
        errors,
    }
}
