use crate::output::{print_json, Table};
use anyhow::Context;
use ilm_core::config::Config;
use ilm_core::document::load_policy;
use ilm_core::LifecycleRegistry;
use std::path::Path;

pub fn run(
    registry: &LifecycleRegistry,
    config: &Config,
    file: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let policy = load_policy(file, &config.default_type)
        .with_context(|| format!("failed to load policy {}", file.display()))?;
    let plan = registry
        .plan(&policy)
        .with_context(|| format!("policy '{}' rejected", policy.name))?;

    if json {
        return print_json(&plan);
    }

    println!("Policy:    {}", plan.policy);
    println!("Lifecycle: {}", plan.lifecycle_type);
    println!();

    let mut table = Table::new(&["STEP", "PHASE", "ACTION", "PARAMS"]);
    let mut step = 0;
    for phase in &plan.phases {
        if phase.actions.is_empty() {
            table.push_row(["-", phase.name.as_str(), "(none)"]);
            continue;
        }
        for action in &phase.actions {
            step += 1;
            let params = if action.params.is_empty() {
                String::new()
            } else {
                serde_json::to_string(&action.params)?
            };
            table.push_row([
                step.to_string(),
                phase.name.to_string(),
                action.kind.to_string(),
                params,
            ]);
        }
    }

    if table.is_empty() {
        println!("No phases defined.");
    } else {
        table.print();
    }

    Ok(())
}
