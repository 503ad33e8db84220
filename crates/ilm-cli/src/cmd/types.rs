use crate::output::{print_json, Table};
use ilm_core::LifecycleRegistry;
use serde::Serialize;

#[derive(Serialize)]
struct PhaseSummary {
    name: &'static str,
    valid_actions: Vec<&'static str>,
    action_order: Vec<&'static str>,
}

#[derive(Serialize)]
struct TypeSummary {
    #[serde(rename = "type")]
    type_name: &'static str,
    phases: Vec<PhaseSummary>,
}

pub fn run(registry: &LifecycleRegistry, json: bool) -> anyhow::Result<()> {
    let summaries: Vec<TypeSummary> = registry
        .types()
        .iter()
        .map(|t| TypeSummary {
            type_name: t.type_name(),
            phases: t
                .phases()
                .iter()
                .map(|rules| PhaseSummary {
                    name: rules.phase.as_str(),
                    valid_actions: rules.valid_actions.iter().map(|a| a.as_str()).collect(),
                    action_order: rules.action_order.iter().map(|a| a.as_str()).collect(),
                })
                .collect(),
        })
        .collect();

    if json {
        return print_json(&summaries);
    }

    let mut table = Table::new(&["TYPE", "PHASE", "ACTIONS (execution order)"]);
    for summary in &summaries {
        for phase in &summary.phases {
            table.push_row([
                summary.type_name.to_string(),
                phase.name.to_string(),
                phase.action_order.join(" -> "),
            ]);
        }
    }
    table.print();

    Ok(())
}
