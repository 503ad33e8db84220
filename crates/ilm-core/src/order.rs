use crate::error::ValidationError;
use crate::lifecycle::LifecycleType;
use crate::policy::{Action, Phase, Policy};
use crate::types::{ActionKind, PhaseName};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

impl LifecycleType {
    /// Phases present in `phases`, in canonical order. Phases are matched on
    /// `Phase::name`, the same field `validate` checks, not on the map key.
    /// Names this lifecycle does not know are left out rather than reported;
    /// call `validate` first.
    pub fn ordered_phases<'a>(&self, phases: &'a HashMap<String, Phase>) -> Vec<&'a Phase> {
        self.phase_names()
            .flat_map(move |name| phases.values().filter(move |p| p.name == name))
            .collect()
    }

    /// Actions present in `phase`, in the canonical order registered for its
    /// name, matched on `Action::name`. An unknown phase yields nothing.
    pub fn ordered_actions<'a>(&self, phase: &'a Phase) -> Vec<&'a Action> {
        self.action_order(&phase.name)
            .iter()
            .flat_map(move |kind| {
                phase
                    .actions
                    .values()
                    .filter(move |a| a.name == kind.as_str())
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ExecutionPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedAction {
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    /// Hint for executors: the action rewrites or removes index data.
    pub destructive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPhase {
    pub name: PhaseName,
    pub actions: Vec<PlannedAction>,
}

/// The single sequence an executor runs for a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub policy: String,
    pub lifecycle_type: String,
    pub phases: Vec<PlannedPhase>,
}

impl ExecutionPlan {
    /// Validate `policy` and, only if it is accepted as a whole, order it.
    pub fn build(lifecycle: &LifecycleType, policy: &Policy) -> Result<Self, ValidationError> {
        lifecycle.validate(policy.phases.values())?;

        let phases = lifecycle
            .ordered_phases(&policy.phases)
            .into_iter()
            .filter_map(|phase| {
                let name = PhaseName::from_name(&phase.name)?;
                let actions = lifecycle
                    .ordered_actions(phase)
                    .into_iter()
                    .filter_map(|action| {
                        let kind = ActionKind::from_name(&action.name)?;
                        Some(PlannedAction {
                            kind,
                            params: action.params.clone(),
                            destructive: kind.is_destructive(),
                        })
                    })
                    .collect();
                Some(PlannedPhase { name, actions })
            })
            .collect::<Vec<_>>();

        debug!(
            policy = %policy.name,
            lifecycle = lifecycle.type_name(),
            phases = phases.len(),
            "execution plan built"
        );

        Ok(Self {
            policy: policy.name.clone(),
            lifecycle_type: lifecycle.type_name().to_string(),
            phases,
        })
    }

    pub fn action_count(&self) -> usize {
        self.phases.iter().map(|p| p.actions.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(name: &str, actions: &[&str]) -> Phase {
        Phase::with_actions(name, actions.iter().map(|a| Action::new(*a)))
    }

    fn by_name(phases: impl IntoIterator<Item = Phase>) -> HashMap<String, Phase> {
        phases.into_iter().map(|p| (p.name.clone(), p)).collect()
    }

    fn names(phases: &[&Phase]) -> Vec<String> {
        phases.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn phases_follow_canonical_order() {
        let ts = LifecycleType::timeseries();
        let forward = by_name([phase("hot", &[]), phase("delete", &[])]);
        let backward = by_name([phase("delete", &[]), phase("hot", &[])]);
        assert_eq!(names(&ts.ordered_phases(&forward)), vec!["hot", "delete"]);
        assert_eq!(names(&ts.ordered_phases(&backward)), vec!["hot", "delete"]);
    }

    #[test]
    fn absent_phases_skipped() {
        let ts = LifecycleType::timeseries();
        let only_warm = by_name([phase("warm", &[])]);
        assert_eq!(names(&ts.ordered_phases(&only_warm)), vec!["warm"]);
        assert!(ts.ordered_phases(&HashMap::new()).is_empty());
    }

    #[test]
    fn unknown_phases_not_emitted() {
        let ts = LifecycleType::timeseries();
        let phases = by_name([phase("frozen", &[]), phase("cold", &[])]);
        assert_eq!(names(&ts.ordered_phases(&phases)), vec!["cold"]);
    }

    #[test]
    fn warm_actions_follow_canonical_order() {
        let ts = LifecycleType::timeseries();
        let warm = phase("warm", &["forcemerge", "shrink", "allocate", "replicas"]);
        let ordered: Vec<&str> = ts
            .ordered_actions(&warm)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(ordered, vec!["allocate", "shrink", "forcemerge", "replicas"]);
    }

    #[test]
    fn cold_actions_follow_canonical_order() {
        let ts = LifecycleType::timeseries();
        let cold = phase("cold", &["allocate", "replicas"]);
        let ordered: Vec<&str> = ts
            .ordered_actions(&cold)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(ordered, vec!["replicas", "allocate"]);
    }

    #[test]
    fn unknown_phase_yields_no_actions() {
        let ts = LifecycleType::timeseries();
        assert!(ts.ordered_actions(&phase("frozen", &["rollover"])).is_empty());
    }

    #[test]
    fn actions_not_in_order_are_dropped() {
        let ts = LifecycleType::timeseries();
        let hot = phase("hot", &["rollover", "shrink"]);
        let ordered = ts.ordered_actions(&hot);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].name, "rollover");
    }

    #[test]
    fn phases_matched_on_name_not_key() {
        let ts = LifecycleType::timeseries();
        let mut phases = HashMap::new();
        phases.insert("first".to_string(), phase("delete", &[]));
        phases.insert("delete".to_string(), phase("frozen", &[]));
        phases.insert("second".to_string(), phase("hot", &[]));

        assert_eq!(names(&ts.ordered_phases(&phases)), vec!["hot", "delete"]);
        assert!(ts.validate(phases.values()).is_err());
    }

    #[test]
    fn actions_matched_on_name_not_key() {
        let ts = LifecycleType::timeseries();
        let mut warm = Phase::new("warm");
        warm.actions.insert("a".to_string(), Action::new("shrink"));
        warm.actions.insert("allocate".to_string(), Action::new("replicas"));

        let ordered: Vec<&str> = ts
            .ordered_actions(&warm)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(ordered, vec!["shrink", "replicas"]);
    }

    #[test]
    fn plan_uses_the_orderer() {
        let ts = LifecycleType::timeseries();
        let policy = Policy::with_phases(
            "metrics",
            [
                phase("cold", &["allocate", "replicas"]),
                phase("warm", &["replicas", "forcemerge", "allocate", "shrink"]),
            ],
        );
        let plan = ExecutionPlan::build(&ts, &policy).unwrap();

        let ordered = ts.ordered_phases(&policy.phases);
        assert_eq!(plan.phases.len(), ordered.len());
        for (planned, phase) in plan.phases.iter().zip(ordered) {
            assert_eq!(planned.name.as_str(), phase.name);
            let expected: Vec<&str> = ts
                .ordered_actions(phase)
                .iter()
                .map(|a| a.name.as_str())
                .collect();
            let got: Vec<&str> = planned.actions.iter().map(|a| a.kind.as_str()).collect();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn plan_end_to_end() {
        let ts = LifecycleType::timeseries();
        let policy = Policy::with_phases(
            "logs",
            [
                phase("delete", &["delete"]),
                phase("warm", &["shrink", "allocate"]),
                phase("hot", &["rollover"]),
            ],
        );

        let plan = ExecutionPlan::build(&ts, &policy).unwrap();
        assert_eq!(plan.policy, "logs");
        assert_eq!(plan.lifecycle_type, "timeseries");

        let phase_names: Vec<PhaseName> = plan.phases.iter().map(|p| p.name).collect();
        assert_eq!(
            phase_names,
            vec![PhaseName::Hot, PhaseName::Warm, PhaseName::Delete]
        );

        let warm: Vec<ActionKind> = plan.phases[1].actions.iter().map(|a| a.kind).collect();
        assert_eq!(warm, vec![ActionKind::Allocate, ActionKind::Shrink]);
        assert_eq!(plan.action_count(), 4);
        assert!(plan.phases[2].actions[0].destructive);
    }

    #[test]
    fn plan_carries_params() {
        let ts = LifecycleType::timeseries();
        let mut params = Map::new();
        params.insert("max_docs".to_string(), Value::from(1000));
        let hot = Phase::with_actions("hot", [Action::with_params("rollover", params.clone())]);
        let plan = ExecutionPlan::build(&ts, &Policy::with_phases("p", [hot])).unwrap();
        assert_eq!(plan.phases[0].actions[0].params, params);
    }

    #[test]
    fn invalid_policy_yields_no_plan() {
        let ts = LifecycleType::timeseries();
        let policy = Policy::with_phases(
            "logs",
            [phase("hot", &["rollover"]), phase("cold", &["shrink"])],
        );
        let err = ExecutionPlan::build(&ts, &policy).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedAction {
                action: "shrink".to_string(),
                phase: "cold".to_string(),
            }
        );
    }

    #[test]
    fn plan_serializes_lowercase_names() {
        let ts = LifecycleType::timeseries();
        let policy = Policy::with_phases("p", [phase("warm", &["forcemerge"])]);
        let plan = ExecutionPlan::build(&ts, &policy).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["phases"][0]["name"], "warm");
        assert_eq!(json["phases"][0]["actions"][0]["kind"], "forcemerge");
        assert!(json["phases"][0]["actions"][0].get("params").is_none());
    }
}
