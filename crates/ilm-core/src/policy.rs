use serde_json::{Map, Value};
use std::collections::HashMap;

pub const DEFAULT_LIFECYCLE_TYPE: &str = "timeseries";

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A named operation within a phase. Parameters belong to the executor and are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    pub params: Map<String, Value>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Map::new(),
        }
    }

    pub fn with_params(name: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Actions are keyed by name. Validation and ordering read `Action::name`,
/// so a key that disagrees with its action's name has no effect on either.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub name: String,
    pub actions: HashMap<String, Action>,
}

impl Phase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: HashMap::new(),
        }
    }

    /// Build a phase from actions, keyed by their own names. A later action
    /// with the same name replaces an earlier one.
    pub fn with_actions(name: impl Into<String>, actions: impl IntoIterator<Item = Action>) -> Self {
        let mut phase = Self::new(name);
        for action in actions {
            phase.insert(action);
        }
        phase
    }

    pub fn insert(&mut self, action: Action) -> Option<Action> {
        self.actions.insert(action.name.clone(), action)
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// `Action::name` of every action, sorted lexicographically.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.values().map(|a| a.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// A user policy document: an unordered mapping from phase name to phase. It
/// only has meaning relative to the lifecycle type named by `lifecycle_type`.
/// As with actions, validation and ordering read `Phase::name`, not the key.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub name: String,
    pub lifecycle_type: String,
    pub phases: HashMap<String, Phase>,
}

impl Policy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifecycle_type: DEFAULT_LIFECYCLE_TYPE.to_string(),
            phases: HashMap::new(),
        }
    }

    pub fn with_phases(name: impl Into<String>, phases: impl IntoIterator<Item = Phase>) -> Self {
        let mut policy = Self::new(name);
        for phase in phases {
            policy.insert(phase);
        }
        policy
    }

    pub fn insert(&mut self, phase: Phase) -> Option<Phase> {
        self.phases.insert(phase.name.clone(), phase)
    }

    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.get(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
