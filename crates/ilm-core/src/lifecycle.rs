use crate::types::{ActionKind, PhaseName};

pub const TIMESERIES: &str = "timeseries";

// ---------------------------------------------------------------------------
// PhaseRules
// ---------------------------------------------------------------------------

/// What a lifecycle type allows in one phase, and the order it runs it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRules {
    pub phase: PhaseName,
    pub valid_actions: &'static [ActionKind],
    pub action_order: &'static [ActionKind],
}

impl PhaseRules {
    pub fn allows(&self, action: &str) -> bool {
        self.valid_actions.iter().any(|a| a.as_str() == action)
    }
}

// ---------------------------------------------------------------------------
// Timeseries rule table
// ---------------------------------------------------------------------------

const TIMESERIES_PHASES: &[PhaseRules] = &[
    PhaseRules {
        phase: PhaseName::Hot,
        valid_actions: &[ActionKind::Rollover],
        action_order: &[ActionKind::Rollover],
    },
    PhaseRules {
        phase: PhaseName::Warm,
        valid_actions: &[
            ActionKind::Allocate,
            ActionKind::Replicas,
            ActionKind::Shrink,
            ActionKind::ForceMerge,
        ],
        action_order: &[
            ActionKind::Allocate,
            ActionKind::Shrink,
            ActionKind::ForceMerge,
            ActionKind::Replicas,
        ],
    },
    PhaseRules {
        phase: PhaseName::Cold,
        valid_actions: &[ActionKind::Allocate, ActionKind::Replicas],
        action_order: &[ActionKind::Replicas, ActionKind::Allocate],
    },
    PhaseRules {
        phase: PhaseName::Delete,
        valid_actions: &[ActionKind::Delete],
        action_order: &[ActionKind::Delete],
    },
];

// ---------------------------------------------------------------------------
// LifecycleType
// ---------------------------------------------------------------------------

/// The fixed schema a policy is checked against: which phases may appear, in
/// which order they run, and per phase which actions may appear and in which
/// order they run.
///
/// Values are built from `'static` tables and have no mutators, so a single
/// instance can be shared by reference across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleType {
    type_name: &'static str,
    display_name: &'static str,
    phases: &'static [PhaseRules],
}

impl LifecycleType {
    /// hot → warm → cold → delete.
    pub const fn timeseries() -> Self {
        Self {
            type_name: TIMESERIES,
            display_name: "Timeseries",
            phases: TIMESERIES_PHASES,
        }
    }

    /// Stable identifier used as the policy document's `type` discriminant.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Phase rules in canonical execution order.
    pub fn phases(&self) -> &'static [PhaseRules] {
        self.phases
    }

    pub fn phase_names(&self) -> impl Iterator<Item = &'static str> {
        let phases: &'static [PhaseRules] = self.phases;
        phases.iter().map(|r| r.phase.as_str())
    }

    pub fn rules_for(&self, phase: &str) -> Option<&'static PhaseRules> {
        let phases: &'static [PhaseRules] = self.phases;
        phases.iter().find(|r| r.phase.as_str() == phase)
    }

    pub fn is_valid_phase(&self, phase: &str) -> bool {
        self.rules_for(phase).is_some()
    }

    /// `None` when the phase itself is not part of this lifecycle.
    pub fn valid_actions(&self, phase: &str) -> Option<&'static [ActionKind]> {
        self.rules_for(phase).map(|r| r.valid_actions)
    }

    /// Empty for a phase this lifecycle does not know.
    pub fn action_order(&self, phase: &str) -> &'static [ActionKind] {
        self.rules_for(phase).map(|r| r.action_order).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
