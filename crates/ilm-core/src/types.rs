use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PhaseName
// ---------------------------------------------------------------------------

/// Storage tiers an index moves through. Variant order is the canonical
/// execution order of the timeseries lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseName {
    Hot,
    Warm,
    Cold,
    Delete,
}

impl PhaseName {
    pub fn all() -> &'static [PhaseName] {
        &[
            PhaseName::Hot,
            PhaseName::Warm,
            PhaseName::Cold,
            PhaseName::Delete,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PhaseName::Hot => "hot",
            PhaseName::Warm => "warm",
            PhaseName::Cold => "cold",
            PhaseName::Delete => "delete",
        }
    }

    pub fn from_name(s: &str) -> Option<PhaseName> {
        Self::all().iter().copied().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// Storage operations an executor knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Rollover,
    Allocate,
    Replicas,
    Shrink,
    ForceMerge,
    Delete,
}

impl ActionKind {
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::Rollover,
            ActionKind::Allocate,
            ActionKind::Replicas,
            ActionKind::Shrink,
            ActionKind::ForceMerge,
            ActionKind::Delete,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Rollover => "rollover",
            ActionKind::Allocate => "allocate",
            ActionKind::Replicas => "replicas",
            ActionKind::Shrink => "shrink",
            ActionKind::ForceMerge => "forcemerge",
            ActionKind::Delete => "delete",
        }
    }

    pub fn from_name(s: &str) -> Option<ActionKind> {
        Self::all().iter().copied().find(|a| a.as_str() == s)
    }

    /// True if the action removes or rewrites index data and cannot be undone.
    pub fn is_destructive(self) -> bool {
        matches!(
            self,
            ActionKind::Shrink | ActionKind::ForceMerge | ActionKind::Delete
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
