use crate::error::ValidationError;
use crate::lifecycle::LifecycleType;
use crate::policy::Phase;
use tracing::debug;

impl LifecycleType {
    /// Check every phase and action name against this lifecycle's catalogue.
    ///
    /// Phases are visited sorted by name, and actions within a phase sorted by
    /// name, so the first violation reported does not depend on map iteration
    /// order. Fails on the first violation.
    pub fn validate<'a>(
        &self,
        phases: impl IntoIterator<Item = &'a Phase>,
    ) -> Result<(), ValidationError> {
        match self.check(phases, true).into_iter().next() {
            Some(err) => {
                debug!(lifecycle = self.type_name(), error = %err, "policy rejected");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Every violation, in the same order `validate` would encounter them.
    /// An unknown phase contributes only its own violation; its actions are
    /// not checked.
    pub fn violations<'a>(
        &self,
        phases: impl IntoIterator<Item = &'a Phase>,
    ) -> Vec<ValidationError> {
        self.check(phases, false)
    }

    fn check<'a>(
        &self,
        phases: impl IntoIterator<Item = &'a Phase>,
        fail_fast: bool,
    ) -> Vec<ValidationError> {
        let mut sorted: Vec<&Phase> = phases.into_iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut found = Vec::new();
        for phase in sorted {
            let Some(rules) = self.rules_for(&phase.name) else {
                found.push(ValidationError::UnsupportedPhase {
                    lifecycle: self.display_name(),
                    phase: phase.name.clone(),
                });
                if fail_fast {
                    return found;
                }
                continue;
            };

            for action in phase.action_names() {
                if !rules.allows(action) {
                    found.push(ValidationError::UnsupportedAction {
                        action: action.to_string(),
                        phase: phase.name.clone(),
                    });
                    if fail_fast {
                        return found;
                    }
                }
            }
        }
        found
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
