use crate::error::{IlmError, Result};
use crate::lifecycle::LifecycleType;
use crate::order::ExecutionPlan;
use crate::policy::Policy;

/// Lifecycle types addressable by their `type` discriminant. Built once at
/// startup and handed out by reference.
#[derive(Debug, Clone)]
pub struct LifecycleRegistry {
    types: Vec<LifecycleType>,
}

impl LifecycleRegistry {
    pub fn builtin() -> Self {
        Self {
            types: vec![LifecycleType::timeseries()],
        }
    }

    pub fn get(&self, type_name: &str) -> Result<&LifecycleType> {
        self.types
            .iter()
            .find(|t| t.type_name() == type_name)
            .ok_or_else(|| IlmError::UnknownLifecycleType(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.get(type_name).is_ok()
    }

    pub fn types(&self) -> &[LifecycleType] {
        &self.types
    }

    /// Resolve the policy's lifecycle type and validate against it.
    pub fn validate(&self, policy: &Policy) -> Result<()> {
        let lifecycle = self.get(&policy.lifecycle_type)?;
        lifecycle.validate(policy.phases.values())?;
        Ok(())
    }

    pub fn plan(&self, policy: &Policy) -> Result<ExecutionPlan> {
        let lifecycle = self.get(&policy.lifecycle_type)?;
        Ok(ExecutionPlan::build(lifecycle, policy)?)
    }
}

impl Default for LifecycleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
