pub mod config;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod order;
pub mod policy;
pub mod registry;
pub mod types;
pub mod validate;

pub use error::{IlmError, Result, ValidationError};
pub use lifecycle::LifecycleType;
pub use order::ExecutionPlan;
pub use policy::{Action, Phase, Policy};
pub use registry::LifecycleRegistry;
