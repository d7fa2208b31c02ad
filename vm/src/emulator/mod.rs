mod annotation;
mod executor;
pub mod instructions;
mod registry;

pub use annotation::Annotation;
pub use executor::{RunSummary, Simulator, StopReason};
pub use registry::{InstructionExecutorFn, InstructionExecutorRegistry};
