//! Command-line entry points that do not depend on clap

pub mod orchestration;

pub use orchestration::{run_workflow, WorkflowArgs, WorkflowResult};
