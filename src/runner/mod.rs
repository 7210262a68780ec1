//! Bootstrap orchestration.

pub mod context;
pub mod report;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::StageContext;
pub use report::{ItemStatus, ReportItem, StageReport};
pub use workflow::{RunOptions, RunProgress, Stage, WorkflowResult, WorkflowRunner};
