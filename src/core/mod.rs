pub mod backend;
pub mod planner;
pub mod progress;
pub mod steps;

pub use crate::types::result::PlanResult;
pub use backend::GenerationBackend;
pub use planner::TripPlanner;
pub use progress::{FnSink, NoopSink, ProgressSink};
pub use steps::{AgentName, AgentStep, StepStatus};
