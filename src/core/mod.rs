pub mod catalog;
mod engine;
pub mod export;
mod types;

pub use catalog::{Instrument, Project, ProjectId};
pub use engine::{build_trajectory, compute_metrics, evaluate_project, run_projection};
pub use types::{
    GAP_TARGET, GapMetrics, Inputs, ModelError, ProjectOutcome, Projection, START_YEAR,
    TrajectoryPoint,
};
