//! Year-by-year projection engine

mod cashflows;
mod engine;
mod milestones;
mod state;

pub use cashflows::{Phase, ProjectionResult, ProjectionSummary, ProjectionYear};
pub use engine::{ProjectionConfig, ProjectionEngine, ResolvedAges};
pub use milestones::{evaluate_milestones, MilestoneStatus};
pub use state::{blended_return, DebtYear, ProjectionState};
