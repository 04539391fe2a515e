//! Retirement Projection - year-by-year retirement planning engine
//!
//! This library provides:
//! - Service classification and retirement eligibility across two pension tiers
//! - Pension, savings account and health-coverage calculators
//! - A deterministic year-by-year household projection
//! - Partial profile updates and scenario comparison

pub mod assumptions;
pub mod benefits;
pub mod error;
pub mod profile;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use benefits::{EligibilityInfo, PensionBreakdown};
pub use error::{Error, Result};
pub use profile::{Profile, ProfilePatch};
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionYear};
pub use scenario::{Scenario, ScenarioComparison, ScenarioRunner};
