//! Rule tables and heuristics driving the calculators

mod accrual;
mod household;
mod premiums;
mod service;
pub mod loader;

pub use accrual::{AccrualBand, AccrualRules, SurvivorReductions};
pub use household::HouseholdHeuristics;
pub use loader::LoadedAssumptions;
pub use premiums::{CoverageRules, PremiumTable};
pub use service::{MraBand, MraSchedule, ServiceRules};

use std::path::Path;

use crate::error::Result;

/// Container for all projection assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub service: ServiceRules,
    pub accrual: AccrualRules,
    pub coverage: CoverageRules,
    pub household: HouseholdHeuristics,
}

impl Assumptions {
    /// Standard rules with every table in code
    pub fn standard() -> Self {
        Self::default()
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        let loaded = LoadedAssumptions::load_default()?;
        Ok(Self::from_loaded(&loaded))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;
        Ok(Self::from_loaded(&loaded))
    }

    fn from_loaded(loaded: &LoadedAssumptions) -> Self {
        let mut assumptions = Self::standard();
        assumptions.coverage.premiums = loaded.coverage_premiums;
        assumptions.service.mra = MraSchedule::from_loaded(&loaded.mra_bands);
        assumptions
    }
}
