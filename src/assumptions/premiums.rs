//! Health-coverage premium table and Medicare terms

use crate::profile::CoverageTier;

/// Annual base premium (employee share) by coverage tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumTable {
    pub individual: f64,
    pub individual_plus_one: f64,
    pub family: f64,
}

impl Default for PremiumTable {
    fn default() -> Self {
        Self {
            individual: 4_200.0,
            individual_plus_one: 9_600.0,
            family: 11_800.0,
        }
    }
}

impl PremiumTable {
    pub fn base_premium(&self, tier: CoverageTier) -> f64 {
        match tier {
            CoverageTier::Individual => self.individual,
            CoverageTier::IndividualPlusOne => self.individual_plus_one,
            CoverageTier::Family => self.family,
        }
    }

    /// Copy of the table with one tier replaced
    pub fn with_premium(self, tier: CoverageTier, premium: f64) -> Self {
        match tier {
            CoverageTier::Individual => Self { individual: premium, ..self },
            CoverageTier::IndividualPlusOne => Self { individual_plus_one: premium, ..self },
            CoverageTier::Family => Self { family: premium, ..self },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoverageRules {
    pub premiums: PremiumTable,

    /// Age after which the linear age surcharge applies
    pub surcharge_start_age: u32,

    /// Surcharge per year past `surcharge_start_age`
    pub surcharge_per_year: f64,

    /// Creditable years needed to carry coverage into retirement
    pub eligibility_years: f64,

    /// Premium reduction once coverage acts as a Medicare supplement
    pub medicare_supplement_reduction: f64,

    /// Annual Medicare Part B premium
    pub medicare_part_b_premium: f64,
}

impl Default for CoverageRules {
    fn default() -> Self {
        Self {
            premiums: PremiumTable::default(),
            surcharge_start_age: 65,
            surcharge_per_year: 0.01,
            eligibility_years: 5.0,
            medicare_supplement_reduction: 0.25,
            medicare_part_b_premium: 2_000.0,
        }
    }
}
