//! Pension accrual rates and survivor-annuity terms

use crate::profile::SurvivorElection;

/// One band of a graduated accrual schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualBand {
    /// Years of service covered by the band (None = all remaining years)
    pub years: Option<f64>,
    pub rate: f64,
}

/// Reduction applied to the retiree's own benefit per survivor election
#[derive(Debug, Clone, Copy)]
pub struct SurvivorReductions {
    pub standard: f64,
    /// Same as standard today; kept separate so it can diverge
    pub court_ordered: f64,
}

impl Default for SurvivorReductions {
    fn default() -> Self {
        Self {
            standard: 0.10,
            court_ordered: 0.10,
        }
    }
}

impl SurvivorReductions {
    pub fn for_election(&self, election: SurvivorElection) -> f64 {
        match election {
            SurvivorElection::None => 0.0,
            SurvivorElection::Standard => self.standard,
            SurvivorElection::CourtOrdered => self.court_ordered,
        }
    }
}

/// Accrual formulas for both pension tiers
#[derive(Debug, Clone)]
pub struct AccrualRules {
    /// Flat tier B rate per year of service
    pub tier_b_rate: f64,

    /// Graduated tier A bands, applied in order to years in tier A
    pub tier_a_bands: Vec<AccrualBand>,

    pub survivor_reductions: SurvivorReductions,

    /// Share of the unreduced benefit paid to a survivor
    pub survivor_share: f64,
}

impl Default for AccrualRules {
    fn default() -> Self {
        Self {
            tier_b_rate: 0.01,
            tier_a_bands: vec![
                AccrualBand { years: Some(5.0), rate: 0.015 },
                AccrualBand { years: Some(5.0), rate: 0.0175 },
                AccrualBand { years: None, rate: 0.02 },
            ],
            survivor_reductions: SurvivorReductions::default(),
            survivor_share: 0.5,
        }
    }
}
