//! Defined-benefit pension formulas
//!
//! Tier B accrues at a flat rate per year. Tier A accrues through graduated
//! bands applied to years in tier A only. Mixed careers compute each tier
//! against the same high-average salary and sum before any survivor
//! reduction.

use serde::{Deserialize, Serialize};

use super::eligibility::ServiceSummary;
use crate::assumptions::AccrualRules;
use crate::profile::{EmploymentInfo, SurvivorElection};

/// Salary base for the pension formula
///
/// A positive explicit override wins, then the mean of three supplied high
/// years, then the current or last salary.
pub fn high_average(employment: &EmploymentInfo) -> f64 {
    if let Some(value) = employment.high_average_override.filter(|v| *v > 0.0) {
        return value;
    }
    if let Some(years) = &employment.high_three_years {
        return years.average();
    }
    employment.current_salary
}

/// Pension snapshot for a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PensionBreakdown {
    pub high_average: f64,
    pub years_of_service: f64,
    pub tier_a_benefit: f64,
    pub tier_b_benefit: f64,
    /// Effective accrual rate per year of service
    pub accrual_rate: f64,
    pub survivor_reduction: f64,
    /// Annual benefit after any survivor reduction, before COLA
    pub annual_pension: f64,
    pub monthly_pension: f64,
    pub survivor_benefit: f64,
}

impl PensionBreakdown {
    /// Annual benefit after `years_since_claim` years of cost-of-living increases
    pub fn with_cola(&self, cola: f64, years_since_claim: u32) -> f64 {
        self.annual_pension * (1.0 + cola).powi(years_since_claim as i32)
    }
}

/// Calculator for pension amounts
pub struct PensionCalculator<'a> {
    rules: &'a AccrualRules,
}

impl<'a> PensionCalculator<'a> {
    pub fn new(rules: &'a AccrualRules) -> Self {
        Self { rules }
    }

    /// Flat-rate tier B benefit
    pub fn tier_b_benefit(&self, high_average: f64, years: f64) -> f64 {
        high_average * self.rules.tier_b_rate * years
    }

    /// Graduated tier A benefit
    pub fn tier_a_benefit(&self, high_average: f64, years: f64) -> f64 {
        let mut remaining = years.max(0.0);
        let mut benefit = 0.0;

        for band in &self.rules.tier_a_bands {
            if remaining <= 0.0 {
                break;
            }
            let in_band = match band.years {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            benefit += high_average * band.rate * in_band;
            remaining -= in_band;
        }

        benefit
    }

    /// Benefit a survivor would receive after the retiree's death
    pub fn survivor_benefit(&self, reduced_benefit: f64, election: SurvivorElection) -> f64 {
        if !election.is_elected() {
            return 0.0;
        }
        let reduction = self.rules.survivor_reductions.for_election(election);
        (reduced_benefit / (1.0 - reduction)) * self.rules.survivor_share
    }

    /// Full breakdown for a service summary and salary base
    pub fn calculate(
        &self,
        service: &ServiceSummary,
        high_average: f64,
        election: SurvivorElection,
    ) -> PensionBreakdown {
        let tier_a_benefit = self.tier_a_benefit(high_average, service.tier_a_years);
        let tier_b_benefit = self.tier_b_benefit(high_average, service.tier_b_years);
        let total = tier_a_benefit + tier_b_benefit;

        let accrual_rate = if service.is_mixed() {
            safe_ratio(total, high_average * service.total_years)
        } else if service.tier_a_years > 0.0 {
            safe_ratio(total, high_average * service.tier_a_years)
        } else {
            self.rules.tier_b_rate
        };

        let survivor_reduction = self.rules.survivor_reductions.for_election(election);
        let annual_pension = total * (1.0 - survivor_reduction);

        PensionBreakdown {
            high_average,
            years_of_service: service.total_years,
            tier_a_benefit,
            tier_b_benefit,
            accrual_rate,
            survivor_reduction,
            annual_pension,
            monthly_pension: annual_pension / 12.0,
            survivor_benefit: self.survivor_benefit(annual_pension, election),
        }
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
