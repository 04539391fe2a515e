//! Year-by-year output records and projection summaries

use serde::{Deserialize, Serialize};

use super::milestones::MilestoneStatus;
use crate::benefits::{EligibilityInfo, PensionBreakdown};

/// Employment phase for a projected age
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Still in primary employment
    Working,
    /// Left employment, pension not yet drawn
    Bridge,
    /// Drawing the pension
    Drawing,
}

impl Phase {
    /// Phase for an age given the leave and claim ages; working takes precedence
    pub fn at_age(age: u32, leave_age: u32, claim_age: u32) -> Self {
        if age < leave_age {
            Phase::Working
        } else if age < claim_age {
            Phase::Bridge
        } else {
            Phase::Drawing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Working => "working",
            Phase::Bridge => "bridge",
            Phase::Drawing => "drawing",
        }
    }
}

/// A single row of projection output for one age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    // Timing
    pub age: u32,
    pub year: i32,
    pub phase: Phase,

    // Income
    pub pension: f64,
    pub savings_distribution: f64,
    pub social_security: f64,
    pub spouse_income: f64,
    pub bridge_income: f64,
    pub total_income: f64,

    // Expenses
    pub coverage_premium: f64,
    pub living_expenses: f64,
    pub education_costs: f64,
    pub life_event_costs: f64,
    pub debt_payments: f64,
    pub total_expenses: f64,
    pub estimated_tax: f64,
    pub net_income: f64,

    // End-of-year position
    pub savings_balance: f64,
    pub auxiliary_balance: f64,
    pub total_debt: f64,
    pub total_assets: f64,
    pub net_worth: f64,
    pub liquid_net_worth: f64,
    pub cumulative_savings: f64,
}

impl ProjectionYear {
    /// Create an empty row for an age
    pub fn new(age: u32, year: i32, phase: Phase) -> Self {
        Self {
            age,
            year,
            phase,
            pension: 0.0,
            savings_distribution: 0.0,
            social_security: 0.0,
            spouse_income: 0.0,
            bridge_income: 0.0,
            total_income: 0.0,
            coverage_premium: 0.0,
            living_expenses: 0.0,
            education_costs: 0.0,
            life_event_costs: 0.0,
            debt_payments: 0.0,
            total_expenses: 0.0,
            estimated_tax: 0.0,
            net_income: 0.0,
            savings_balance: 0.0,
            auxiliary_balance: 0.0,
            total_debt: 0.0,
            total_assets: 0.0,
            net_worth: 0.0,
            liquid_net_worth: 0.0,
            cumulative_savings: 0.0,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Yearly rows from the current age through the end age
    pub years: Vec<ProjectionYear>,

    pub eligibility: EligibilityInfo,

    pub pension: PensionBreakdown,

    /// Advisory milestone outcomes
    pub milestones: Vec<MilestoneStatus>,
}

impl ProjectionResult {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let lifetime_income: f64 = self.years.iter().map(|y| y.total_income).sum();
        let lifetime_expenses: f64 = self.years.iter().map(|y| y.total_expenses).sum();
        let lifetime_tax: f64 = self.years.iter().map(|y| y.estimated_tax).sum();

        let average_annual_income = if self.years.is_empty() {
            0.0
        } else {
            lifetime_income / self.years.len() as f64
        };

        let savings_depletion_age = self
            .years
            .iter()
            .find(|y| y.savings_balance == 0.0)
            .map(|y| y.age);

        let last = self.years.last();

        ProjectionSummary {
            total_years: self.years.len() as u32,
            lifetime_income,
            lifetime_expenses,
            lifetime_tax,
            average_annual_income,
            savings_depletion_age,
            final_savings_balance: last.map(|y| y.savings_balance).unwrap_or(0.0),
            final_net_worth: last.map(|y| y.net_worth).unwrap_or(0.0),
            cumulative_savings: last.map(|y| y.cumulative_savings).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub lifetime_income: f64,
    pub lifetime_expenses: f64,
    pub lifetime_tax: f64,
    pub average_annual_income: f64,
    /// First age at which the reported savings balance is zero
    pub savings_depletion_age: Option<u32>,
    pub final_savings_balance: f64,
    pub final_net_worth: f64,
    pub cumulative_savings: f64,
}
