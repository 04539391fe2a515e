//! Rough household heuristics
//!
//! Tax and Social Security are deliberately flat approximations. They live
//! here as named values so a finer model can replace them without touching
//! the projection loop.

#[derive(Debug, Clone)]
pub struct HouseholdHeuristics {
    /// Flat effective tax rate on gross income
    pub tax_rate: f64,

    /// Social Security benefit as a fraction of the high-average salary
    pub social_security_fraction: f64,

    pub social_security_claim_age: u32,

    pub default_life_expectancy: u32,

    /// Drawdown rate used when the profile leaves it unset
    pub default_drawdown_rate: f64,

    /// Return for auxiliary accounts without their own assumption
    pub default_account_return: f64,

    pub default_college_start_age: u32,
    pub default_college_years: u32,
}

impl Default for HouseholdHeuristics {
    fn default() -> Self {
        Self {
            tax_rate: 0.15,
            social_security_fraction: 0.30,
            social_security_claim_age: 67,
            default_life_expectancy: 85,
            default_drawdown_rate: 0.04,
            default_account_return: 0.065,
            default_college_start_age: 18,
            default_college_years: 4,
        }
    }
}

impl HouseholdHeuristics {
    /// Annual Social Security estimate at an age
    pub fn social_security(&self, high_average: f64, age: u32) -> f64 {
        if age < self.social_security_claim_age {
            return 0.0;
        }
        (high_average / 12.0) * self.social_security_fraction * 12.0
    }

    pub fn estimated_tax(&self, gross_income: f64) -> f64 {
        gross_income * self.tax_rate
    }
}
