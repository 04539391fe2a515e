//! Retiree health-coverage premiums

use serde::{Deserialize, Serialize};

use crate::assumptions::CoverageRules;
use crate::profile::CoverageTier;

/// Whether a career carries health coverage into retirement
pub fn is_coverage_eligible(total_years: f64, rules: &CoverageRules) -> bool {
    total_years >= rules.eligibility_years
}

/// Premium owed at one age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumYear {
    pub age: u32,
    pub premium: f64,
}

pub struct CoverageCalculator<'a> {
    rules: &'a CoverageRules,
}

impl<'a> CoverageCalculator<'a> {
    pub fn new(rules: &'a CoverageRules) -> Self {
        Self { rules }
    }

    /// Annual premium at an age
    ///
    /// The tier's base premium inflates at the healthcare rate from the
    /// start of retiree coverage. Past the surcharge age a linear age
    /// surcharge is applied on top.
    pub fn annual_premium(
        &self,
        tier: CoverageTier,
        healthcare_inflation: f64,
        years_since_start: u32,
        age: u32,
    ) -> f64 {
        let base = self.rules.premiums.base_premium(tier);
        let inflated = base * (1.0 + healthcare_inflation).powi(years_since_start as i32);

        if age > self.rules.surcharge_start_age {
            let years_over = (age - self.rules.surcharge_start_age) as f64;
            inflated * (1.0 + self.rules.surcharge_per_year * years_over)
        } else {
            inflated
        }
    }

    /// Estimated net annual saving once Medicare becomes primary (may be negative)
    pub fn medicare_offset(&self, premium: f64) -> f64 {
        premium * self.rules.medicare_supplement_reduction - self.rules.medicare_part_b_premium
    }

    /// Premiums for each age from `start_age` through `end_age`
    pub fn project_premiums(
        &self,
        tier: CoverageTier,
        healthcare_inflation: f64,
        start_age: u32,
        end_age: u32,
    ) -> Vec<PremiumYear> {
        (start_age..=end_age)
            .map(|age| PremiumYear {
                age,
                premium: self.annual_premium(tier, healthcare_inflation, age - start_age, age),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eligibility_threshold() {
        let rules = CoverageRules::default();
        assert!(is_coverage_eligible(5.0, &rules));
        assert!(!is_coverage_eligible(4.999, &rules));
    }

    #[test]
    fn test_base_premium_by_tier() {
        let rules = CoverageRules::default();
        let calc = CoverageCalculator::new(&rules);

        assert_relative_eq!(calc.annual_premium(CoverageTier::Individual, 0.05, 0, 60), 4_200.0);
        assert_relative_eq!(calc.annual_premium(CoverageTier::IndividualPlusOne, 0.05, 0, 60), 9_600.0);
        assert_relative_eq!(calc.annual_premium(CoverageTier::Family, 0.05, 0, 60), 11_800.0);
    }

    #[test]
    fn test_healthcare_inflation_compounds() {
        let rules = CoverageRules::default();
        let calc = CoverageCalculator::new(&rules);

        let premium = calc.annual_premium(CoverageTier::Individual, 0.05, 2, 62);
        assert_relative_eq!(premium, 4_200.0 * 1.1025, epsilon = 1e-9);
    }

    #[test]
    fn test_age_surcharge_after_65() {
        let rules = CoverageRules::default();
        let calc = CoverageCalculator::new(&rules);

        assert_relative_eq!(calc.annual_premium(CoverageTier::Individual, 0.0, 0, 65), 4_200.0);
        assert_relative_eq!(
            calc.annual_premium(CoverageTier::Individual, 0.0, 0, 70),
            4_200.0 * 1.05,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_medicare_offset_can_be_negative() {
        let rules = CoverageRules::default();
        let calc = CoverageCalculator::new(&rules);

        assert_relative_eq!(calc.medicare_offset(12_000.0), 1_000.0);
        assert_relative_eq!(calc.medicare_offset(4_000.0), -1_000.0);
    }

    #[test]
    fn test_project_premiums() {
        let rules = CoverageRules::default();
        let calc = CoverageCalculator::new(&rules);

        let path = calc.project_premiums(CoverageTier::Family, 0.05, 60, 64);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0].age, 60);
        assert_relative_eq!(path[0].premium, 11_800.0);
        assert_relative_eq!(path[4].premium, 11_800.0 * 1.05f64.powi(4), epsilon = 1e-9);
    }
}
