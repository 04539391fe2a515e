//! Core projection engine for year-by-year retirement projections

use chrono::NaiveDate;
use log::{debug, warn};

use super::cashflows::{Phase, ProjectionResult, ProjectionYear};
use super::milestones::evaluate_milestones;
use super::state::ProjectionState;
use crate::assumptions::Assumptions;
use crate::benefits::{
    determine_eligibility, employer_match, high_average, CoverageCalculator, EligibilityInfo,
    PensionBreakdown, PensionCalculator, ServiceSummary,
};
use crate::profile::{Dependent, Profile};

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Anchors the current age and the end of ongoing service periods
    pub valuation_date: NaiveDate,
}

impl ProjectionConfig {
    pub fn as_of(valuation_date: NaiveDate) -> Self {
        Self { valuation_date }
    }
}

/// Ages that drive the phase machine, after defaults are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAges {
    pub current_age: u32,
    pub leave_age: u32,
    pub claim_age: u32,
    pub end_age: u32,
}

/// Main projection engine
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Eligibility snapshot at the valuation date
    pub fn eligibility(&self, profile: &Profile) -> EligibilityInfo {
        determine_eligibility(profile, self.config.valuation_date, &self.assumptions)
    }

    /// Pension snapshot at the valuation date
    pub fn pension_breakdown(&self, profile: &Profile) -> PensionBreakdown {
        let eligibility = self.eligibility(profile);
        self.breakdown_for(profile, &eligibility.service)
    }

    fn breakdown_for(&self, profile: &Profile, service: &ServiceSummary) -> PensionBreakdown {
        PensionCalculator::new(&self.assumptions.accrual).calculate(
            service,
            high_average(&profile.employment),
            profile.retirement.survivor_election,
        )
    }

    /// Apply the leave, claim and end age defaults
    pub fn resolve_ages(&self, profile: &Profile, eligibility: &EligibilityInfo) -> ResolvedAges {
        let retirement = &profile.retirement;

        let leave_age = match retirement.leave_age {
            Some(age) => age,
            None => {
                warn!(
                    "No leave age given; using earliest eligible age {}",
                    eligibility.earliest_eligible_age
                );
                eligibility.earliest_eligible_age
            }
        };
        let claim_age = retirement.claim_age.unwrap_or(leave_age);
        let end_age = retirement
            .projection_end_age
            .or(profile.personal.life_expectancy)
            .unwrap_or(self.assumptions.household.default_life_expectancy);

        ResolvedAges {
            current_age: eligibility.current_age,
            leave_age,
            claim_age,
            end_age,
        }
    }

    /// Run the full projection for a profile
    ///
    /// Every call rebuilds all rows from the current age; the profile is
    /// never modified.
    pub fn project(&self, profile: &Profile) -> ProjectionResult {
        let eligibility = self.eligibility(profile);
        let pension = self.breakdown_for(profile, &eligibility.service);
        let ages = self.resolve_ages(profile, &eligibility);

        debug!(
            "Projecting ages {}..={} (leave {}, claim {}), {:.2} years of service",
            ages.current_age, ages.end_age, ages.leave_age, ages.claim_age, eligibility.total_years_of_service
        );

        let mut state = ProjectionState::from_profile(
            profile,
            ages.current_age,
            self.assumptions.household.default_account_return,
        );
        let mut years = Vec::new();

        for age in ages.current_age..=ages.end_age {
            if age > ages.current_age {
                state.advance_year();
            }
            let row = self.calculate_year(profile, &ages, &eligibility, &pension, &mut state);
            years.push(row);
        }

        let milestones = evaluate_milestones(&profile.planning.milestones, &years);

        ProjectionResult {
            years,
            eligibility,
            pension,
            milestones,
        }
    }

    /// Calculate one projected year and advance the running balances
    fn calculate_year(
        &self,
        profile: &Profile,
        ages: &ResolvedAges,
        eligibility: &EligibilityInfo,
        pension: &PensionBreakdown,
        state: &mut ProjectionState,
    ) -> ProjectionYear {
        let household = &self.assumptions.household;
        let rates = &profile.rates;
        let age = state.age;
        let phase = Phase::at_age(age, ages.leave_age, ages.claim_age);
        let working = phase == Phase::Working;

        let mut row = ProjectionYear::new(age, state.calendar_year, phase);

        // Primary savings account
        if working {
            state.savings.contribute_and_grow(self.working_contribution(profile));
        } else {
            let drawdown = rates.drawdown_rate.unwrap_or(household.default_drawdown_rate);
            row.savings_distribution = state.savings.draw_down(drawdown);
        }

        if phase == Phase::Drawing {
            row.pension = pension.with_cola(rates.cola, age.saturating_sub(ages.claim_age));
        }

        if !working && eligibility.coverage_eligible {
            row.coverage_premium = CoverageCalculator::new(&self.assumptions.coverage).annual_premium(
                rates.coverage_tier,
                rates.healthcare_inflation,
                age.saturating_sub(ages.leave_age),
                age,
            );
        }

        if !working {
            if let Some(expenses) = rates.annual_living_expenses {
                let years_out = age.saturating_sub(ages.current_age) as i32;
                row.living_expenses = expenses * (1.0 + rates.inflation).powi(years_out);
            }
        }

        row.social_security = household.social_security(pension.high_average, age);
        row.spouse_income = profile
            .personal
            .spouse
            .as_ref()
            .map(|spouse| spouse.income_in_year(state.calendar_year))
            .unwrap_or(0.0);
        row.bridge_income = profile
            .retirement
            .bridge
            .as_ref()
            .map(|bridge| bridge.income_at(age))
            .unwrap_or(0.0);

        state.grow_auxiliary(working);

        row.education_costs = profile
            .planning
            .dependents
            .iter()
            .map(|d| self.education_cost(d, state.calendar_year))
            .sum();
        row.life_event_costs = profile
            .planning
            .life_events
            .iter()
            .map(|e| e.cost_in_year(state.calendar_year))
            .sum();
        row.debt_payments = state.service_debts(&profile.planning.debts).payment;
        state.appreciate_assets(profile);

        // Totals
        row.total_income = row.pension
            + row.savings_distribution
            + row.social_security
            + row.spouse_income
            + row.bridge_income;
        row.total_expenses = row.coverage_premium
            + row.living_expenses
            + row.education_costs
            + row.life_event_costs
            + row.debt_payments;
        row.estimated_tax = household.estimated_tax(row.total_income);
        row.net_income = row.total_income - row.total_expenses - row.estimated_tax;

        state.cumulative_savings += row.net_income;

        // End-of-year position
        row.savings_balance = state.savings.reported_balance();
        row.auxiliary_balance = state.auxiliary_balance;
        row.total_debt = state.total_debt();
        row.total_assets = state.total_assets();
        row.net_worth = state.total_accounts() + row.total_assets - row.total_debt;
        row.liquid_net_worth = state.total_accounts() - row.total_debt;
        row.cumulative_savings = state.cumulative_savings;

        row
    }

    /// Contribution to the primary account in a working year, employer match included
    fn working_contribution(&self, profile: &Profile) -> f64 {
        let savings = &profile.savings;
        let matched = savings
            .employee_contribution_pct
            .map(|pct| employer_match(profile.employment.current_salary, pct))
            .unwrap_or(0.0);
        savings.annual_contribution + matched
    }

    /// College cost for a dependent in a calendar year
    fn education_cost(&self, dependent: &Dependent, calendar_year: i32) -> f64 {
        let household = &self.assumptions.household;
        let start = dependent
            .college_start_age
            .unwrap_or(household.default_college_start_age) as i32;
        let years = dependent
            .college_years
            .unwrap_or(household.default_college_years) as i32;
        let dependent_age = calendar_year - dependent.birth_year;

        if dependent_age >= start && dependent_age < start + years {
            dependent.annual_college_cost.unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{BridgeIncome, ServicePeriod, SurvivorElection};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(Assumptions::standard(), ProjectionConfig::as_of(date(2026, 1, 1)))
    }

    /// Born 1970, tier B since 1996, salary 90,000
    fn test_profile() -> Profile {
        let mut profile = Profile::new(
            1970,
            vec![ServicePeriod::new(date(1996, 1, 1), None)],
            90_000.0,
        );
        profile.retirement.leave_age = Some(60);
        profile.retirement.claim_age = Some(62);
        profile.personal.life_expectancy = Some(80);
        profile.savings.balance = 200_000.0;
        profile.savings.annual_contribution = 10_000.0;
        profile.savings.return_rate = 0.05;
        profile
    }

    #[test]
    fn test_projection_covers_current_age_to_end_age() {
        let result = engine().project(&test_profile());

        assert_eq!(result.years.first().unwrap().age, 56);
        assert_eq!(result.years.first().unwrap().year, 2026);
        assert_eq!(result.years.last().unwrap().age, 80);
        assert_eq!(result.years.len(), 25);
    }

    #[test]
    fn test_phases_follow_leave_and_claim_ages() {
        let result = engine().project(&test_profile());

        for row in &result.years {
            let expected = if row.age < 60 {
                Phase::Working
            } else if row.age < 62 {
                Phase::Bridge
            } else {
                Phase::Drawing
            };
            assert_eq!(row.phase, expected, "age {}", row.age);
            assert_eq!(row.pension > 0.0, row.phase == Phase::Drawing);
            assert_eq!(row.coverage_premium > 0.0, row.phase != Phase::Working);
            assert_eq!(row.savings_distribution > 0.0, row.phase != Phase::Working);
        }
    }

    #[test]
    fn test_pension_escalates_from_claim_age() {
        let profile = test_profile();
        let result = engine().project(&profile);
        let base = result.pension.annual_pension;

        let at_claim = result.years.iter().find(|y| y.age == 62).unwrap();
        let two_later = result.years.iter().find(|y| y.age == 64).unwrap();
        assert_relative_eq!(at_claim.pension, base);
        assert_relative_eq!(two_later.pension, base * 1.025 * 1.025, epsilon = 1e-9);
    }

    #[test]
    fn test_accumulation_then_drawdown() {
        let result = engine().project(&test_profile());

        let first = &result.years[0];
        assert_relative_eq!(first.savings_balance, 210_000.0 * 1.05, epsilon = 1e-9);

        let leave = result.years.iter().find(|y| y.age == 60).unwrap();
        let prior = result.years.iter().find(|y| y.age == 59).unwrap();
        assert_relative_eq!(leave.savings_distribution, prior.savings_balance * 0.04, epsilon = 1e-9);
        assert_relative_eq!(
            leave.savings_balance,
            prior.savings_balance * 0.96 * 1.05,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_employer_match_added_while_working() {
        let mut profile = test_profile();
        profile.savings.employee_contribution_pct = Some(0.05);
        let result = engine().project(&profile);

        // 10,000 own contribution plus 5% of 90,000
        assert_relative_eq!(result.years[0].savings_balance, (200_000.0 + 14_500.0) * 1.05, epsilon = 1e-9);
    }

    #[test]
    fn test_default_ages() {
        let mut profile = test_profile();
        profile.retirement.leave_age = None;
        profile.retirement.claim_age = None;
        profile.personal.life_expectancy = None;

        let engine = engine();
        let eligibility = engine.eligibility(&profile);
        let ages = engine.resolve_ages(&profile, &eligibility);
        assert_eq!(ages.leave_age, 62);
        assert_eq!(ages.claim_age, 62);
        assert_eq!(ages.end_age, 85);

        profile.retirement.projection_end_age = Some(90);
        profile.personal.life_expectancy = Some(88);
        assert_eq!(engine.resolve_ages(&profile, &eligibility).end_age, 90);
    }

    #[test]
    fn test_income_and_net_identity() {
        let mut profile = test_profile();
        profile.retirement.survivor_election = SurvivorElection::Standard;
        profile.retirement.bridge = Some(BridgeIncome {
            enabled: true,
            annual_income: Some(20_000.0),
            start_age: Some(60),
            end_age: Some(61),
        });
        profile.rates.annual_living_expenses = Some(40_000.0);
        let result = engine().project(&profile);

        for row in &result.years {
            let income = row.pension + row.savings_distribution + row.social_security + row.spouse_income + row.bridge_income;
            assert_abs_diff_eq!(row.total_income, income, epsilon = 1e-9);
            assert_abs_diff_eq!(row.estimated_tax, income * 0.15, epsilon = 1e-9);
            assert_abs_diff_eq!(
                row.net_income,
                row.total_income - row.total_expenses - row.estimated_tax,
                epsilon = 1e-9
            );
            if row.phase == Phase::Working {
                assert_eq!(row.living_expenses, 0.0);
            }
        }

        let cumulative: f64 = result.years.iter().map(|y| y.net_income).sum();
        assert_abs_diff_eq!(result.years.last().unwrap().cumulative_savings, cumulative, epsilon = 1e-6);
    }

    #[test]
    fn test_social_security_from_67() {
        let result = engine().project(&test_profile());
        for row in &result.years {
            if row.age < 67 {
                assert_eq!(row.social_security, 0.0);
            } else {
                assert_relative_eq!(row.social_security, 27_000.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_no_coverage_without_five_years() {
        let mut profile = test_profile();
        profile.employment.service_periods = vec![ServicePeriod::new(date(2023, 1, 1), None)];
        let result = engine().project(&profile);

        assert!(!result.eligibility.coverage_eligible);
        assert!(result.years.iter().all(|y| y.coverage_premium == 0.0));
    }

    #[test]
    fn test_end_age_before_current_age_is_empty() {
        let mut profile = test_profile();
        profile.retirement.projection_end_age = Some(50);
        let result = engine().project(&profile);

        assert!(result.years.is_empty());
        assert_eq!(result.summary().total_years, 0);
    }

    #[test]
    fn test_education_window() {
        let mut profile = test_profile();
        profile.planning.dependents = vec![Dependent {
            name: "Alex".to_string(),
            birth_year: 2010,
            college_start_age: None,
            college_years: None,
            annual_college_cost: Some(25_000.0),
        }];
        let result = engine().project(&profile);

        for row in &result.years {
            let in_college = (2028..2032).contains(&row.year);
            assert_eq!(row.education_costs > 0.0, in_college, "year {}", row.year);
        }
    }
}
