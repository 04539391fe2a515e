//! Service classification and retirement eligibility
//!
//! Turns raw employment intervals into creditable years per pension tier,
//! then answers the eligibility questions that depend on them:
//! - can the employee retire on an immediate annuity today
//! - what is the earliest age they become eligible
//! - can health coverage be carried into retirement

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::coverage::is_coverage_eligible;
use crate::assumptions::{Assumptions, ServiceRules};
use crate::profile::{PensionTier, Profile, ServicePeriod, TierTag};

/// Age at which five years of service earns an unreduced annuity
pub const FULL_BENEFITS_AGE: u32 = 62;
const FULL_BENEFITS_YEARS: f64 = 5.0;

const LONG_SERVICE_AGE: u32 = 60;
const LONG_SERVICE_YEARS: f64 = 20.0;

const MRA_FULL_YEARS: f64 = 30.0;
const MRA_REDUCED_YEARS: f64 = 10.0;

/// Resolve a period's tier from its tag and start date
pub fn resolve_tier(start_date: NaiveDate, tag: TierTag, cutoff: NaiveDate) -> PensionTier {
    match tag {
        TierTag::TierA => PensionTier::TierA,
        TierTag::TierB => PensionTier::TierB,
        TierTag::Auto if start_date < cutoff => PensionTier::TierA,
        TierTag::Auto => PensionTier::TierB,
    }
}

/// Length of a period in fractional service years
pub fn period_years(period: &ServicePeriod, valuation_date: NaiveDate, days_per_year: f64) -> f64 {
    let days = (period.end_or(valuation_date) - period.start_date).num_days();
    (days as f64 / days_per_year).max(0.0)
}

/// Creditable service split by tier
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceSummary {
    /// Tier A years, including any sick-leave credit placed there
    pub tier_a_years: f64,
    /// Tier B years, including any sick-leave credit placed there
    pub tier_b_years: f64,
    pub sick_leave_years: f64,
    pub total_years: f64,
}

impl ServiceSummary {
    pub fn years_in(&self, tier: PensionTier) -> f64 {
        match tier {
            PensionTier::TierA => self.tier_a_years,
            PensionTier::TierB => self.tier_b_years,
        }
    }

    pub fn is_mixed(&self) -> bool {
        self.tier_a_years > 0.0 && self.tier_b_years > 0.0
    }

    /// Tier shown as the career's system; None without any service
    pub fn primary_tier(&self) -> Option<PensionTier> {
        let (a, b) = (self.tier_a_years, self.tier_b_years);
        if b > 0.0 && a == 0.0 {
            Some(PensionTier::TierB)
        } else if a > 0.0 && b == 0.0 {
            Some(PensionTier::TierA)
        } else if b > a {
            Some(PensionTier::TierB)
        } else if a > 0.0 {
            Some(PensionTier::TierA)
        } else {
            None
        }
    }
}

/// Sum service per tier and place the sick-leave credit
///
/// The credit goes to whichever tier already holds more years, tier B on a
/// tie or when there is no service at all.
pub fn classify_service(
    periods: &[ServicePeriod],
    sick_leave_hours: Option<f64>,
    valuation_date: NaiveDate,
    rules: &ServiceRules,
) -> ServiceSummary {
    let mut tier_a_years = 0.0;
    let mut tier_b_years = 0.0;

    for period in periods {
        let years = period_years(period, valuation_date, rules.days_per_year);
        match resolve_tier(period.start_date, period.tier, rules.tier_cutoff) {
            PensionTier::TierA => tier_a_years += years,
            PensionTier::TierB => tier_b_years += years,
        }
    }

    let sick_leave_years = sick_leave_hours
        .filter(|h| *h > 0.0)
        .map(|h| h / rules.sick_leave_hours_per_year)
        .unwrap_or(0.0);

    if tier_a_years > tier_b_years {
        tier_a_years += sick_leave_years;
    } else {
        tier_b_years += sick_leave_years;
    }

    ServiceSummary {
        tier_a_years,
        tier_b_years,
        sick_leave_years,
        total_years: tier_a_years + tier_b_years,
    }
}

/// Immediate-annuity eligibility
pub fn can_retire_immediately(current_age: u32, total_years: f64, mra: u32) -> bool {
    (current_age >= FULL_BENEFITS_AGE && total_years >= FULL_BENEFITS_YEARS)
        || (current_age >= LONG_SERVICE_AGE && total_years >= LONG_SERVICE_YEARS)
        || (current_age >= mra && total_years >= MRA_FULL_YEARS)
        || (current_age >= mra && total_years >= MRA_REDUCED_YEARS)
}

/// Earliest age at which the employee becomes eligible
pub fn earliest_eligible_age(current_age: u32, total_years: f64) -> u32 {
    // The 20-, 30- and 10-year paths all imply five years, so the age-62
    // rule is reached first for every one of them.
    if total_years >= FULL_BENEFITS_YEARS {
        return FULL_BENEFITS_AGE;
    }

    let years_short = FULL_BENEFITS_YEARS - total_years;
    let age_with_five_years = current_age as f64 + years_short;
    age_with_five_years.max(FULL_BENEFITS_AGE as f64).ceil() as u32
}

/// Eligibility snapshot for a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityInfo {
    pub current_age: u32,
    pub minimum_retirement_age: u32,
    pub can_retire_immediately: bool,
    pub earliest_eligible_age: u32,
    pub earliest_eligible_date: NaiveDate,
    pub full_benefits_age: u32,
    pub full_benefits_date: NaiveDate,
    pub coverage_eligible: bool,
    pub total_years_of_service: f64,
    pub service: ServiceSummary,
    pub primary_tier: Option<PensionTier>,
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Compute the eligibility snapshot for a profile
pub fn determine_eligibility(
    profile: &Profile,
    valuation_date: NaiveDate,
    assumptions: &Assumptions,
) -> EligibilityInfo {
    let birth_year = profile.personal.birth_year;
    let current_age = profile.current_age(valuation_date);
    let service = classify_service(
        &profile.employment.service_periods,
        profile.employment.sick_leave_hours,
        valuation_date,
        &assumptions.service,
    );
    let mra = assumptions.service.mra.minimum_retirement_age(birth_year);
    // Sick-leave credit does not move the earliest age
    let worked_years: f64 = profile
        .employment
        .service_periods
        .iter()
        .map(|p| period_years(p, valuation_date, assumptions.service.days_per_year))
        .sum();
    let earliest = earliest_eligible_age(current_age, worked_years);

    EligibilityInfo {
        current_age,
        minimum_retirement_age: mra,
        can_retire_immediately: can_retire_immediately(current_age, service.total_years, mra),
        earliest_eligible_age: earliest,
        earliest_eligible_date: first_of_year(birth_year + earliest as i32),
        full_benefits_age: FULL_BENEFITS_AGE,
        full_benefits_date: first_of_year(birth_year + FULL_BENEFITS_AGE as i32),
        coverage_eligible: is_coverage_eligible(service.total_years, &assumptions.coverage),
        total_years_of_service: service.total_years,
        service,
        primary_tier: service.primary_tier(),
    }
}
