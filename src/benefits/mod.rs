//! Benefit calculators: service eligibility, pension, savings and coverage

pub mod coverage;
pub mod eligibility;
pub mod pension;
pub mod savings;

pub use coverage::{is_coverage_eligible, CoverageCalculator, PremiumYear};
pub use eligibility::{
    can_retire_immediately, classify_service, determine_eligibility, earliest_eligible_age,
    resolve_tier, EligibilityInfo, ServiceSummary, FULL_BENEFITS_AGE,
};
pub use pension::{high_average, PensionBreakdown, PensionCalculator};
pub use savings::{
    balance_at_leave, employer_match, project_drawdown, sustainable_withdrawal, SavingsAccount,
};
