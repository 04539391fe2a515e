//! Built-in sample scenarios for exploring the engine

use chrono::NaiveDate;

use super::data::{
    CoverageTier, Profile, ServicePeriod, SpouseInfo, SurvivorElection, TierTag,
};
use crate::error::{Error, Result};
use crate::scenario::Scenario;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Joined in 2000, left for the private sector in 2008, returned in 2015
pub fn boomerang_career() -> Scenario {
    let mut profile = Profile::new(
        1980,
        vec![
            ServicePeriod::new(ymd(2000, 1, 1), Some(ymd(2008, 12, 31))).with_tier(TierTag::TierB),
            ServicePeriod::new(ymd(2015, 1, 1), None).with_tier(TierTag::TierB),
        ],
        95_000.0,
    );
    profile.retirement.leave_age = Some(60);
    profile.retirement.claim_age = Some(60);
    profile.savings.balance = 120_000.0;
    profile.savings.annual_contribution = 10_000.0;

    Scenario {
        id: "boomerang-career".to_string(),
        name: "The Boomerang Career".to_string(),
        description: "Service from 2000 to 2008, a private-sector break, then back since 2015."
            .to_string(),
        tags: vec!["service-break".to_string(), "mid-career".to_string()],
        profile,
    }
}

/// Hired in 1988 and weighing retirement at 55 with survivor benefits
pub fn early_retirement() -> Scenario {
    let mut profile = Profile::new(
        1971,
        vec![ServicePeriod::new(ymd(1988, 1, 1), None).with_tier(TierTag::TierB)],
        155_000.0,
    );
    profile.personal.spouse = Some(SpouseInfo {
        birth_year: 1974,
        current_income: None,
        retirement_age: None,
        retirement_income: None,
    });
    profile.retirement.leave_age = Some(55);
    profile.retirement.claim_age = Some(55);
    profile.retirement.survivor_election = SurvivorElection::Standard;
    profile.savings.balance = 650_000.0;
    profile.savings.annual_contribution = 23_000.0;

    Scenario {
        id: "early-retirement".to_string(),
        name: "Early Retirement Dream".to_string(),
        description: "Continuous service since 1988, retiring at 55 with a survivor annuity."
            .to_string(),
        tags: vec![
            "early-retirement".to_string(),
            "long-career".to_string(),
            "survivor-benefits".to_string(),
        ],
        profile,
    }
}

/// Continuous service since 1992, retiring at 62 with healthcare in focus
pub fn long_career_healthcare() -> Scenario {
    let mut profile = Profile::new(
        1963,
        vec![ServicePeriod::new(ymd(1992, 1, 1), None).with_tier(TierTag::TierB)],
        140_000.0,
    );
    profile.retirement.leave_age = Some(62);
    profile.retirement.claim_age = Some(62);
    profile.savings.balance = 520_000.0;
    profile.savings.annual_contribution = 20_000.0;
    profile.rates.coverage_tier = CoverageTier::Individual;

    Scenario {
        id: "long-career-healthcare".to_string(),
        name: "Long Career + Healthcare Focus".to_string(),
        description: "Nearing a traditional retirement age; main concern is health coverage."
            .to_string(),
        tags: vec!["traditional-retirement".to_string(), "healthcare".to_string()],
        profile,
    }
}

/// All built-in scenarios
pub fn sample_scenarios() -> Vec<Scenario> {
    vec![boomerang_career(), early_retirement(), long_career_healthcare()]
}

/// Look up a built-in scenario by id
pub fn sample_scenario(id: &str) -> Result<Scenario> {
    sample_scenarios()
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| Error::UnknownScenario(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_valid() {
        for scenario in sample_scenarios() {
            assert!(scenario.profile.validate().is_ok(), "{} is invalid", scenario.id);
        }
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(sample_scenario("early-retirement").unwrap().profile.personal.birth_year, 1971);
        assert!(matches!(sample_scenario("nope"), Err(Error::UnknownScenario(_))));
    }
}
