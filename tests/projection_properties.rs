//! End-to-end properties of the projection engine

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use retirement_projection::profile::samples::sample_scenarios;
use retirement_projection::profile::{
    load_default_profile, Asset, AssetKind, AuxiliaryAccount, AccountKind, BridgeIncome, Debt,
    DebtKind, RetirementPatch, ServicePeriod, SurvivorElection, TierTag,
};
use retirement_projection::projection::Phase;
use retirement_projection::{
    Assumptions, Profile, ProfilePatch, ProjectionConfig, ProjectionEngine,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn engine() -> ProjectionEngine {
    ProjectionEngine::new(Assumptions::standard(), ProjectionConfig::as_of(date(2026, 3, 1)))
}

/// Household with every kind of balance the engine tracks
fn household() -> Profile {
    let mut profile = Profile::new(
        1972,
        vec![
            ServicePeriod::new(date(1991, 6, 1), Some(date(1995, 1, 1))).with_tier(TierTag::TierA),
            ServicePeriod::new(date(1995, 1, 1), None),
        ],
        120_000.0,
    );
    profile.retirement.leave_age = Some(57);
    profile.retirement.claim_age = Some(60);
    profile.retirement.survivor_election = SurvivorElection::CourtOrdered;
    profile.retirement.bridge = Some(BridgeIncome {
        enabled: true,
        annual_income: Some(25_000.0),
        start_age: Some(58),
        end_age: Some(61),
    });
    profile.savings.balance = 300_000.0;
    profile.savings.annual_contribution = 20_000.0;
    profile.auxiliary_accounts = vec![AuxiliaryAccount {
        name: "Roth".to_string(),
        kind: AccountKind::RothIra,
        balance: 80_000.0,
        annual_contribution: Some(7_000.0),
        return_rate: Some(0.07),
    }];
    profile.planning.debts = vec![Debt {
        name: "Mortgage".to_string(),
        kind: DebtKind::Mortgage,
        balance: 150_000.0,
        interest_rate: 0.04,
        minimum_payment: 14_000.0,
        extra_payment: None,
    }];
    profile.planning.assets = vec![Asset {
        name: "House".to_string(),
        kind: AssetKind::Home,
        value: 450_000.0,
        appreciation_rate: Some(0.03),
    }];
    profile.rates.annual_living_expenses = Some(55_000.0);
    profile
}

#[test]
fn test_projection_is_deterministic() {
    let engine = engine();
    let profile = household();

    let first = engine.project(&profile);
    let second = engine.project(&profile);
    assert_eq!(first.years, second.years);
    assert_eq!(first.eligibility, second.eligibility);
    assert_eq!(first.pension, second.pension);
}

#[test]
fn test_projection_does_not_mutate_profile() {
    let profile = household();
    let snapshot = profile.clone();
    let _ = engine().project(&profile);
    assert_eq!(profile, snapshot);
}

#[test]
fn test_bridge_income_inclusive_window() {
    let result = engine().project(&household());

    for row in &result.years {
        if (58..=61).contains(&row.age) {
            assert_eq!(row.bridge_income, 25_000.0, "age {}", row.age);
        } else {
            assert_eq!(row.bridge_income, 0.0, "age {}", row.age);
        }
    }
}

#[test]
fn test_incomplete_bridge_is_disabled() {
    let mut profile = household();
    profile.retirement.bridge = Some(BridgeIncome {
        enabled: true,
        annual_income: Some(25_000.0),
        start_age: Some(58),
        end_age: None,
    });
    let result = engine().project(&profile);
    assert!(result.years.iter().all(|y| y.bridge_income == 0.0));
}

#[test]
fn test_net_worth_identity() {
    let result = engine().project(&household());

    for row in &result.years {
        let expected = row.savings_balance + row.auxiliary_balance + row.total_assets - row.total_debt;
        assert_abs_diff_eq!(row.net_worth, expected, epsilon = 1e-6);
        assert_abs_diff_eq!(
            row.liquid_net_worth,
            row.savings_balance + row.auxiliary_balance - row.total_debt,
            epsilon = 1e-6
        );
    }
}

#[test]
fn test_balances_never_negative() {
    for drawdown in [0.0, 0.04, 0.5, 1.0] {
        let mut profile = household();
        profile.rates.drawdown_rate = Some(drawdown);
        let result = engine().project(&profile);

        for row in &result.years {
            assert!(row.savings_balance >= 0.0);
            assert!(row.total_debt >= 0.0);
        }
    }
}

#[test]
fn test_mortgage_is_paid_off() {
    let result = engine().project(&household());

    let paid_off = result.years.iter().find(|y| y.total_debt == 0.0).unwrap();
    let after: Vec<_> = result.years.iter().filter(|y| y.age > paid_off.age).collect();
    assert!(after.iter().all(|y| y.debt_payments == 0.0));
}

#[test]
fn test_phase_never_goes_backwards() {
    let result = engine().project(&household());
    for pair in result.years.windows(2) {
        assert!(pair[0].phase <= pair[1].phase);
    }
    assert_eq!(result.years[0].phase, Phase::Working);
}

#[test]
fn test_patch_changes_only_what_it_names() {
    let base = household();
    let patch = ProfilePatch {
        retirement: Some(RetirementPatch {
            leave_age: Some(Some(60)),
            ..Default::default()
        }),
        ..Default::default()
    };
    let patched = base.merged(&patch);

    assert_eq!(patched.retirement.leave_age, Some(60));
    assert_eq!(patched.retirement.claim_age, base.retirement.claim_age);
    assert_eq!(patched.savings, base.savings);
    assert_eq!(base.retirement.leave_age, Some(57));

    let engine = engine();
    let before = engine.project(&base);
    let after = engine.project(&patched);
    let working = |r: &retirement_projection::ProjectionResult| {
        r.years.iter().filter(|y| y.phase == Phase::Working).count()
    };
    assert_eq!(working(&after), working(&before) + 3);
}

#[test]
fn test_samples_and_bundled_profile_run() {
    let engine = engine();
    for scenario in sample_scenarios() {
        let result = engine.project(&scenario.profile);
        assert!(!result.years.is_empty(), "{}", scenario.id);
        assert!(result.summary().lifetime_income > 0.0);
    }

    let profile = load_default_profile().unwrap();
    let result = engine.project(&profile);
    assert_eq!(result.years.first().unwrap().age, 52);
    assert_eq!(result.years.last().unwrap().age, 88);
    assert_eq!(result.milestones.len(), 2);
}
