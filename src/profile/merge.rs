//! Partial profile updates
//!
//! A [`ProfilePatch`] carries only the fields a caller wants to change.
//! Merging builds a brand-new [`Profile`] section by section; the base is
//! never modified, so earlier results computed from it stay valid.

use serde::{Deserialize, Deserializer, Serialize};

use super::data::{
    Asset, AuxiliaryAccount, BridgeIncome, CoverageTier, Debt, Dependent, EmploymentInfo,
    HighThreeYears, LifeEvent, Milestone, PersonalInfo, PlanningInfo, Profile, RateAssumptions,
    RetirementChoices, SavingsAccountInfo, ServicePeriod, SpouseInfo, SurvivorElection,
};

/// Keeps an explicit `null` apart from an absent key
///
/// Absent leaves the base value, `null` clears it, anything else replaces it.
fn clearable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalPatch {
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub life_expectancy: Option<Option<u32>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub spouse: Option<Option<SpouseInfo>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmploymentPatch {
    /// Replaces the whole list when present
    #[serde(default)]
    pub service_periods: Option<Vec<ServicePeriod>>,
    #[serde(default)]
    pub current_salary: Option<f64>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub high_average_override: Option<Option<f64>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub high_three_years: Option<Option<HighThreeYears>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub sick_leave_hours: Option<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetirementPatch {
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub leave_age: Option<Option<u32>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub claim_age: Option<Option<u32>>,
    #[serde(default)]
    pub survivor_election: Option<SurvivorElection>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub bridge: Option<Option<BridgeIncome>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub projection_end_age: Option<Option<u32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsPatch {
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub annual_contribution: Option<f64>,
    #[serde(default)]
    pub return_rate: Option<f64>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub employee_contribution_pct: Option<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesPatch {
    #[serde(default)]
    pub inflation: Option<f64>,
    #[serde(default)]
    pub cola: Option<f64>,
    #[serde(default)]
    pub healthcare_inflation: Option<f64>,
    #[serde(default)]
    pub coverage_tier: Option<CoverageTier>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub drawdown_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub annual_living_expenses: Option<Option<f64>>,
}

/// Planning collections are replaced wholesale, never spliced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningPatch {
    #[serde(default)]
    pub dependents: Option<Vec<Dependent>>,
    #[serde(default)]
    pub life_events: Option<Vec<LifeEvent>>,
    #[serde(default)]
    pub milestones: Option<Vec<Milestone>>,
    #[serde(default)]
    pub debts: Option<Vec<Debt>>,
    #[serde(default)]
    pub assets: Option<Vec<Asset>>,
}

/// Partial update to a [`Profile`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub personal: Option<PersonalPatch>,
    #[serde(default)]
    pub employment: Option<EmploymentPatch>,
    #[serde(default)]
    pub retirement: Option<RetirementPatch>,
    #[serde(default)]
    pub savings: Option<SavingsPatch>,
    #[serde(default)]
    pub auxiliary_accounts: Option<Vec<AuxiliaryAccount>>,
    #[serde(default)]
    pub rates: Option<RatesPatch>,
    #[serde(default)]
    pub planning: Option<PlanningPatch>,
}

impl Profile {
    /// New profile with `patch` applied on top of `self`
    pub fn merged(&self, patch: &ProfilePatch) -> Profile {
        merge_profile(self, patch)
    }
}

/// Merge a partial update into a base profile, returning a fresh value
pub fn merge_profile(base: &Profile, patch: &ProfilePatch) -> Profile {
    Profile {
        personal: match &patch.personal {
            Some(p) => merge_personal(&base.personal, p),
            None => base.personal.clone(),
        },
        employment: match &patch.employment {
            Some(p) => merge_employment(&base.employment, p),
            None => base.employment.clone(),
        },
        retirement: match &patch.retirement {
            Some(p) => merge_retirement(&base.retirement, p),
            None => base.retirement.clone(),
        },
        savings: match &patch.savings {
            Some(p) => merge_savings(&base.savings, p),
            None => base.savings.clone(),
        },
        auxiliary_accounts: patch
            .auxiliary_accounts
            .clone()
            .unwrap_or_else(|| base.auxiliary_accounts.clone()),
        rates: match &patch.rates {
            Some(p) => merge_rates(&base.rates, p),
            None => base.rates.clone(),
        },
        planning: match &patch.planning {
            Some(p) => merge_planning(&base.planning, p),
            None => base.planning.clone(),
        },
    }
}

fn replace_or_keep<T: Clone>(patch: &Option<Option<T>>, base: &Option<T>) -> Option<T> {
    match patch {
        Some(value) => value.clone(),
        None => base.clone(),
    }
}

fn merge_personal(base: &PersonalInfo, patch: &PersonalPatch) -> PersonalInfo {
    PersonalInfo {
        birth_year: patch.birth_year.unwrap_or(base.birth_year),
        life_expectancy: replace_or_keep(&patch.life_expectancy, &base.life_expectancy),
        spouse: replace_or_keep(&patch.spouse, &base.spouse),
    }
}

fn merge_employment(base: &EmploymentInfo, patch: &EmploymentPatch) -> EmploymentInfo {
    EmploymentInfo {
        service_periods: patch
            .service_periods
            .clone()
            .unwrap_or_else(|| base.service_periods.clone()),
        current_salary: patch.current_salary.unwrap_or(base.current_salary),
        high_average_override: replace_or_keep(
            &patch.high_average_override,
            &base.high_average_override,
        ),
        high_three_years: replace_or_keep(&patch.high_three_years, &base.high_three_years),
        sick_leave_hours: replace_or_keep(&patch.sick_leave_hours, &base.sick_leave_hours),
    }
}

fn merge_retirement(base: &RetirementChoices, patch: &RetirementPatch) -> RetirementChoices {
    RetirementChoices {
        leave_age: replace_or_keep(&patch.leave_age, &base.leave_age),
        claim_age: replace_or_keep(&patch.claim_age, &base.claim_age),
        survivor_election: patch.survivor_election.unwrap_or(base.survivor_election),
        bridge: replace_or_keep(&patch.bridge, &base.bridge),
        projection_end_age: replace_or_keep(
            &patch.projection_end_age,
            &base.projection_end_age,
        ),
    }
}

fn merge_savings(base: &SavingsAccountInfo, patch: &SavingsPatch) -> SavingsAccountInfo {
    SavingsAccountInfo {
        balance: patch.balance.unwrap_or(base.balance),
        annual_contribution: patch.annual_contribution.unwrap_or(base.annual_contribution),
        return_rate: patch.return_rate.unwrap_or(base.return_rate),
        employee_contribution_pct: replace_or_keep(
            &patch.employee_contribution_pct,
            &base.employee_contribution_pct,
        ),
    }
}

fn merge_rates(base: &RateAssumptions, patch: &RatesPatch) -> RateAssumptions {
    RateAssumptions {
        inflation: patch.inflation.unwrap_or(base.inflation),
        cola: patch.cola.unwrap_or(base.cola),
        healthcare_inflation: patch.healthcare_inflation.unwrap_or(base.healthcare_inflation),
        coverage_tier: patch.coverage_tier.unwrap_or(base.coverage_tier),
        drawdown_rate: replace_or_keep(&patch.drawdown_rate, &base.drawdown_rate),
        annual_living_expenses: replace_or_keep(
            &patch.annual_living_expenses,
            &base.annual_living_expenses,
        ),
    }
}

fn merge_planning(base: &PlanningInfo, patch: &PlanningPatch) -> PlanningInfo {
    PlanningInfo {
        dependents: patch.dependents.clone().unwrap_or_else(|| base.dependents.clone()),
        life_events: patch.life_events.clone().unwrap_or_else(|| base.life_events.clone()),
        milestones: patch.milestones.clone().unwrap_or_else(|| base.milestones.clone()),
        debts: patch.debts.clone().unwrap_or_else(|| base.debts.clone()),
        assets: patch.assets.clone().unwrap_or_else(|| base.assets.clone()),
    }
}
