//! Profile data structures matching the planner input format

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default return assumption for the primary savings account
fn default_savings_return() -> f64 {
    0.065
}

/// Pension tier tag carried on a service period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierTag {
    /// Older graduated-accrual system
    TierA,
    /// Modern flat-accrual system
    TierB,
    /// Classify from the period's start date
    #[default]
    Auto,
}

/// Resolved pension tier of a service period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionTier {
    TierA,
    TierB,
}

/// Survivor-annuity election
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurvivorElection {
    #[default]
    None,
    Standard,
    CourtOrdered,
}

impl SurvivorElection {
    pub fn is_elected(&self) -> bool {
        !matches!(self, SurvivorElection::None)
    }
}

/// Household composition for health-coverage premiums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    #[default]
    Individual,
    IndividualPlusOne,
    Family,
}

impl CoverageTier {
    /// Parse the table label used in assumption files
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "individual" => Some(CoverageTier::Individual),
            "individual_plus_one" => Some(CoverageTier::IndividualPlusOne),
            "family" => Some(CoverageTier::Family),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::Individual => "individual",
            CoverageTier::IndividualPlusOne => "individual_plus_one",
            CoverageTier::Family => "family",
        }
    }
}

/// One continuous stretch of creditable employment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePeriod {
    pub start_date: NaiveDate,

    /// Absent while the period is ongoing
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub tier: TierTag,

    /// Mirrors a missing end date
    #[serde(default)]
    pub active: bool,
}

impl ServicePeriod {
    /// Create an auto-classified period
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            tier: TierTag::Auto,
            active: end_date.is_none(),
        }
    }

    /// Same period with an explicit tier tag
    pub fn with_tier(mut self, tier: TierTag) -> Self {
        self.tier = tier;
        self
    }

    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// End of the interval, using the valuation date for ongoing periods
    pub fn end_or(&self, valuation_date: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(valuation_date)
    }
}

/// Spouse sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpouseInfo {
    pub birth_year: i32,

    /// Annual income while working
    #[serde(default)]
    pub current_income: Option<f64>,

    #[serde(default)]
    pub retirement_age: Option<u32>,

    /// Annual income once retired (pension, Social Security, etc.)
    #[serde(default)]
    pub retirement_income: Option<f64>,
}

impl SpouseInfo {
    /// Spouse income in a calendar year
    ///
    /// Switches from current to retirement income once the spouse reaches
    /// their own retirement age. Without a retirement age the spouse keeps
    /// working for the whole projection.
    pub fn income_in_year(&self, calendar_year: i32) -> f64 {
        let spouse_age = calendar_year - self.birth_year;
        match self.retirement_age {
            Some(retirement_age) if spouse_age >= retirement_age as i32 => {
                self.retirement_income.unwrap_or(0.0)
            }
            _ => self.current_income.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub birth_year: i32,

    #[serde(default)]
    pub life_expectancy: Option<u32>,

    #[serde(default)]
    pub spouse: Option<SpouseInfo>,
}

/// Three explicitly supplied high-salary years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighThreeYears {
    pub year1: f64,
    pub year2: f64,
    pub year3: f64,
}

impl HighThreeYears {
    pub fn average(&self) -> f64 {
        (self.year1 + self.year2 + self.year3) / 3.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentInfo {
    pub service_periods: Vec<ServicePeriod>,

    /// Current or last annual salary
    pub current_salary: f64,

    #[serde(default)]
    pub high_average_override: Option<f64>,

    #[serde(default)]
    pub high_three_years: Option<HighThreeYears>,

    /// Unused sick-leave hours (converted to service time)
    #[serde(default)]
    pub sick_leave_hours: Option<f64>,
}

/// Part-time income between leaving employment and drawing benefits
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BridgeIncome {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub annual_income: Option<f64>,

    #[serde(default)]
    pub start_age: Option<u32>,

    #[serde(default)]
    pub end_age: Option<u32>,
}

impl BridgeIncome {
    /// Fully configured window as (start, end, amount)
    ///
    /// Any missing field disables bridge income entirely.
    pub fn window(&self) -> Option<(u32, u32, f64)> {
        if !self.enabled {
            return None;
        }
        match (self.start_age, self.end_age, self.annual_income) {
            (Some(start), Some(end), Some(amount)) if amount != 0.0 => Some((start, end, amount)),
            _ => None,
        }
    }

    /// Bridge income at an age; the window is inclusive at both ends
    pub fn income_at(&self, age: u32) -> f64 {
        match self.window() {
            Some((start, end, amount)) if age >= start && age <= end => amount,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RetirementChoices {
    /// Age when leaving primary employment
    #[serde(default)]
    pub leave_age: Option<u32>,

    /// Age when the pension starts; never before `leave_age`
    #[serde(default)]
    pub claim_age: Option<u32>,

    #[serde(default)]
    pub survivor_election: SurvivorElection,

    #[serde(default)]
    pub bridge: Option<BridgeIncome>,

    #[serde(default)]
    pub projection_end_age: Option<u32>,
}

/// Primary defined-contribution account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccountInfo {
    pub balance: f64,

    #[serde(default)]
    pub annual_contribution: f64,

    #[serde(default = "default_savings_return")]
    pub return_rate: f64,

    /// Employee contribution as a fraction of salary; enables the employer match
    #[serde(default)]
    pub employee_contribution_pct: Option<f64>,
}

impl Default for SavingsAccountInfo {
    fn default() -> Self {
        Self {
            balance: 0.0,
            annual_contribution: 0.0,
            return_rate: default_savings_return(),
            employee_contribution_pct: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    TraditionalIra,
    RothIra,
    EmployerPlan,
    Brokerage,
    Savings,
    RealEstate,
    #[default]
    Other,
}

/// Any account other than the primary savings plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryAccount {
    pub name: String,

    #[serde(default)]
    pub kind: AccountKind,

    pub balance: f64,

    #[serde(default)]
    pub annual_contribution: Option<f64>,

    #[serde(default)]
    pub return_rate: Option<f64>,
}

/// Economic and household assumption rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateAssumptions {
    pub inflation: f64,

    /// Pension cost-of-living adjustment
    pub cola: f64,

    pub healthcare_inflation: f64,

    #[serde(default)]
    pub coverage_tier: CoverageTier,

    /// Fraction of the savings balance withdrawn each retired year
    #[serde(default)]
    pub drawdown_rate: Option<f64>,

    /// Living expenses once out of primary employment, in today's money
    #[serde(default)]
    pub annual_living_expenses: Option<f64>,
}

impl Default for RateAssumptions {
    fn default() -> Self {
        Self {
            inflation: 0.035,
            cola: 0.025,
            healthcare_inflation: 0.05,
            coverage_tier: CoverageTier::Individual,
            drawdown_rate: Some(0.04),
            annual_living_expenses: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependent {
    pub name: String,
    pub birth_year: i32,

    #[serde(default)]
    pub college_start_age: Option<u32>,

    #[serde(default)]
    pub college_years: Option<u32>,

    #[serde(default)]
    pub annual_college_cost: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventKind {
    ChildBirth,
    ChildCollege,
    HomePurchase,
    CarPurchase,
    MajorExpense,
    IncomeChange,
    #[default]
    Other,
}

/// Dated cash flow; positive amounts are costs, negative amounts are inflows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub name: String,

    #[serde(default)]
    pub kind: LifeEventKind,

    /// Calendar year of the event (first year when recurring)
    pub year: i32,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub recurring: bool,

    /// Years the event repeats when recurring
    #[serde(default)]
    pub duration: Option<u32>,
}

impl LifeEvent {
    /// Amount charged in a calendar year
    pub fn cost_in_year(&self, calendar_year: i32) -> f64 {
        let amount = self.amount.unwrap_or(0.0);
        let active = if self.recurring {
            let duration = self.duration.unwrap_or(1) as i32;
            calendar_year >= self.year && calendar_year < self.year + duration
        } else {
            calendar_year == self.year
        };
        if active {
            amount
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Retirement,
    SpouseRetirement,
    FinancialIndependence,
    DebtFree,
    NetWorthTarget,
    AgeTarget,
    LeaveWithoutPay,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneCriteria {
    ReachAge,
    ReachMilestone,
    NetWorthAbove,
    LiquidNetWorthAbove,
    TotalDebtBelow,
}

/// Advisory planning target; never feeds back into the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub kind: MilestoneKind,

    pub criteria: MilestoneCriteria,

    #[serde(default)]
    pub target_value: Option<f64>,

    /// Id of another milestone this one waits on
    #[serde(default)]
    pub linked_milestone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    Mortgage,
    StudentLoan,
    CarLoan,
    CreditCard,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,

    #[serde(default)]
    pub kind: DebtKind,

    pub balance: f64,

    /// Annual interest rate
    pub interest_rate: f64,

    /// Annual minimum payment
    pub minimum_payment: f64,

    #[serde(default)]
    pub extra_payment: Option<f64>,
}

impl Debt {
    /// Scheduled annual payment (minimum plus any extra)
    pub fn scheduled_payment(&self) -> f64 {
        self.minimum_payment + self.extra_payment.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Home,
    Car,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,

    #[serde(default)]
    pub kind: AssetKind,

    pub value: f64,

    /// Annual appreciation (negative for depreciating assets)
    #[serde(default)]
    pub appreciation_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanningInfo {
    #[serde(default)]
    pub dependents: Vec<Dependent>,

    #[serde(default)]
    pub life_events: Vec<LifeEvent>,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    #[serde(default)]
    pub debts: Vec<Debt>,

    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Complete planner input; the engine only ever reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub personal: PersonalInfo,
    pub employment: EmploymentInfo,

    #[serde(default)]
    pub retirement: RetirementChoices,

    #[serde(default)]
    pub savings: SavingsAccountInfo,

    #[serde(default)]
    pub auxiliary_accounts: Vec<AuxiliaryAccount>,

    #[serde(default)]
    pub rates: RateAssumptions,

    #[serde(default)]
    pub planning: PlanningInfo,
}

impl Profile {
    /// Create a profile with default rates and no savings or planning data
    pub fn new(birth_year: i32, service_periods: Vec<ServicePeriod>, current_salary: f64) -> Self {
        Self {
            personal: PersonalInfo {
                birth_year,
                life_expectancy: None,
                spouse: None,
            },
            employment: EmploymentInfo {
                service_periods,
                current_salary,
                high_average_override: None,
                high_three_years: None,
                sick_leave_hours: None,
            },
            retirement: RetirementChoices::default(),
            savings: SavingsAccountInfo::default(),
            auxiliary_accounts: Vec::new(),
            rates: RateAssumptions::default(),
            planning: PlanningInfo::default(),
        }
    }

    /// Age in whole years during the valuation date's calendar year
    pub fn current_age(&self, valuation_date: NaiveDate) -> u32 {
        (valuation_date.year() - self.personal.birth_year).max(0) as u32
    }

    /// Check the profile for contradictions the engine does not guard against
    pub fn validate(&self) -> Result<()> {
        if let (Some(leave), Some(claim)) = (self.retirement.leave_age, self.retirement.claim_age) {
            if claim < leave {
                return Err(Error::InvalidProfile(format!(
                    "claim age {} is before leave age {}",
                    claim, leave
                )));
            }
        }

        for (idx, period) in self.employment.service_periods.iter().enumerate() {
            if let Some(end) = period.end_date {
                if end < period.start_date {
                    return Err(Error::InvalidProfile(format!(
                        "service period {} ends ({}) before it starts ({})",
                        idx + 1,
                        end,
                        period.start_date
                    )));
                }
            }
        }

        if let Some(rate) = self.rates.drawdown_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidProfile(format!(
                    "drawdown rate {} is outside [0, 1]",
                    rate
                )));
            }
        }

        if let Some(bridge) = &self.retirement.bridge {
            if let (Some(start), Some(end)) = (bridge.start_age, bridge.end_age) {
                if end < start {
                    return Err(Error::InvalidProfile(format!(
                        "bridge income ends at {} before it starts at {}",
                        end, start
                    )));
                }
            }
        }

        let amounts = [
            ("current salary", self.employment.current_salary),
            ("savings balance", self.savings.balance),
            ("savings contribution", self.savings.annual_contribution),
            ("savings return", self.savings.return_rate),
        ];
        for (label, value) in amounts {
            if !value.is_finite() {
                return Err(Error::InvalidProfile(format!("{} is not a finite number", label)));
            }
        }

        Ok(())
    }
}
