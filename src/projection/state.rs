//! Running balances carried between projection years

use crate::benefits::SavingsAccount;
use crate::profile::{AuxiliaryAccount, Debt, Profile};

/// Outcome of one year of debt service
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebtYear {
    pub interest: f64,
    pub payment: f64,
}

/// State of the household at the start of a projection year
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Attained age for the year being computed
    pub age: u32,

    pub calendar_year: i32,

    /// Primary savings account
    pub savings: SavingsAccount,

    /// Combined auxiliary account balance
    pub auxiliary_balance: f64,

    /// Balance-weighted return of the auxiliary accounts
    pub auxiliary_return: f64,

    /// Annual contributions to auxiliary accounts while working
    pub auxiliary_contribution: f64,

    /// Outstanding balance per debt, in profile order
    pub debt_balances: Vec<f64>,

    /// Current value per asset, in profile order
    pub asset_values: Vec<f64>,

    /// Running sum of net income
    pub cumulative_savings: f64,
}

impl ProjectionState {
    /// Initialize state from a profile at the projection start age
    pub fn from_profile(profile: &Profile, start_age: u32, default_account_return: f64) -> Self {
        let accounts = &profile.auxiliary_accounts;
        Self {
            age: start_age,
            calendar_year: profile.personal.birth_year + start_age as i32,
            savings: SavingsAccount::from_info(&profile.savings),
            auxiliary_balance: accounts.iter().map(|a| a.balance.max(0.0)).sum(),
            auxiliary_return: blended_return(accounts, default_account_return),
            auxiliary_contribution: accounts
                .iter()
                .filter_map(|a| a.annual_contribution)
                .sum(),
            debt_balances: profile.planning.debts.iter().map(|d| d.balance.max(0.0)).collect(),
            asset_values: profile.planning.assets.iter().map(|a| a.value).collect(),
            cumulative_savings: 0.0,
        }
    }

    /// Move to the next age
    pub fn advance_year(&mut self) {
        self.age += 1;
        self.calendar_year += 1;
    }

    /// Grow the auxiliary accounts for one year, adding contributions first when working
    pub fn grow_auxiliary(&mut self, working: bool) {
        let contribution = if working { self.auxiliary_contribution } else { 0.0 };
        self.auxiliary_balance =
            ((self.auxiliary_balance + contribution) * (1.0 + self.auxiliary_return)).max(0.0);
    }

    /// Accrue interest on each debt, then pay it down
    ///
    /// The payment is the scheduled amount capped at what is owed, so a debt
    /// never goes below zero and the reported payment is what was actually paid.
    pub fn service_debts(&mut self, debts: &[Debt]) -> DebtYear {
        let mut year = DebtYear::default();

        for (balance, debt) in self.debt_balances.iter_mut().zip(debts) {
            if *balance <= 0.0 {
                continue;
            }
            let interest = *balance * debt.interest_rate;
            let owed = *balance + interest;
            let payment = debt.scheduled_payment().max(0.0).min(owed);

            *balance = (owed - payment).max(0.0);
            year.interest += interest;
            year.payment += payment;
        }

        year
    }

    /// Compound each asset by its appreciation rate
    pub fn appreciate_assets(&mut self, profile: &Profile) {
        for (value, asset) in self.asset_values.iter_mut().zip(&profile.planning.assets) {
            *value *= 1.0 + asset.appreciation_rate.unwrap_or(0.0);
        }
    }

    pub fn total_debt(&self) -> f64 {
        self.debt_balances.iter().sum()
    }

    pub fn total_assets(&self) -> f64 {
        self.asset_values.iter().sum()
    }

    /// Savings plus auxiliary accounts
    pub fn total_accounts(&self) -> f64 {
        self.savings.reported_balance() + self.auxiliary_balance
    }
}

/// Balance-weighted return across auxiliary accounts
///
/// Falls back to the simple mean when every balance is zero, and to zero
/// without any accounts.
pub fn blended_return(accounts: &[AuxiliaryAccount], default_return: f64) -> f64 {
    if accounts.is_empty() {
        return 0.0;
    }

    let rate = |a: &AuxiliaryAccount| a.return_rate.unwrap_or(default_return);
    let total: f64 = accounts.iter().map(|a| a.balance.max(0.0)).sum();

    if total > 0.0 {
        accounts.iter().map(|a| a.balance.max(0.0) * rate(a)).sum::<f64>() / total
    } else {
        accounts.iter().map(rate).sum::<f64>() / accounts.len() as f64
    }
}
