//! Defined-contribution savings account simulation

use serde::{Deserialize, Serialize};

use crate::profile::SavingsAccountInfo;

/// Employer contribution made regardless of the employee's election
const AUTOMATIC_CONTRIBUTION: f64 = 0.01;
/// Employee contribution matched dollar for dollar
const FULL_MATCH_LIMIT: f64 = 0.03;
/// Employee contribution matched at half, above the full-match limit
const HALF_MATCH_WIDTH: f64 = 0.02;
const MATCH_CAP: f64 = 0.05;

/// Running balance of one savings account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub balance: f64,
    pub return_rate: f64,
}

impl SavingsAccount {
    pub fn new(balance: f64, return_rate: f64) -> Self {
        Self {
            balance: balance.max(0.0),
            return_rate,
        }
    }

    pub fn from_info(info: &SavingsAccountInfo) -> Self {
        Self::new(info.balance, info.return_rate)
    }

    /// One accumulation year: deposit first, then grow
    pub fn contribute_and_grow(&mut self, contribution: f64) {
        self.balance = ((self.balance + contribution) * (1.0 + self.return_rate)).max(0.0);
    }

    /// One decumulation year: withdraw first, then grow the remainder
    ///
    /// Returns the distribution taken this year.
    pub fn draw_down(&mut self, drawdown_rate: f64) -> f64 {
        let distribution = self.balance * drawdown_rate;
        self.balance = ((self.balance - distribution) * (1.0 + self.return_rate)).max(0.0);
        distribution
    }

    /// Balance as reported, never below zero
    pub fn reported_balance(&self) -> f64 {
        self.balance.max(0.0)
    }
}

/// Balance at the leave age after `working_years` accumulation years
pub fn balance_at_leave(info: &SavingsAccountInfo, working_years: u32) -> f64 {
    let mut account = SavingsAccount::from_info(info);
    for _ in 0..working_years {
        account.contribute_and_grow(info.annual_contribution);
    }
    account.reported_balance()
}

/// Balance path under a fixed annual distribution
///
/// Element 0 is the starting balance, followed by the end-of-year balance
/// for each of `years` years, clamped at zero.
pub fn project_drawdown(balance: f64, annual_distribution: f64, return_rate: f64, years: u32) -> Vec<f64> {
    let mut current = balance;
    let mut path = Vec::with_capacity(years as usize + 1);
    path.push(current);

    for _ in 0..years {
        current = ((current - annual_distribution) * (1.0 + return_rate)).max(0.0);
        path.push(current);
    }

    path
}

/// Level annual payment that exhausts `present_value` over `years` at `rate`
pub fn sustainable_withdrawal(present_value: f64, rate: f64, years: u32) -> f64 {
    if years == 0 {
        return present_value;
    }
    let n = years as f64;
    if rate == 0.0 {
        return present_value / n;
    }

    let growth = (1.0 + rate).powf(n);
    present_value * rate * growth / (growth - 1.0)
}

/// Annual employer contribution for a salary and employee contribution fraction
pub fn employer_match(salary: f64, employee_pct: f64) -> f64 {
    if salary <= 0.0 {
        return 0.0;
    }

    let employee_pct = employee_pct.max(0.0);
    let full = employee_pct.min(FULL_MATCH_LIMIT);
    let half = (employee_pct - FULL_MATCH_LIMIT).clamp(0.0, HALF_MATCH_WIDTH) * 0.5;

    let pct = (AUTOMATIC_CONTRIBUTION + full + half).min(MATCH_CAP);
    salary * pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_contribution_before_growth() {
        let mut account = SavingsAccount::new(100_000.0, 0.05);
        account.contribute_and_grow(10_000.0);
        assert_relative_eq!(account.balance, 115_500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_withdrawal_before_growth() {
        let mut account = SavingsAccount::new(100_000.0, 0.05);
        let distribution = account.draw_down(0.04);
        assert_relative_eq!(distribution, 4_000.0, epsilon = 1e-9);
        assert_relative_eq!(account.balance, 100_800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_drawdown_never_negative() {
        for rate in [0.0, 0.04, 0.25, 0.5, 1.0] {
            for return_rate in [-0.3, 0.0, 0.065] {
                let mut account = SavingsAccount::new(50_000.0, return_rate);
                for _ in 0..60 {
                    let distribution = account.draw_down(rate);
                    assert!(distribution >= 0.0);
                    assert!(account.reported_balance() >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_full_drawdown_empties_account() {
        let mut account = SavingsAccount::new(50_000.0, 0.065);
        assert_relative_eq!(account.draw_down(1.0), 50_000.0);
        assert_eq!(account.balance, 0.0);
        assert_eq!(account.draw_down(1.0), 0.0);
    }

    #[test]
    fn test_balance_at_leave() {
        let info = SavingsAccountInfo {
            balance: 100_000.0,
            annual_contribution: 10_000.0,
            return_rate: 0.05,
            employee_contribution_pct: None,
        };
        assert_relative_eq!(balance_at_leave(&info, 0), 100_000.0);
        assert_relative_eq!(balance_at_leave(&info, 2), (115_500.0 + 10_000.0) * 1.05, epsilon = 1e-9);
    }

    #[test]
    fn test_project_drawdown_clamps() {
        let path = project_drawdown(10_000.0, 4_000.0, 0.0, 4);
        assert_eq!(path, vec![10_000.0, 6_000.0, 2_000.0, 0.0, 0.0]);
    }

    #[test]
    fn test_project_drawdown_starts_at_balance() {
        assert_eq!(project_drawdown(50_000.0, 2_000.0, 0.05, 0), vec![50_000.0]);

        let path = project_drawdown(50_000.0, 2_000.0, 0.05, 3);
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], 50_000.0);
        assert_relative_eq!(path[1], 48_000.0 * 1.05, epsilon = 1e-9);
    }

    #[test]
    fn test_sustainable_withdrawal() {
        // Zero rate is straight division
        assert_relative_eq!(sustainable_withdrawal(300_000.0, 0.0, 30), 10_000.0);
        assert_eq!(sustainable_withdrawal(300_000.0, 0.05, 0), 300_000.0);

        let payment = sustainable_withdrawal(100_000.0, 0.05, 10);
        assert_relative_eq!(payment, 12_950.4575, epsilon = 1e-3);

        // End-of-year payments exhaust the balance exactly
        let mut balance = 100_000.0;
        for _ in 0..10 {
            balance = balance * 1.05 - payment;
        }
        assert_abs_diff_eq!(balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_employer_match_schedule() {
        let salary = 100_000.0;
        assert_relative_eq!(employer_match(salary, 0.0), 1_000.0, epsilon = 1e-9);
        assert_relative_eq!(employer_match(salary, 0.03), 4_000.0, epsilon = 1e-9);
        assert_relative_eq!(employer_match(salary, 0.04), 4_500.0, epsilon = 1e-9);
        assert_relative_eq!(employer_match(salary, 0.05), 5_000.0, epsilon = 1e-9);
        assert_relative_eq!(employer_match(salary, 0.10), 5_000.0, epsilon = 1e-9);
        assert_eq!(employer_match(0.0, 0.05), 0.0);
    }
}
