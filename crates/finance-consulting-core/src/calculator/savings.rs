use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::time_value::nper_to_target;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::FinanceResult;

/// Simulation horizon: 100 years of monthly deposits.
pub const MAX_SAVINGS_MONTHS: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoalInput {
    pub goal_amount: Money,
    pub monthly_contribution: Money,
    pub annual_rate: Rate,
    #[serde(default)]
    pub current_savings: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalResult {
    pub goal_amount: Money,
    pub monthly_contribution: Money,
    pub annual_rate: Rate,
    pub current_savings: Money,
    /// Whole months until the balance first reaches the goal; `None` when
    /// the goal is unreachable within `MAX_SAVINGS_MONTHS`.
    pub months_required: Option<u32>,
    pub years_required: Option<Years>,
    /// Closed-form fractional month count, for comparison with the simulation.
    pub exact_months: Option<Decimal>,
    pub final_balance: Money,
}

impl SavingsGoalResult {
    pub fn is_reachable(&self) -> bool {
        self.months_required.is_some()
    }
}

/// Months of saving needed to reach `goal_amount` from an empty account.
pub fn calculate_savings_goal(
    goal_amount: Money,
    monthly_contribution: Money,
    annual_rate: Rate,
) -> FinanceResult<SavingsGoalResult> {
    calculate_savings_goal_from(goal_amount, monthly_contribution, annual_rate, Decimal::ZERO)
}

/// Months of saving needed to reach `goal_amount` starting from `current_savings`.
///
/// Deposits land at the end of each month after interest is credited.
pub fn calculate_savings_goal_from(
    goal_amount: Money,
    monthly_contribution: Money,
    annual_rate: Rate,
    current_savings: Money,
) -> FinanceResult<SavingsGoalResult> {
    if goal_amount <= Decimal::ZERO {
        return Err(FinanceError::invalid("goal_amount", "Goal amount must be > 0"));
    }
    if annual_rate < Decimal::ZERO {
        return Err(FinanceError::invalid(
            "annual_rate",
            "Annual rate cannot be negative",
        ));
    }
    if current_savings < Decimal::ZERO {
        return Err(FinanceError::invalid(
            "current_savings",
            "Current savings cannot be negative",
        ));
    }

    let monthly_rate = annual_rate / Decimal::from(12);
    let mut balance = current_savings;

    // Nothing ever grows the balance: no deposits and either no seed money or no interest.
    let stalled = monthly_contribution <= Decimal::ZERO
        && (current_savings.is_zero() || monthly_rate.is_zero());

    let months_required = if balance >= goal_amount {
        Some(0)
    } else if stalled {
        None
    } else {
        let growth = Decimal::ONE + monthly_rate;
        let mut reached = None;
        for month in 1..=MAX_SAVINGS_MONTHS {
            balance = balance
                .checked_mul(growth)
                .and_then(|grown| grown.checked_add(monthly_contribution))
                .ok_or_else(|| FinanceError::overflow("final_balance"))?;
            if balance >= goal_amount {
                reached = Some(month);
                break;
            }
        }
        reached
    };

    if months_required.is_none() {
        warn!("savings goal {goal_amount} unreachable within {MAX_SAVINGS_MONTHS} months");
    }

    let exact_months = months_required.and_then(|_| {
        nper_to_target(monthly_rate, monthly_contribution, current_savings, goal_amount)
    });
    let years_required = months_required.map(|m| Decimal::from(m) / Decimal::from(12));

    debug!("savings goal {goal_amount}: {months_required:?} months");

    Ok(SavingsGoalResult {
        goal_amount,
        monthly_contribution,
        annual_rate,
        current_savings,
        months_required,
        years_required,
        exact_months,
        final_balance: balance,
    })
}

/// Savings-goal timeline wrapped in the standard computation envelope.
pub fn analyze_savings_goal(
    input: &SavingsGoalInput,
) -> FinanceResult<ComputationOutput<SavingsGoalResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_savings_goal_from(
        input.goal_amount,
        input.monthly_contribution,
        input.annual_rate,
        input.current_savings,
    )?;

    if !result.is_reachable() {
        warnings.push(format!(
            "Goal not reached within {MAX_SAVINGS_MONTHS} months at this contribution rate."
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "compounding": "monthly",
        "deposit_timing": "end of month",
        "max_months": MAX_SAVINGS_MONTHS,
    });

    Ok(with_metadata(
        "Month-by-month savings accumulation",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_goal_with_interest() {
        let r = calculate_savings_goal(dec!(50_000), dec!(500), dec!(0.03)).unwrap();
        assert_eq!(r.months_required, Some(90));
        assert_eq!(r.years_required, Some(dec!(7.5)));
        let exact = r.exact_months.unwrap();
        assert!((exact - dec!(89.37)).abs() < dec!(0.01));
        assert!(r.final_balance >= dec!(50_000));
    }

    #[test]
    fn test_goal_without_interest() {
        let r = calculate_savings_goal(dec!(1_000), dec!(100), Decimal::ZERO).unwrap();
        assert_eq!(r.months_required, Some(10));
        assert_eq!(r.exact_months, Some(dec!(10)));
    }

    #[test]
    fn test_no_contribution_is_unreachable() {
        let r = calculate_savings_goal(dec!(1_000), Decimal::ZERO, dec!(0.05)).unwrap();
        assert!(!r.is_reachable());
        assert_eq!(r.years_required, None);
        assert_eq!(r.exact_months, None);
    }

    #[test]
    fn test_tiny_contribution_hits_cap() {
        let r = calculate_savings_goal(dec!(1_000_000_000), dec!(1), Decimal::ZERO).unwrap();
        assert_eq!(r.months_required, None);
        assert_eq!(r.final_balance, Decimal::from(MAX_SAVINGS_MONTHS));
    }

    #[test]
    fn test_seeded_balance_grows_without_contributions() {
        let r = calculate_savings_goal_from(dec!(1_100), Decimal::ZERO, dec!(0.12), dec!(1_000))
            .unwrap();
        // 1% a month: 1000 * 1.01^10 ≈ 1104.6
        assert_eq!(r.months_required, Some(10));
    }

    #[test]
    fn test_goal_already_met() {
        let r = calculate_savings_goal_from(dec!(500), dec!(10), dec!(0.02), dec!(600)).unwrap();
        assert_eq!(r.months_required, Some(0));
    }

    #[test]
    fn test_extreme_rate_reaches_goal_without_overflow() {
        let r = calculate_savings_goal(dec!(1_000_000), dec!(1), dec!(1_000_000_000)).unwrap();
        assert_eq!(r.months_required, Some(2));
    }

    #[test]
    fn test_rejects_non_positive_goal() {
        assert!(calculate_savings_goal(Decimal::ZERO, dec!(100), dec!(0.03))
            .unwrap_err()
            .is_invalid_argument());
    }
}
