use log::debug;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Longest accepted term; bounds the schedule at 12,000 rows.
pub const MAX_TERM_YEARS: u32 = 1000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an amortizing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual nominal rate as a decimal (0.045 = 4.5%).
    pub annual_rate: Rate,
    pub years: u32,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub period_index: u32,
    pub principal_component: Money,
    pub interest_component: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPaymentResult {
    pub principal: Money,
    pub annual_rate: Rate,
    pub years: u32,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationEntry>,
}

impl LoanPaymentResult {
    pub fn months(&self) -> u32 {
        self.years * MONTHS_PER_YEAR
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Annuity payment P·r / (1 − (1 + r)^−n), or P / n at a zero rate.
///
/// The discount factor is raised from 1 / (1 + r), so long terms at high
/// rates shrink towards zero instead of overflowing.
fn level_payment(principal: Money, monthly_rate: Rate, months: u32) -> FinanceResult<Money> {
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }
    let discount = (Decimal::ONE / (Decimal::ONE + monthly_rate))
        .checked_powi(i64::from(months))
        .ok_or_else(|| FinanceError::overflow("annual_rate"))?;
    let annuity = Decimal::ONE - discount;
    if annuity.is_zero() {
        return Err(FinanceError::invalid(
            "annual_rate",
            "Rate too small to amortize over this term",
        ));
    }
    principal
        .checked_mul(monthly_rate)
        .and_then(|interest| interest.checked_div(annuity))
        .ok_or_else(|| FinanceError::overflow("monthly_payment"))
}

/// Level monthly payment, totals and the full month-by-month schedule of a
/// fully amortizing fixed-rate loan.
pub fn calculate_loan_payment(
    principal: Money,
    annual_rate: Rate,
    years: u32,
) -> FinanceResult<LoanPaymentResult> {
    if principal <= Decimal::ZERO {
        return Err(FinanceError::invalid("principal", "Principal must be > 0"));
    }
    if annual_rate < Decimal::ZERO {
        return Err(FinanceError::invalid(
            "annual_rate",
            "Annual rate cannot be negative",
        ));
    }
    if years == 0 {
        return Err(FinanceError::invalid("years", "Loan term must be > 0 years"));
    }

    if years > MAX_TERM_YEARS {
        return Err(FinanceError::invalid(
            "years",
            format!("Loan term cannot exceed {MAX_TERM_YEARS} years"),
        ));
    }

    let months = years * MONTHS_PER_YEAR;
    let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);
    let monthly_payment = level_payment(principal, monthly_rate, months)?;

    let total_payment = monthly_payment
        .checked_mul(Decimal::from(months))
        .ok_or_else(|| FinanceError::overflow("total_payment"))?;
    let total_interest = total_payment - principal;

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = principal;
    for period_index in 1..=months {
        let interest_component = balance
            .checked_mul(monthly_rate)
            .ok_or_else(|| FinanceError::overflow("interest_component"))?;
        let principal_component = monthly_payment - interest_component;
        balance -= principal_component;
        if period_index == months {
            // absorb rounding drift in the last period
            balance = Decimal::ZERO;
        }
        schedule.push(AmortizationEntry {
            period_index,
            principal_component,
            interest_component,
            remaining_balance: balance,
        });
    }

    debug!(
        "loan {principal} @ {annual_rate} over {years}y: payment {}",
        monthly_payment.round_dp(2)
    );

    Ok(LoanPaymentResult {
        principal,
        annual_rate,
        years,
        monthly_payment,
        total_payment,
        total_interest,
        schedule,
    })
}

/// Loan payment wrapped in the standard computation envelope.
pub fn analyze_loan(input: &LoanInput) -> FinanceResult<ComputationOutput<LoanPaymentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_loan_payment(input.principal, input.annual_rate, input.years)?;

    if input.annual_rate.is_zero() {
        warnings.push("Zero interest rate; payment is straight-line principal.".into());
    } else if input.annual_rate > dec!(0.25) {
        warnings.push("Annual rate above 25%; check that the rate is a decimal, not a percentage.".into());
    }
    if result.total_interest > input.principal {
        warnings.push("Total interest exceeds the amount borrowed.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "compounding": "monthly",
        "payment_timing": "end of period",
        "monthly_rate": "annual_rate / 12",
    });

    Ok(with_metadata(
        "Level-payment amortizing loan",
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
    fn test_mortgage_payment() {
        let r = calculate_loan_payment(dec!(250_000), dec!(0.045), 30).unwrap();
        assert!((r.monthly_payment - dec!(1266.71)).abs() < dec!(0.01));
        assert!((r.total_payment - dec!(456_016.78)).abs() < dec!(0.01));
        assert!((r.total_interest - dec!(206_016.78)).abs() < dec!(0.01));
    }

    #[test]
    fn test_schedule_length_and_final_balance() {
        let r = calculate_loan_payment(dec!(25_000), dec!(0.06), 5).unwrap();
        assert_eq!(r.schedule.len(), 60);
        assert_eq!(r.schedule.last().unwrap().remaining_balance, Decimal::ZERO);
        // balance before the final clamp was already within a cent
        let penultimate = &r.schedule[58];
        let last = &r.schedule[59];
        assert!((penultimate.remaining_balance - last.principal_component).abs() < dec!(0.01));
    }

    #[test]
    fn test_zero_rate_branch() {
        let r = calculate_loan_payment(dec!(12_000), Decimal::ZERO, 2).unwrap();
        assert_eq!(r.monthly_payment, dec!(500));
        assert_eq!(r.total_interest, Decimal::ZERO);
        assert!(r.schedule.iter().all(|e| e.interest_component.is_zero()));
    }

    #[test]
    fn test_balances_non_increasing() {
        let r = calculate_loan_payment(dec!(10_000), dec!(0.12), 3).unwrap();
        let mut previous = r.principal;
        for entry in &r.schedule {
            assert!(entry.remaining_balance <= previous);
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(calculate_loan_payment(Decimal::ZERO, dec!(0.05), 10)
            .unwrap_err()
            .is_invalid_argument());
        assert!(calculate_loan_payment(dec!(1000), dec!(-0.01), 10)
            .unwrap_err()
            .is_invalid_argument());
        assert!(calculate_loan_payment(dec!(1000), dec!(0.05), 0)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_high_rate_long_term_returns_interest_only_payment() {
        // (1 + 1/12)^1200 is outside the Decimal range; the discount factor is not
        let r = calculate_loan_payment(dec!(100_000), dec!(1.0), 100).unwrap();
        assert!((r.monthly_payment - dec!(8333.33)).abs() < dec!(0.01));
        assert_eq!(r.schedule.len(), 1200);
        assert_eq!(r.schedule.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_huge_payment_is_overflow_error() {
        let err = calculate_loan_payment(dec!(10_000_000_000_000_000_000_000_000), dec!(1_000), 1)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_term_cap() {
        assert!(calculate_loan_payment(dec!(1_000), dec!(0.05), MAX_TERM_YEARS).is_ok());
        assert!(calculate_loan_payment(dec!(1_000), dec!(0.05), MAX_TERM_YEARS + 1)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_analyze_zero_rate_warns() {
        let out = analyze_loan(&LoanInput {
            principal: dec!(1200),
            annual_rate: Decimal::ZERO,
            years: 1,
        })
        .unwrap();
        assert_eq!(out.result.monthly_payment, dec!(100));
        assert_eq!(out.warnings.len(), 1);
    }
}
