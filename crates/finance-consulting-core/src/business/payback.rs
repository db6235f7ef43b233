use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::FinanceResult;

/// Either a level annual cash flow or an explicit year-by-year series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CashFlowProfile {
    Level { annual_cash_flow: Money },
    Uneven { annual_cash_flows: Vec<Money> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaybackInput {
    pub initial_investment: Money,
    #[serde(flatten)]
    pub cash_flows: CashFlowProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackPeriodResult {
    pub initial_investment: Money,
    pub payback_years: Years,
    pub payback_months: Decimal,
}

impl PaybackPeriodResult {
    fn from_years(initial_investment: Money, payback_years: Years) -> FinanceResult<Self> {
        let payback_months = payback_years
            .checked_mul(Decimal::from(12))
            .ok_or_else(|| FinanceError::overflow("payback_months"))?;
        Ok(PaybackPeriodResult {
            initial_investment,
            payback_years,
            payback_months,
        })
    }
}

fn validate_investment(initial_investment: Money) -> FinanceResult<()> {
    if initial_investment <= Decimal::ZERO {
        return Err(FinanceError::invalid(
            "initial_investment",
            "Initial investment must be > 0",
        ));
    }
    Ok(())
}

/// Years for a level annual cash flow to repay the investment (may be fractional).
pub fn calculate_payback_period(
    initial_investment: Money,
    annual_cash_flow: Money,
) -> FinanceResult<PaybackPeriodResult> {
    validate_investment(initial_investment)?;
    if annual_cash_flow <= Decimal::ZERO {
        return Err(FinanceError::invalid(
            "annual_cash_flow",
            "Annual cash flow must be > 0",
        ));
    }

    let payback_years = initial_investment
        .checked_div(annual_cash_flow)
        .ok_or_else(|| FinanceError::overflow("payback_years"))?;
    PaybackPeriodResult::from_years(initial_investment, payback_years)
}

/// Payback over an uneven series of annual cash flows, interpolating linearly
/// inside the year in which cumulative cash flow first covers the investment.
pub fn calculate_payback_period_uneven(
    initial_investment: Money,
    annual_cash_flows: &[Money],
) -> FinanceResult<PaybackPeriodResult> {
    validate_investment(initial_investment)?;
    if annual_cash_flows.is_empty() {
        return Err(FinanceError::invalid(
            "annual_cash_flows",
            "At least one annual cash flow is required",
        ));
    }

    let overflow = || FinanceError::overflow("cumulative_cash_flow");
    let mut cumulative = Decimal::ZERO;
    for (index, cash_flow) in annual_cash_flows.iter().copied().enumerate() {
        let shortfall = initial_investment.checked_sub(cumulative).ok_or_else(overflow)?;
        cumulative = cumulative.checked_add(cash_flow).ok_or_else(overflow)?;
        if cumulative >= initial_investment && cash_flow > Decimal::ZERO {
            let fraction_of_year = shortfall.checked_div(cash_flow).ok_or_else(overflow)?;
            let years = Decimal::from(index as u64) + fraction_of_year;
            return PaybackPeriodResult::from_years(initial_investment, years);
        }
    }

    Err(FinanceError::invalid(
        "annual_cash_flows",
        format!(
            "Investment not recovered within {} years of cash flows",
            annual_cash_flows.len()
        ),
    ))
}

/// Payback period wrapped in the standard computation envelope.
pub fn analyze_payback(
    input: &PaybackInput,
) -> FinanceResult<ComputationOutput<PaybackPeriodResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (result, method) = match &input.cash_flows {
        CashFlowProfile::Level { annual_cash_flow } => (
            calculate_payback_period(input.initial_investment, *annual_cash_flow)?,
            "level",
        ),
        CashFlowProfile::Uneven { annual_cash_flows } => {
            if annual_cash_flows.iter().any(|cf| *cf < Decimal::ZERO) {
                warnings.push("Series contains negative cash flows.".into());
            }
            (
                calculate_payback_period_uneven(input.initial_investment, annual_cash_flows)?,
                "cumulative with in-year interpolation",
            )
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "cash_flow_profile": method,
        "discounting": "none (simple payback)",
    });

    Ok(with_metadata(
        "Simple payback period",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
