use log::debug;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    pub initial_investment: Money,
    pub final_value: Money,
    pub years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub initial_investment: Money,
    pub final_value: Money,
    pub years: Years,
    pub roi_percentage: Decimal,
    pub annualized_return_percentage: Decimal,
}

/// Total and annualized (geometric) return on an investment.
pub fn calculate_roi(
    initial_investment: Money,
    final_value: Money,
    years: Years,
) -> FinanceResult<RoiResult> {
    if initial_investment <= Decimal::ZERO {
        return Err(FinanceError::invalid(
            "initial_investment",
            "Initial investment must be > 0",
        ));
    }
    if years <= Decimal::ZERO {
        return Err(FinanceError::invalid("years", "Holding period must be > 0 years"));
    }

    let overflow = || FinanceError::overflow("roi_percentage");
    let growth_multiple = final_value.checked_div(initial_investment).ok_or_else(overflow)?;
    if growth_multiple <= Decimal::ZERO {
        return Err(FinanceError::invalid(
            "final_value",
            "Final value must be > 0 to annualize the return",
        ));
    }

    let roi_percentage = final_value
        .checked_sub(initial_investment)
        .and_then(|gain| gain.checked_div(initial_investment))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(overflow)?;
    let annualized_return_percentage = growth_multiple
        .checked_powd(Decimal::ONE / years)
        .and_then(|annualized| (annualized - Decimal::ONE).checked_mul(dec!(100)))
        .ok_or_else(|| FinanceError::overflow("annualized_return_percentage"))?;

    debug!("roi {roi_percentage}% total, {annualized_return_percentage}% annualized");

    Ok(RoiResult {
        initial_investment,
        final_value,
        years,
        roi_percentage,
        annualized_return_percentage,
    })
}

/// ROI wrapped in the standard computation envelope.
pub fn analyze_roi(input: &RoiInput) -> FinanceResult<ComputationOutput<RoiResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_roi(input.initial_investment, input.final_value, input.years)?;

    if result.roi_percentage < Decimal::ZERO {
        warnings.push("Investment lost value over the period.".into());
    }
    if input.years < Decimal::ONE {
        warnings.push("Holding period under one year; annualized figure extrapolates.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "annualization": "geometric (CAGR)",
        "interim_cash_flows": "ignored",
    });

    Ok(with_metadata(
        "Return on investment with CAGR annualization",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
