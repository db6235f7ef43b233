use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitMarginInput {
    pub revenue: Money,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitMarginResult {
    pub revenue: Money,
    pub cost: Money,
    pub gross_profit: Money,
    pub margin_percentage: Decimal,
    pub profit_ratio: Decimal,
}

pub fn calculate_profit_margin(revenue: Money, cost: Money) -> FinanceResult<ProfitMarginResult> {
    if revenue.is_zero() {
        return Err(FinanceError::invalid(
            "revenue",
            "Revenue must be non-zero to compute a margin",
        ));
    }

    let gross_profit = revenue
        .checked_sub(cost)
        .ok_or_else(|| FinanceError::overflow("gross_profit"))?;
    let profit_ratio = gross_profit
        .checked_div(revenue)
        .ok_or_else(|| FinanceError::overflow("profit_ratio"))?;
    let margin_percentage = profit_ratio
        .checked_mul(dec!(100))
        .ok_or_else(|| FinanceError::overflow("margin_percentage"))?;

    Ok(ProfitMarginResult {
        revenue,
        cost,
        gross_profit,
        margin_percentage,
        profit_ratio,
    })
}

/// Profit margin wrapped in the standard computation envelope.
pub fn analyze_profit_margin(
    input: &ProfitMarginInput,
) -> FinanceResult<ComputationOutput<ProfitMarginResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_profit_margin(input.revenue, input.cost)?;

    if result.gross_profit < Decimal::ZERO {
        warnings.push("Costs exceed revenue; the business is loss-making.".into());
    }
    if input.revenue < Decimal::ZERO {
        warnings.push("Negative revenue; margin sign is inverted.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Gross profit margin",
        &serde_json::json!({ "cost_basis": "total costs" }),
        warnings,
        elapsed,
        result,
    ))
}
