use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub fixed_costs: Money,
    pub variable_cost_per_unit: Money,
    pub price_per_unit: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub fixed_costs: Money,
    pub variable_cost_per_unit: Money,
    pub price_per_unit: Money,
    pub contribution_margin: Money,
    pub contribution_margin_ratio: Decimal,
    pub break_even_units: Decimal,
    pub break_even_revenue: Money,
}

impl BreakEvenResult {
    /// Total cost of producing `units`, `None` outside the Decimal range.
    pub fn total_cost(&self, units: Decimal) -> Option<Money> {
        self.variable_cost_per_unit
            .checked_mul(units)?
            .checked_add(self.fixed_costs)
    }

    /// Total revenue from selling `units`.
    pub fn total_revenue(&self, units: Decimal) -> Option<Money> {
        self.price_per_unit.checked_mul(units)
    }
}

/// Unit volume and revenue at which contribution margin covers fixed costs.
pub fn calculate_break_even_point(
    fixed_costs: Money,
    variable_cost_per_unit: Money,
    price_per_unit: Money,
) -> FinanceResult<BreakEvenResult> {
    if fixed_costs < Decimal::ZERO {
        return Err(FinanceError::invalid("fixed_costs", "Fixed costs cannot be negative"));
    }
    if variable_cost_per_unit < Decimal::ZERO {
        return Err(FinanceError::invalid(
            "variable_cost_per_unit",
            "Variable cost per unit cannot be negative",
        ));
    }

    let contribution_margin = price_per_unit
        .checked_sub(variable_cost_per_unit)
        .unwrap_or(Decimal::MIN);
    if contribution_margin <= Decimal::ZERO {
        return Err(FinanceError::invalid(
            "price_per_unit",
            "Price per unit must be greater than variable cost per unit",
        ));
    }

    let break_even_units = fixed_costs
        .checked_div(contribution_margin)
        .ok_or_else(|| FinanceError::overflow("break_even_units"))?;
    let break_even_revenue = break_even_units
        .checked_mul(price_per_unit)
        .ok_or_else(|| FinanceError::overflow("break_even_revenue"))?;
    let contribution_margin_ratio = contribution_margin / price_per_unit;

    debug!("break-even at {break_even_units} units");

    Ok(BreakEvenResult {
        fixed_costs,
        variable_cost_per_unit,
        price_per_unit,
        contribution_margin,
        contribution_margin_ratio,
        break_even_units,
        break_even_revenue,
    })
}

/// Break-even analysis wrapped in the standard computation envelope.
pub fn analyze_break_even(
    input: &BreakEvenInput,
) -> FinanceResult<ComputationOutput<BreakEvenResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_break_even_point(
        input.fixed_costs,
        input.variable_cost_per_unit,
        input.price_per_unit,
    )?;

    if input.fixed_costs.is_zero() {
        warnings.push("No fixed costs; every unit sold is profitable.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "cost_model": "linear: fixed + variable x units",
        "price": "constant per unit",
    });

    Ok(with_metadata(
        "Contribution-margin break-even",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
