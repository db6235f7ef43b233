use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::time_value::compound_factor;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

/// Monthly compounding unless the caller says otherwise.
pub const DEFAULT_COMPOUNDING_FREQUENCY: u32 = 12;

/// Longest accepted horizon; bounds the yearly breakdown.
pub const MAX_INVESTMENT_YEARS: u32 = 1000;

fn default_frequency() -> u32 {
    DEFAULT_COMPOUNDING_FREQUENCY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Money,
    pub annual_rate: Rate,
    pub years: u32,
    #[serde(default = "default_frequency")]
    pub compounding_frequency: u32,
}

/// Balance at the end of a whole year (year 0 is the initial deposit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBalance {
    pub year: u32,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub principal: Money,
    pub annual_rate: Rate,
    pub years: u32,
    pub compounding_frequency: u32,
    pub final_amount: Money,
    pub total_interest: Money,
    pub growth_percentage: Decimal,
    pub yearly_breakdown: Vec<YearlyBalance>,
}

/// A = P(1 + r/n)^(n·t), with a year-end balance for every year 0..=t.
pub fn calculate_compound_interest(
    principal: Money,
    annual_rate: Rate,
    years: u32,
    compounding_frequency: u32,
) -> FinanceResult<CompoundInterestResult> {
    if principal <= Decimal::ZERO {
        return Err(FinanceError::invalid("principal", "Principal must be > 0"));
    }
    if years == 0 {
        return Err(FinanceError::invalid("years", "Investment period must be > 0 years"));
    }
    if years > MAX_INVESTMENT_YEARS {
        return Err(FinanceError::invalid(
            "years",
            format!("Investment period cannot exceed {MAX_INVESTMENT_YEARS} years"),
        ));
    }
    if compounding_frequency == 0 {
        return Err(FinanceError::invalid(
            "compounding_frequency",
            "Compounding frequency must be > 0",
        ));
    }

    let periodic_rate = annual_rate / Decimal::from(compounding_frequency);
    if periodic_rate <= dec!(-1) {
        return Err(FinanceError::invalid(
            "annual_rate",
            "Periodic rate must be greater than -100%",
        ));
    }

    let overflow = || FinanceError::overflow("final_amount");

    let yearly_factor = compound_factor(periodic_rate, compounding_frequency).ok_or_else(overflow)?;
    let mut yearly_breakdown = Vec::with_capacity(years as usize + 1);
    let mut amount = principal;
    yearly_breakdown.push(YearlyBalance { year: 0, amount });
    for year in 1..=years {
        amount = amount.checked_mul(yearly_factor).ok_or_else(overflow)?;
        yearly_breakdown.push(YearlyBalance { year, amount });
    }

    let total_periods = compounding_frequency.checked_mul(years).ok_or_else(overflow)?;
    let final_amount = compound_factor(periodic_rate, total_periods)
        .and_then(|factor| principal.checked_mul(factor))
        .ok_or_else(overflow)?;
    let total_interest = final_amount - principal;
    let growth_percentage = total_interest
        .checked_div(principal)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| FinanceError::overflow("growth_percentage"))?;

    debug!("compound {principal} @ {annual_rate} x{compounding_frequency} for {years}y -> {final_amount}");

    Ok(CompoundInterestResult {
        principal,
        annual_rate,
        years,
        compounding_frequency,
        final_amount,
        total_interest,
        growth_percentage,
        yearly_breakdown,
    })
}

/// Compound growth wrapped in the standard computation envelope.
pub fn analyze_compound_interest(
    input: &CompoundInterestInput,
) -> FinanceResult<ComputationOutput<CompoundInterestResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_compound_interest(
        input.principal,
        input.annual_rate,
        input.years,
        input.compounding_frequency,
    )?;

    if input.annual_rate < Decimal::ZERO {
        warnings.push("Negative rate; the balance shrinks every period.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "compounding_frequency": input.compounding_frequency,
        "contributions": "none after the initial deposit",
    });

    Ok(with_metadata(
        "Discrete compound interest A = P(1 + r/n)^(nt)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
