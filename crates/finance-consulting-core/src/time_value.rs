use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::types::{Money, Rate};

/// Growth factor (1 + r)^n for a per-period rate, `None` if it leaves the
/// Decimal range.
pub fn compound_factor(rate: Rate, periods: u32) -> Option<Decimal> {
    Decimal::ONE
        .checked_add(rate)?
        .checked_powi(i64::from(periods))
}

/// Fractional number of periods for a balance to grow from `present_value`
/// to `target` with a level deposit of `pmt` per period.
///
/// Closed form: n = ln((target + pmt/r) / (pv + pmt/r)) / ln(1 + r).
/// Returns `None` when the target can never be reached or the closed form
/// leaves the Decimal range.
pub fn nper_to_target(rate: Rate, pmt: Money, present_value: Money, target: Money) -> Option<Decimal> {
    if present_value >= target {
        return Some(Decimal::ZERO);
    }

    if rate.is_zero() {
        if pmt <= Decimal::ZERO {
            return None;
        }
        return (target - present_value).checked_div(pmt);
    }

    if rate < Decimal::ZERO {
        return None;
    }

    let annuity_pv = pmt.checked_div(rate)?;
    let denominator = present_value.checked_add(annuity_pv)?;
    if denominator <= Decimal::ZERO {
        return None;
    }
    let ratio = target.checked_add(annuity_pv)?.checked_div(denominator)?;
    if ratio <= Decimal::ONE {
        return None;
    }

    ratio.checked_ln()?.checked_div((Decimal::ONE + rate).checked_ln()?)
}
