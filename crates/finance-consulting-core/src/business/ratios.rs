use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Multiple};
use crate::FinanceResult;

/// Named financial statement figures. Any figure may be absent; a ratio
/// whose inputs are missing is omitted rather than failing the bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialStatementFigures {
    pub revenue: Option<Money>,
    pub net_income: Option<Money>,
    pub total_assets: Option<Money>,
    pub current_assets: Option<Money>,
    pub current_liabilities: Option<Money>,
    pub inventory: Option<Money>,
    pub total_liabilities: Option<Money>,
    pub total_equity: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatioBundle {
    pub current_ratio: Option<Multiple>,
    pub quick_ratio: Option<Multiple>,
    pub debt_to_equity: Option<Multiple>,
    pub asset_turnover: Option<Multiple>,
    pub return_on_assets_percentage: Option<Decimal>,
    pub return_on_equity_percentage: Option<Decimal>,
    pub net_profit_margin_percentage: Option<Decimal>,
    /// Names of the ratios that could not be computed.
    pub omitted: Vec<String>,
}

/// `None` when either side is missing, the denominator is zero or the
/// quotient leaves the Decimal range.
fn ratio(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if !d.is_zero() => n.checked_div(d),
        _ => None,
    }
}

fn percentage(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    ratio(numerator, denominator).and_then(|r| r.checked_mul(dec!(100)))
}

/// Liquidity, leverage, efficiency and profitability ratios. Never fails.
pub fn calculate_financial_ratios(figures: &FinancialStatementFigures) -> FinancialRatioBundle {
    let quick_assets = match (figures.current_assets, figures.inventory) {
        (Some(ca), Some(inv)) => ca.checked_sub(inv),
        _ => None,
    };

    let mut bundle = FinancialRatioBundle {
        current_ratio: ratio(figures.current_assets, figures.current_liabilities),
        quick_ratio: ratio(quick_assets, figures.current_liabilities),
        debt_to_equity: ratio(figures.total_liabilities, figures.total_equity),
        asset_turnover: ratio(figures.revenue, figures.total_assets),
        return_on_assets_percentage: percentage(figures.net_income, figures.total_assets),
        return_on_equity_percentage: percentage(figures.net_income, figures.total_equity),
        net_profit_margin_percentage: percentage(figures.net_income, figures.revenue),
        omitted: Vec::new(),
    };

    let checks = [
        ("current_ratio", bundle.current_ratio.is_none()),
        ("quick_ratio", bundle.quick_ratio.is_none()),
        ("debt_to_equity", bundle.debt_to_equity.is_none()),
        ("asset_turnover", bundle.asset_turnover.is_none()),
        ("return_on_assets_percentage", bundle.return_on_assets_percentage.is_none()),
        ("return_on_equity_percentage", bundle.return_on_equity_percentage.is_none()),
        ("net_profit_margin_percentage", bundle.net_profit_margin_percentage.is_none()),
    ];
    bundle.omitted = checks
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| name.to_string())
        .collect();

    bundle
}

/// Ratio bundle wrapped in the standard computation envelope.
pub fn analyze_financial_ratios(
    figures: &FinancialStatementFigures,
) -> FinanceResult<ComputationOutput<FinancialRatioBundle>> {
    let start = Instant::now();
    let bundle = calculate_financial_ratios(figures);

    let mut warnings: Vec<String> = bundle
        .omitted
        .iter()
        .map(|name| format!("{name} omitted: missing input, zero denominator or out of range."))
        .collect();
    if let Some(cr) = bundle.current_ratio {
        if cr < Decimal::ONE {
            warnings.push("Current ratio below 1.0x; short-term liabilities exceed current assets.".into());
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "quick_assets": "current_assets - inventory",
        "debt": "total_liabilities",
    });

    Ok(with_metadata(
        "Financial statement ratio analysis",
        &assumptions,
        warnings,
        elapsed,
        bundle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_company() -> FinancialStatementFigures {
        FinancialStatementFigures {
            revenue: Some(dec!(1_000_000)),
            net_income: Some(dec!(120_000)),
            total_assets: Some(dec!(800_000)),
            current_assets: Some(dec!(300_000)),
            current_liabilities: Some(dec!(150_000)),
            inventory: Some(dec!(60_000)),
            total_liabilities: Some(dec!(320_000)),
            total_equity: Some(dec!(480_000)),
        }
    }

    #[test]
    fn test_full_bundle() {
        let b = calculate_financial_ratios(&sample_company());
        assert_eq!(b.current_ratio, Some(dec!(2)));
        assert_eq!(b.quick_ratio, Some(dec!(1.6)));
        assert_eq!(b.asset_turnover, Some(dec!(1.25)));
        assert_eq!(b.return_on_assets_percentage, Some(dec!(15)));
        assert_eq!(b.net_profit_margin_percentage, Some(dec!(12)));
        assert_eq!(b.return_on_equity_percentage, Some(dec!(25)));
        assert!(b.omitted.is_empty());
    }

    #[test]
    fn test_zero_denominator_omits_only_that_ratio() {
        let mut figures = sample_company();
        figures.current_liabilities = Some(Decimal::ZERO);
        let b = calculate_financial_ratios(&figures);
        assert_eq!(b.current_ratio, None);
        assert_eq!(b.quick_ratio, None);
        assert_eq!(b.asset_turnover, Some(dec!(1.25)));
        assert_eq!(b.omitted, vec!["current_ratio", "quick_ratio"]);
    }

    #[test]
    fn test_out_of_range_ratio_is_omitted() {
        let mut figures = sample_company();
        figures.current_assets = Some(Decimal::MAX);
        figures.current_liabilities = Some(dec!(0.0001));
        figures.net_income = Some(Decimal::MAX);
        figures.revenue = Some(dec!(10));
        let b = calculate_financial_ratios(&figures);
        assert_eq!(b.current_ratio, None);
        assert_eq!(b.net_profit_margin_percentage, None);
        assert_eq!(b.asset_turnover, Some(dec!(0.0000125)));
        assert!(b.omitted.contains(&"current_ratio".to_string()));
        assert!(b.omitted.contains(&"net_profit_margin_percentage".to_string()));
    }

    #[test]
    fn test_missing_figures_from_json_mapping() {
        let figures: FinancialStatementFigures =
            serde_json::from_str(r#"{"revenue": "500", "net_income": "50"}"#).unwrap();
        let b = calculate_financial_ratios(&figures);
        assert_eq!(b.net_profit_margin_percentage, Some(dec!(10)));
        assert_eq!(b.omitted.len(), 6);
    }
}
