use finance_consulting_core::business::{break_even, margin, payback, ratios, roi};
use finance_consulting_core::FinanceError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// ROI
// ===========================================================================

#[test]
fn test_roi_boundary_case() {
    let r = roi::calculate_roi(dec!(100_000), dec!(150_000), dec!(3)).unwrap();
    assert_eq!(r.roi_percentage, dec!(50));
    assert!((r.annualized_return_percentage - dec!(14.47)).abs() < dec!(0.005));
}

#[test]
fn test_roi_fractional_years() {
    let r = roi::calculate_roi(dec!(1_000), dec!(1_100), dec!(0.5)).unwrap();
    // 1.1^2 - 1 = 21%
    assert!((r.annualized_return_percentage - dec!(21)).abs() < dec!(0.0001));
}

#[test]
fn test_roi_total_loss_cannot_be_annualized() {
    match roi::calculate_roi(dec!(1_000), dec!(-10), dec!(2)) {
        Err(FinanceError::InvalidArgument { field, .. }) => assert_eq!(field, "final_value"),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

// ===========================================================================
// Break-even
// ===========================================================================

#[test]
fn test_break_even_boundary_case() {
    let r = break_even::calculate_break_even_point(dec!(50_000), dec!(20), dec!(50)).unwrap();
    assert_eq!(r.contribution_margin, dec!(30));
    assert_eq!(r.break_even_units.round_dp(2), dec!(1666.67));
    assert_eq!(r.break_even_revenue.round_dp(2), dec!(83333.33));
}

#[test]
fn test_break_even_sample_businesses() {
    let tech = break_even::calculate_break_even_point(dec!(200_000), dec!(15), dec!(50)).unwrap();
    assert_eq!(tech.break_even_units.round_dp(2), dec!(5714.29));

    let retail = break_even::calculate_break_even_point(dec!(400_000), dec!(25), dec!(45)).unwrap();
    assert_eq!(retail.break_even_units, dec!(20_000));
    assert_eq!(retail.break_even_revenue, dec!(900_000));
}

#[test]
fn test_break_even_requires_positive_margin() {
    for price in [dec!(19.99), dec!(20), dec!(0)] {
        let err = break_even::calculate_break_even_point(dec!(50_000), dec!(20), price).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

// ===========================================================================
// Profit margin & payback
// ===========================================================================

#[test]
fn test_profit_margin_envelope() {
    let out = margin::analyze_profit_margin(&margin::ProfitMarginInput {
        revenue: dec!(500_000),
        cost: dec!(350_000),
    })
    .unwrap();
    assert_eq!(
        out.result,
        margin::ProfitMarginResult {
            revenue: dec!(500_000),
            cost: dec!(350_000),
            gross_profit: dec!(150_000),
            margin_percentage: dec!(30),
            profit_ratio: dec!(0.3),
        }
    );
}

#[test]
fn test_payback_level_and_uneven_agree_for_constant_flows() {
    let level = payback::calculate_payback_period(dec!(90_000), dec!(20_000)).unwrap();
    let uneven =
        payback::calculate_payback_period_uneven(dec!(90_000), &[dec!(20_000); 6]).unwrap();
    assert_eq!(level.payback_years, dec!(4.5));
    assert_eq!(uneven.payback_years, dec!(4.5));
    assert_eq!(level, uneven);
}

#[test]
fn test_payback_rejects_non_positive_cash_flow() {
    assert!(payback::calculate_payback_period(dec!(1_000), dec!(-10))
        .unwrap_err()
        .is_invalid_argument());
    assert!(payback::calculate_payback_period_uneven(dec!(1_000), &[])
        .unwrap_err()
        .is_invalid_argument());
}

// ===========================================================================
// Ratio bundle
// ===========================================================================

#[test]
fn test_ratio_bundle_for_sample_company() {
    let figures = ratios::FinancialStatementFigures {
        revenue: Some(dec!(500_000)),
        net_income: Some(dec!(50_000)),
        total_assets: Some(dec!(300_000)),
        current_assets: Some(dec!(150_000)),
        current_liabilities: Some(dec!(75_000)),
        ..Default::default()
    };
    let out = ratios::analyze_financial_ratios(&figures).unwrap();
    let b = &out.result;
    assert_eq!(b.current_ratio, Some(dec!(2)));
    assert_eq!(b.net_profit_margin_percentage, Some(dec!(10)));
    assert_eq!(
        b.omitted,
        vec!["quick_ratio", "debt_to_equity", "return_on_equity_percentage"]
    );
    assert_eq!(out.warnings.len(), 3);
}

#[test]
fn test_ratio_bundle_never_fails_on_zeros() {
    let figures = ratios::FinancialStatementFigures {
        revenue: Some(Decimal::ZERO),
        net_income: Some(Decimal::ZERO),
        total_assets: Some(Decimal::ZERO),
        current_assets: Some(Decimal::ZERO),
        current_liabilities: Some(Decimal::ZERO),
        inventory: Some(Decimal::ZERO),
        total_liabilities: Some(Decimal::ZERO),
        total_equity: Some(Decimal::ZERO),
    };
    let b = ratios::calculate_financial_ratios(&figures);
    assert_eq!(b.omitted.len(), 7);
    assert_eq!(b.asset_turnover, None);
}
