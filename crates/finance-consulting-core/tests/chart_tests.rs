use finance_consulting_core::charts::{self, BreakEvenChartOptions, ChartStyle};
use finance_consulting_core::FinanceError;
use rust_decimal_macros::dec;
use std::fs;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn assert_png(path: &std::path::Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() > 8);
    assert_eq!(bytes[..8], PNG_SIGNATURE);
}

#[test]
fn test_writes_all_three_charts() {
    let dir = tempfile::tempdir().unwrap();

    let loan = dir.path().join("loan_amortization.png");
    charts::plot_loan_amortization(dec!(250_000), dec!(0.045), 30, &loan).unwrap();
    assert_png(&loan);

    let growth = dir.path().join("investment_growth.png");
    charts::plot_investment_growth(dec!(10_000), dec!(0.07), 20, &growth).unwrap();
    assert_png(&growth);

    let break_even = dir.path().join("breakeven_analysis.png");
    charts::plot_break_even_analysis_with(
        dec!(50_000),
        dec!(20),
        dec!(50),
        &BreakEvenChartOptions {
            max_units: 2000,
            unit_step: 10,
        },
        &ChartStyle::default(),
        &break_even,
    )
    .unwrap();
    assert_png(&break_even);
}

#[test]
fn test_unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-subdir").join("chart.png");
    match charts::plot_loan_amortization(dec!(1_000), dec!(0.05), 1, &path) {
        Err(FinanceError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_zero_rate_loan_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.png");
    charts::plot_loan_amortization(dec!(12_000), dec!(0), 1, &path).unwrap();
    assert_png(&path);
}

#[test]
fn test_distant_break_even_chart_is_written() {
    // break-even at 10 billion units on a 10-unit step
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("distant.png");
    charts::plot_break_even_analysis(dec!(100_000_000), dec!(0), dec!(0.01), &path).unwrap();
    assert_png(&path);
}

#[test]
fn test_extreme_rate_loan_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("century.png");
    charts::plot_loan_amortization(dec!(100_000), dec!(1.0), 100, &path).unwrap();
    assert_png(&path);
}
