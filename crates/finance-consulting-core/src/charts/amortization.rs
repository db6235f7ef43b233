use std::path::Path;

use crate::calculator::loan::{calculate_loan_payment, LoanPaymentResult};
use crate::types::{Money, Rate};
use crate::FinanceResult;

use super::canvas::{Canvas, Rgb};
use super::plot::{format_money, format_thousands, interpolate, LegendEntry, LegendMark, PlotArea};
use super::{percent_label, to_f64, ChartStyle};

const AREA_ALPHA: f64 = 0.7;

/// Stacked principal-vs-interest areas for every month of the schedule.
pub fn render_loan_amortization(loan: &LoanPaymentResult, style: &ChartStyle) -> Canvas {
    let mut canvas = Canvas::new(style.width, style.height, Rgb::WHITE);

    let principal_pts: Vec<(f64, f64)> = loan
        .schedule
        .iter()
        .map(|e| (f64::from(e.period_index), to_f64(e.principal_component)))
        .collect();
    let total_pts: Vec<(f64, f64)> = loan
        .schedule
        .iter()
        .map(|e| {
            (
                f64::from(e.period_index),
                to_f64(e.principal_component + e.interest_component),
            )
        })
        .collect();

    let payment = to_f64(loan.monthly_payment);
    let area = PlotArea::new(&canvas, (1.0, f64::from(loan.months())), (0.0, payment * 1.15));

    let title = format!(
        "Loan Amortization: {} at {} for {} years",
        format_money(to_f64(loan.principal)),
        percent_label(loan.annual_rate),
        loan.years
    );
    area.draw_frame(
        &mut canvas,
        &title,
        "Month",
        "Payment ($)",
        format_thousands,
        format_money,
    );

    area.fill_band(&mut canvas, Rgb::BLUE, AREA_ALPHA, |x| {
        interpolate(&principal_pts, x).map(|p| (0.0, p))
    });
    area.fill_band(&mut canvas, Rgb::ORANGE, AREA_ALPHA, |x| {
        let low = interpolate(&principal_pts, x)?;
        let high = interpolate(&total_pts, x)?;
        Some((low, high))
    });

    area.draw_legend(
        &mut canvas,
        &[
            LegendEntry {
                label: "Principal Payment",
                color: Rgb::BLUE,
                mark: LegendMark::Area,
            },
            LegendEntry {
                label: "Interest Payment",
                color: Rgb::ORANGE,
                mark: LegendMark::Area,
            },
        ],
    );

    canvas
}

/// Compute the loan's schedule and write its amortization chart to `output_path`.
pub fn plot_loan_amortization(
    principal: Money,
    annual_rate: Rate,
    years: u32,
    output_path: impl AsRef<Path>,
) -> FinanceResult<()> {
    let loan = calculate_loan_payment(principal, annual_rate, years)?;
    render_loan_amortization(&loan, &ChartStyle::default()).save(output_path.as_ref())
}
