use std::path::Path;

use crate::calculator::compound::{
    calculate_compound_interest, CompoundInterestResult, DEFAULT_COMPOUNDING_FREQUENCY,
};
use crate::types::{Money, Rate};
use crate::FinanceResult;

use super::canvas::{Canvas, Rgb};
use super::plot::{format_money, format_thousands, interpolate, LegendEntry, LegendMark, PlotArea};
use super::{percent_label, to_f64, ChartStyle};

/// Growth curve of the balance, shaded above the initial deposit, with
/// year-end markers from the yearly breakdown.
pub fn render_investment_growth(growth: &CompoundInterestResult, style: &ChartStyle) -> Canvas {
    let mut canvas = Canvas::new(style.width, style.height, Rgb::WHITE);

    let principal = to_f64(growth.principal);
    let periodic = to_f64(growth.annual_rate) / f64::from(growth.compounding_frequency);
    // monthly points, thinned to one per pixel column on long horizons
    let samples = growth.years.saturating_mul(12).clamp(1, style.width.max(1));
    let curve: Vec<(f64, f64)> = (0..=samples)
        .map(|i| {
            let t = f64::from(growth.years) * f64::from(i) / f64::from(samples);
            let periods = f64::from(growth.compounding_frequency) * t;
            (t, principal * (1.0 + periodic).powf(periods))
        })
        .collect();

    let final_value = to_f64(growth.final_amount);
    let y_high = principal.max(final_value) * 1.15;
    let area = PlotArea::new(&canvas, (0.0, f64::from(growth.years)), (0.0, y_high));

    let title = format!(
        "Investment Growth: {} at {} annual rate",
        format_money(principal),
        percent_label(growth.annual_rate)
    );
    area.draw_frame(
        &mut canvas,
        &title,
        "Years",
        "Investment Value ($)",
        format_thousands,
        format_money,
    );

    area.fill_band(&mut canvas, Rgb::LIGHT_GREEN, 0.3, |x| {
        interpolate(&curve, x).map(|v| (principal, v))
    });
    area.draw_hline(&mut canvas, principal, Rgb::RED, 8);
    area.draw_series(&mut canvas, &curve, Rgb::GREEN, 3);

    for point in &growth.yearly_breakdown {
        let (px, py) = area.to_px(f64::from(point.year), to_f64(point.amount));
        canvas.fill_rect(px - 3, py - 3, 7, 7, Rgb::GREEN);
    }

    area.annotate(
        &mut canvas,
        f64::from(growth.years),
        final_value,
        &format!("Final Value: {}", format_money(final_value)),
    );

    area.draw_legend(
        &mut canvas,
        &[
            LegendEntry {
                label: "Investment Value",
                color: Rgb::GREEN,
                mark: LegendMark::Line,
            },
            LegendEntry {
                label: "Initial Investment",
                color: Rgb::RED,
                mark: LegendMark::Dashed,
            },
        ],
    );

    canvas
}

/// Compound `principal` monthly for `years` and write the growth chart to `output_path`.
pub fn plot_investment_growth(
    principal: Money,
    annual_rate: Rate,
    years: u32,
    output_path: impl AsRef<Path>,
) -> FinanceResult<()> {
    let growth =
        calculate_compound_interest(principal, annual_rate, years, DEFAULT_COMPOUNDING_FREQUENCY)?;
    render_investment_growth(&growth, &ChartStyle::default()).save(output_path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_growth() {
        let growth = calculate_compound_interest(dec!(10_000), dec!(0.07), 20, 12).unwrap();
        let canvas = render_investment_growth(&growth, &ChartStyle::default());
        assert_eq!(canvas.width(), 1200);
    }

    #[test]
    fn test_curve_shading_and_final_value_marker() {
        let growth = calculate_compound_interest(dec!(10_000), dec!(0.07), 20, 12).unwrap();
        let canvas = render_investment_growth(&growth, &ChartStyle::default());
        let final_value = to_f64(growth.final_amount);
        let area = PlotArea::new(&canvas, (0.0, 20.0), (0.0, final_value * 1.15));

        let (x, y) = area.to_px(20.0, final_value);
        assert_eq!(canvas.pixel(x, y), Some(Rgb::BLACK));

        // year 12: principal 10,000, balance about 23,119
        let (x, y) = area.to_px(12.0, 16_500.0);
        let Rgb(r, g, _) = canvas.pixel(x, y).unwrap();
        assert!(g > r, "growth band is {:?}", (r, g));

        let (x, y) = area.to_px(12.0, 5_000.0);
        assert_eq!(canvas.pixel(x, y), Some(Rgb::WHITE));
    }

    #[test]
    fn test_long_horizon_renders() {
        let growth = calculate_compound_interest(dec!(1_000), dec!(0.001), 1000, 12).unwrap();
        let canvas = render_investment_growth(&growth, &ChartStyle::default());
        let area = PlotArea::new(&canvas, (0.0, 1000.0), (0.0, to_f64(growth.final_amount) * 1.15));
        let (x, y) = area.to_px(1000.0, to_f64(growth.final_amount));
        assert_eq!(canvas.pixel(x, y), Some(Rgb::BLACK));
    }

    #[test]
    fn test_rejects_invalid_inputs_before_writing() {
        let dir = std::env::temp_dir().join("fca-growth-never-written.png");
        let err = plot_investment_growth(dec!(0), dec!(0.07), 20, &dir).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!dir.exists());
    }
}
