use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::business::break_even::{calculate_break_even_point, BreakEvenResult};
use crate::error::FinanceError;
use crate::types::Money;
use crate::FinanceResult;

use super::canvas::{Canvas, Rgb};
use super::plot::{format_money, format_thousands, LegendEntry, LegendMark, PlotArea};
use super::{to_f64, ChartStyle};

/// Unit axis of the break-even chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenChartOptions {
    pub max_units: u32,
    pub unit_step: u32,
}

impl Default for BreakEvenChartOptions {
    fn default() -> Self {
        BreakEvenChartOptions {
            max_units: 1000,
            unit_step: 10,
        }
    }
}

fn line_functions(analysis: &BreakEvenResult) -> (impl Fn(f64) -> f64, impl Fn(f64) -> f64) {
    let fixed = to_f64(analysis.fixed_costs);
    let variable = to_f64(analysis.variable_cost_per_unit);
    let price = to_f64(analysis.price_per_unit);
    (move |u: f64| fixed + variable * u, move |u: f64| price * u)
}

/// Upper ends of the unit and amount axes. The unit axis is widened to
/// 1.25x the break-even volume, rounded up to a whole step, when the
/// crossing would otherwise fall outside it.
fn axis_extent(analysis: &BreakEvenResult, options: &BreakEvenChartOptions) -> (f64, f64) {
    let step = f64::from(options.unit_step.max(1));
    let break_even_units = to_f64(analysis.break_even_units);
    let mut x_max = f64::from(options.max_units);
    if break_even_units * 1.25 > x_max {
        x_max = (break_even_units * 1.25 / step).ceil() * step;
    }
    let (cost_at, revenue_at) = line_functions(analysis);
    (x_max, cost_at(x_max).max(revenue_at(x_max)) * 1.1)
}

/// Total cost and total revenue against units sold, with profit and loss
/// regions shaded and the break-even volume marked.
///
/// The unit axis widens past `max_units` when the break-even volume lies
/// beyond it, so the crossing is always visible.
pub fn render_break_even_analysis(
    analysis: &BreakEvenResult,
    options: &BreakEvenChartOptions,
    style: &ChartStyle,
) -> Canvas {
    let mut canvas = Canvas::new(style.width, style.height, Rgb::WHITE);

    let break_even_units = to_f64(analysis.break_even_units);
    let (x_max, y_max) = axis_extent(analysis, options);
    let (cost_at, revenue_at) = line_functions(analysis);

    // at most one sample per pixel column, whatever the unit step
    let step = f64::from(options.unit_step.max(1)).max(x_max / f64::from(style.width.max(1)));
    let mut units: Vec<f64> = (0u32..)
        .map(|i| f64::from(i) * step)
        .take_while(|&u| u < x_max)
        .collect();
    units.push(x_max);
    let cost_line: Vec<(f64, f64)> = units.iter().map(|&u| (u, cost_at(u))).collect();
    let revenue_line: Vec<(f64, f64)> = units.iter().map(|&u| (u, revenue_at(u))).collect();

    let area = PlotArea::new(&canvas, (0.0, x_max), (0.0, y_max));
    area.draw_frame(
        &mut canvas,
        "Break-Even Analysis",
        "Units Sold",
        "Amount ($)",
        format_thousands,
        format_money,
    );

    area.fill_band(&mut canvas, Rgb::GREEN, 0.3, |x| {
        let (cost, revenue) = (cost_at(x), revenue_at(x));
        (revenue >= cost).then_some((cost, revenue))
    });
    area.fill_band(&mut canvas, Rgb::RED, 0.3, |x| {
        let (cost, revenue) = (cost_at(x), revenue_at(x));
        (revenue < cost).then_some((revenue, cost))
    });

    area.draw_series(&mut canvas, &cost_line, Rgb::RED, 3);
    area.draw_series(&mut canvas, &revenue_line, Rgb::BLUE, 3);
    area.draw_vline(&mut canvas, break_even_units, Rgb::GREEN, 8);

    let break_even_revenue = to_f64(analysis.break_even_revenue);
    area.annotate(
        &mut canvas,
        break_even_units,
        break_even_revenue,
        &format!(
            "Break-Even: {} units {}",
            format_thousands(break_even_units),
            format_money(break_even_revenue)
        ),
    );

    area.draw_legend(
        &mut canvas,
        &[
            LegendEntry {
                label: "Total Costs",
                color: Rgb::RED,
                mark: LegendMark::Line,
            },
            LegendEntry {
                label: "Total Revenue",
                color: Rgb::BLUE,
                mark: LegendMark::Line,
            },
            LegendEntry {
                label: "Break-Even Point",
                color: Rgb::GREEN,
                mark: LegendMark::Dashed,
            },
            LegendEntry {
                label: "Profit Area",
                color: Rgb::LIGHT_GREEN,
                mark: LegendMark::Area,
            },
            LegendEntry {
                label: "Loss Area",
                color: Rgb(240, 160, 160),
                mark: LegendMark::Area,
            },
        ],
    );

    canvas
}

/// Break-even chart over the default 0..=1000 unit axis.
pub fn plot_break_even_analysis(
    fixed_costs: Money,
    variable_cost_per_unit: Money,
    price_per_unit: Money,
    output_path: impl AsRef<Path>,
) -> FinanceResult<()> {
    plot_break_even_analysis_with(
        fixed_costs,
        variable_cost_per_unit,
        price_per_unit,
        &BreakEvenChartOptions::default(),
        &ChartStyle::default(),
        output_path,
    )
}

pub fn plot_break_even_analysis_with(
    fixed_costs: Money,
    variable_cost_per_unit: Money,
    price_per_unit: Money,
    options: &BreakEvenChartOptions,
    style: &ChartStyle,
    output_path: impl AsRef<Path>,
) -> FinanceResult<()> {
    if options.max_units == 0 {
        return Err(FinanceError::invalid("max_units", "Chart unit axis must be > 0"));
    }
    if options.unit_step == 0 {
        return Err(FinanceError::invalid("unit_step", "Chart unit step must be > 0"));
    }
    let analysis = calculate_break_even_point(fixed_costs, variable_cost_per_unit, price_per_unit)?;
    render_break_even_analysis(&analysis, options, style).save(output_path.as_ref())
}
