//! PNG charts of calculator and analyzer outputs. Rendering only: every
//! number plotted comes from the `calculator` and `business` modules.

pub mod amortization;
pub mod break_even;
pub mod canvas;
pub mod font;
pub mod growth;
pub mod plot;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use amortization::{plot_loan_amortization, render_loan_amortization};
pub use break_even::{
    plot_break_even_analysis, plot_break_even_analysis_with, render_break_even_analysis,
    BreakEvenChartOptions,
};
pub use canvas::{Canvas, Rgb};
pub use growth::{plot_investment_growth, render_investment_growth};

/// Raster size of a rendered chart in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            width: 1200,
            height: 800,
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn percent_label(rate: Decimal) -> String {
    format!("{:.1}%", to_f64(rate) * 100.0)
}
