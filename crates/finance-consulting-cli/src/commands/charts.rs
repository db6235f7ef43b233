use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use finance_consulting_core::business::break_even::calculate_break_even_point;
use finance_consulting_core::calculator::compound::calculate_compound_interest;
use finance_consulting_core::calculator::loan::calculate_loan_payment;
use finance_consulting_core::charts;

use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum ChartCommand {
    /// Stacked principal vs interest per month
    Loan(LoanChartArgs),
    /// Compound growth curve of an investment
    Growth(GrowthChartArgs),
    /// Cost and revenue lines with the break-even point
    BreakEven(BreakEvenChartArgs),
}

#[derive(Args)]
pub struct LoanChartArgs {
    #[arg(long)]
    pub principal: Decimal,
    /// Annual rate as a decimal; defaults from config
    #[arg(long)]
    pub rate: Option<Decimal>,
    #[arg(long)]
    pub years: u32,
    /// Output PNG path; defaults to <reports_dir>/loan_amortization.png
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct GrowthChartArgs {
    #[arg(long)]
    pub principal: Decimal,
    /// Annual rate as a decimal; defaults from config
    #[arg(long)]
    pub rate: Option<Decimal>,
    #[arg(long)]
    pub years: u32,
    /// Output PNG path; defaults to <reports_dir>/investment_growth.png
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct BreakEvenChartArgs {
    #[arg(long)]
    pub fixed_costs: Decimal,
    #[arg(long)]
    pub variable_cost: Decimal,
    #[arg(long)]
    pub price: Decimal,
    /// Right edge of the unit axis; defaults from config
    #[arg(long)]
    pub max_units: Option<u32>,
    /// Output PNG path; defaults to <reports_dir>/breakeven_analysis.png
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_chart(
    command: ChartCommand,
    config: &AppConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let settings = &config.charts;
    let style = settings.style();

    let (kind, path) = match command {
        ChartCommand::Loan(args) => {
            let path = resolve_output(args.out, "loan_amortization.png", config)?;
            let rate = args.rate.unwrap_or(config.defaults.loan_rate);
            let loan = calculate_loan_payment(args.principal, rate, args.years)?;
            charts::render_loan_amortization(&loan, &style).save(&path)?;
            ("loan_amortization", path)
        }
        ChartCommand::Growth(args) => {
            let path = resolve_output(args.out, "investment_growth.png", config)?;
            let rate = args.rate.unwrap_or(config.defaults.investment_rate);
            let growth = calculate_compound_interest(
                args.principal,
                rate,
                args.years,
                config.defaults.compounding_frequency,
            )?;
            charts::render_investment_growth(&growth, &style).save(&path)?;
            ("investment_growth", path)
        }
        ChartCommand::BreakEven(args) => {
            let path = resolve_output(args.out, "breakeven_analysis.png", config)?;
            let mut options = settings.break_even_options();
            if let Some(max_units) = args.max_units {
                options.max_units = max_units;
            }
            charts::plot_break_even_analysis_with(
                args.fixed_costs,
                args.variable_cost,
                args.price,
                &options,
                &style,
                &path,
            )?;
            ("breakeven_analysis", path)
        }
    };

    Ok(chart_summary(kind, &path, config))
}

/// Explicit `--out` paths are used as given; the default lands in the
/// reports directory, which is created on demand.
fn resolve_output(
    out: Option<PathBuf>,
    file_name: &str,
    config: &AppConfig,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match out {
        Some(path) => Ok(path),
        None => {
            ensure_reports_dir(config)?;
            Ok(config.charts.reports_dir.join(file_name))
        }
    }
}

pub fn chart_summary(kind: &str, path: &Path, config: &AppConfig) -> Value {
    json!({
        "result": {
            "chart": kind,
            "path": path.display().to_string(),
            "width": config.charts.width,
            "height": config.charts.height,
        },
        "methodology": "PNG chart",
        "warnings": [],
    })
}

/// Make sure the reports directory exists before charts are written into it.
pub fn ensure_reports_dir(config: &AppConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let dir = &config.charts.reports_dir;
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create '{}': {}", dir.display(), e))?;
    Ok(true)
}
