use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_consulting_core::business::break_even::{self, BreakEvenInput};
use finance_consulting_core::business::margin::{self, ProfitMarginInput};
use finance_consulting_core::business::payback::{
    self, CashFlowProfile, PaybackInput, PaybackPeriodResult,
};
use finance_consulting_core::business::ratios::{self, FinancialStatementFigures};
use finance_consulting_core::business::roi::{self, RoiInput};
use finance_consulting_core::ComputationOutput;

use crate::config::AppConfig;
use crate::input;

/// Arguments for return on investment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RoiArgs {
    /// Amount invested
    #[arg(long)]
    pub initial: Option<Decimal>,

    /// Value at the end of the holding period
    #[arg(long = "final")]
    pub final_value: Option<Decimal>,

    /// Holding period in years (may be fractional)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for break-even analysis
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Total fixed costs
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,

    /// Variable cost per unit
    #[arg(long)]
    pub variable_cost: Option<Decimal>,

    /// Selling price per unit
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for profit margin
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProfitMarginArgs {
    /// Total revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Total costs
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for payback period
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaybackArgs {
    /// Amount invested
    #[arg(long)]
    pub initial: Option<Decimal>,

    /// Level annual cash flow
    #[arg(long, conflicts_with = "cash_flows")]
    pub annual_cash_flow: Option<Decimal>,

    /// Comma-separated year-by-year cash flows, e.g. 25000,30000,35000
    #[arg(long, value_delimiter = ',')]
    pub cash_flows: Vec<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for financial ratio analysis
#[derive(Args)]
pub struct RatiosArgs {
    #[arg(long)]
    pub revenue: Option<Decimal>,
    #[arg(long, allow_hyphen_values = true)]
    pub net_income: Option<Decimal>,
    #[arg(long)]
    pub total_assets: Option<Decimal>,
    #[arg(long)]
    pub current_assets: Option<Decimal>,
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,
    #[arg(long)]
    pub inventory: Option<Decimal>,
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,
    #[arg(long, allow_hyphen_values = true)]
    pub total_equity: Option<Decimal>,

    /// Path to a JSON or YAML file with named statement figures
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_input: RoiInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RoiInput {
            initial_investment: args
                .initial
                .ok_or("--initial is required (or provide --input)")?,
            final_value: args
                .final_value
                .ok_or("--final is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };
    let result = roi::analyze_roi(&roi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let be_input: BreakEvenInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => BreakEvenInput {
            fixed_costs: args
                .fixed_costs
                .ok_or("--fixed-costs is required (or provide --input)")?,
            variable_cost_per_unit: args
                .variable_cost
                .ok_or("--variable-cost is required (or provide --input)")?,
            price_per_unit: args.price.ok_or("--price is required (or provide --input)")?,
        },
    };
    let result = break_even::analyze_break_even(&be_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_profit_margin(args: ProfitMarginArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pm_input: ProfitMarginInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ProfitMarginInput {
            revenue: args.revenue.ok_or("--revenue is required (or provide --input)")?,
            cost: args.cost.ok_or("--cost is required (or provide --input)")?,
        },
    };
    let result = margin::analyze_profit_margin(&pm_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Flag a payback period longer than the configured planning horizon.
fn warn_past_horizon(output: &mut ComputationOutput<PaybackPeriodResult>, horizon_years: u32) {
    let years = output.result.payback_years;
    if years > Decimal::from(horizon_years) {
        output.warnings.push(format!(
            "Payback of {} years exceeds the {horizon_years}-year planning horizon.",
            years.round_dp(2)
        ));
    }
}

pub fn run_payback(
    args: PaybackArgs,
    config: &AppConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let pb_input: PaybackInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let cash_flows = match (args.annual_cash_flow, args.cash_flows.is_empty()) {
                (Some(annual_cash_flow), _) => CashFlowProfile::Level { annual_cash_flow },
                (None, false) => CashFlowProfile::Uneven {
                    annual_cash_flows: args.cash_flows,
                },
                (None, true) => {
                    return Err(
                        "--annual-cash-flow or --cash-flows is required (or provide --input)"
                            .into(),
                    )
                }
            };
            PaybackInput {
                initial_investment: args
                    .initial
                    .ok_or("--initial is required (or provide --input)")?,
                cash_flows,
            }
        }
    };
    let mut result = payback::analyze_payback(&pb_input)?;
    warn_past_horizon(&mut result, config.defaults.payback_horizon_years);
    Ok(serde_json::to_value(result)?)
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let figures: FinancialStatementFigures = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FinancialStatementFigures {
            revenue: args.revenue,
            net_income: args.net_income,
            total_assets: args.total_assets,
            current_assets: args.current_assets,
            current_liabilities: args.current_liabilities,
            inventory: args.inventory,
            total_liabilities: args.total_liabilities,
            total_equity: args.total_equity,
        },
    };
    let result = ratios::analyze_financial_ratios(&figures)?;
    Ok(serde_json::to_value(result)?)
}
