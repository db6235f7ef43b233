use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_consulting_core::calculator::compound::{self, CompoundInterestInput};
use finance_consulting_core::calculator::loan::{self, LoanInput};
use finance_consulting_core::calculator::savings::{self, SavingsGoalInput};

use crate::config::AppConfig;
use crate::input;

/// Arguments for a loan payment calculation
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a decimal (e.g. 0.045 for 4.5%); defaults from config
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for compound interest growth
#[derive(Args)]
pub struct CompoundArgs {
    /// Initial deposit
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a decimal; defaults from config
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Compounding periods per year; defaults from config
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a savings-goal timeline
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SavingsArgs {
    /// Target balance
    #[arg(long)]
    pub goal: Option<Decimal>,

    /// Deposit made at the end of every month
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Annual interest rate as a decimal
    #[arg(long, default_value = "0")]
    pub rate: Decimal,

    /// Balance already saved
    #[arg(long, default_value = "0")]
    pub current: Decimal,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(args: LoanArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.unwrap_or(config.defaults.loan_rate),
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };
    let result = loan::analyze_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compound(
    args: CompoundArgs,
    config: &AppConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let compound_input: CompoundInterestInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => CompoundInterestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.unwrap_or(config.defaults.investment_rate),
            years: args.years.ok_or("--years is required (or provide --input)")?,
            compounding_frequency: args
                .frequency
                .unwrap_or(config.defaults.compounding_frequency),
        },
    };
    let result = compound::analyze_compound_interest(&compound_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let savings_input: SavingsGoalInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SavingsGoalInput {
            goal_amount: args.goal.ok_or("--goal is required (or provide --input)")?,
            monthly_contribution: args
                .monthly
                .ok_or("--monthly is required (or provide --input)")?,
            annual_rate: args.rate,
            current_savings: args.current,
        },
    };
    let result = savings::analyze_savings_goal(&savings_input)?;
    Ok(serde_json::to_value(result)?)
}
