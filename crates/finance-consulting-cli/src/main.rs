mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::business::{BreakEvenArgs, PaybackArgs, ProfitMarginArgs, RatiosArgs, RoiArgs};
use commands::calculator::{CompoundArgs, LoanArgs, SavingsArgs};
use commands::charts::ChartCommand;
use config::AppConfig;

/// Financial calculators and business analysis for consulting work
#[derive(Parser)]
#[command(
    name = "fca",
    version,
    about = "Financial calculators and business consulting analysis",
    long_about = "A CLI for loan, compound interest and savings calculations, \
                  business analysis (ROI, break-even, margins, payback, ratios) \
                  and PNG charts, computed with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML config file with defaults, chart and display settings
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment and amortization schedule of a fixed-rate loan
    Loan(LoanArgs),
    /// Compound interest with a yearly breakdown
    Compound(CompoundArgs),
    /// Months needed to reach a savings goal
    Savings(SavingsArgs),
    /// Return on investment, total and annualized
    Roi(RoiArgs),
    /// Units and revenue needed to cover fixed costs
    BreakEven(BreakEvenArgs),
    /// Gross profit and margin
    ProfitMargin(ProfitMarginArgs),
    /// Years to recover an investment from its cash flows
    Payback(PaybackArgs),
    /// Liquidity, leverage and profitability ratios
    Ratios(RatiosArgs),
    /// Render a PNG chart
    #[command(subcommand)]
    Chart(ChartCommand),
    /// Run every calculation on sample scenarios and write the sample charts
    Demo,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::calculator::run_loan(args, &config),
        Commands::Compound(args) => commands::calculator::run_compound(args, &config),
        Commands::Savings(args) => commands::calculator::run_savings(args),
        Commands::Roi(args) => commands::business::run_roi(args),
        Commands::BreakEven(args) => commands::business::run_break_even(args),
        Commands::ProfitMargin(args) => commands::business::run_profit_margin(args),
        Commands::Payback(args) => commands::business::run_payback(args, &config),
        Commands::Ratios(args) => commands::business::run_ratios(args),
        Commands::Chart(command) => commands::charts::run_chart(command, &config),
        Commands::Demo => match commands::demo::run_demo(&config) {
            Ok(()) => return,
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("fca {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, config.display.decimal_places);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
