use colored::Colorize;
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use finance_consulting_core::business::{
    calculate_break_even_point, calculate_financial_ratios, calculate_payback_period_uneven,
    calculate_profit_margin, calculate_roi, FinancialStatementFigures,
};
use finance_consulting_core::calculator::{
    calculate_compound_interest, calculate_loan_payment, calculate_savings_goal,
};
use finance_consulting_core::charts::{self, BreakEvenChartOptions};
use finance_consulting_core::{round_currency, round_percentage};

use crate::commands::charts::ensure_reports_dir;
use crate::config::AppConfig;

pub struct LoanScenario {
    pub name: &'static str,
    pub principal: Decimal,
    pub annual_rate: Decimal,
    pub years: u32,
}

pub struct InvestmentScenario {
    pub name: &'static str,
    pub principal: Decimal,
    pub annual_rate: Decimal,
    pub years: u32,
}

pub struct BusinessScenario {
    pub name: &'static str,
    pub figures: FinancialStatementFigures,
    pub fixed_costs: Decimal,
    pub variable_cost_per_unit: Decimal,
    pub price_per_unit: Decimal,
}

pub fn loan_scenarios() -> Vec<LoanScenario> {
    vec![
        LoanScenario {
            name: "Home Mortgage",
            principal: dec!(250_000),
            annual_rate: dec!(0.045),
            years: 30,
        },
        LoanScenario {
            name: "Car Loan",
            principal: dec!(25_000),
            annual_rate: dec!(0.06),
            years: 5,
        },
        LoanScenario {
            name: "Personal Loan",
            principal: dec!(10_000),
            annual_rate: dec!(0.12),
            years: 3,
        },
    ]
}

pub fn investment_scenarios() -> Vec<InvestmentScenario> {
    vec![
        InvestmentScenario {
            name: "Retirement Fund",
            principal: dec!(50_000),
            annual_rate: dec!(0.08),
            years: 25,
        },
        InvestmentScenario {
            name: "Education Fund",
            principal: dec!(20_000),
            annual_rate: dec!(0.06),
            years: 10,
        },
        InvestmentScenario {
            name: "Emergency Fund",
            principal: dec!(5_000),
            annual_rate: dec!(0.03),
            years: 5,
        },
    ]
}

pub fn business_scenarios() -> Vec<BusinessScenario> {
    vec![
        BusinessScenario {
            name: "Tech Startup",
            figures: FinancialStatementFigures {
                revenue: Some(dec!(500_000)),
                total_assets: Some(dec!(300_000)),
                current_assets: Some(dec!(150_000)),
                current_liabilities: Some(dec!(75_000)),
                net_income: Some(dec!(50_000)),
                ..Default::default()
            },
            fixed_costs: dec!(200_000),
            variable_cost_per_unit: dec!(15),
            price_per_unit: dec!(50),
        },
        BusinessScenario {
            name: "Retail Business",
            figures: FinancialStatementFigures {
                revenue: Some(dec!(1_200_000)),
                total_assets: Some(dec!(800_000)),
                current_assets: Some(dec!(400_000)),
                current_liabilities: Some(dec!(200_000)),
                net_income: Some(dec!(150_000)),
                ..Default::default()
            },
            fixed_costs: dec!(400_000),
            variable_cost_per_unit: dec!(25),
            price_per_unit: dec!(45),
        },
    ]
}

/// Cents with thousands separators and the configured currency symbol.
pub fn format_money(value: Decimal, config: &AppConfig) -> String {
    let rounded = round_currency(value.abs());
    let text = format!("{:.2}", rounded);
    let (whole, cents) = text.split_once('.').unwrap_or((&text, "00"));
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{}{grouped}.{cents}", config.display.currency_symbol)
}

fn percent(value: Decimal, config: &AppConfig) -> String {
    format!("{}%", round_percentage(value, config.display.decimal_places))
}

fn header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!(" {}", title.bold());
    println!("{}", "=".repeat(60));
}

fn line(label: &str, value: String) {
    println!("  {:<28} {}", format!("{label}:"), value);
}

fn demonstrate_calculations(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    header("FINANCIAL CALCULATIONS");

    for scenario in loan_scenarios() {
        let r = calculate_loan_payment(scenario.principal, scenario.annual_rate, scenario.years)?;
        println!(
            "\n{}: {} at {} for {} years",
            scenario.name.cyan(),
            format_money(scenario.principal, config),
            percent(scenario.annual_rate * dec!(100), config),
            scenario.years
        );
        line("Monthly Payment", format_money(r.monthly_payment, config));
        line("Total Payment", format_money(r.total_payment, config));
        line("Total Interest", format_money(r.total_interest, config));
    }

    for scenario in investment_scenarios() {
        let r = calculate_compound_interest(
            scenario.principal,
            scenario.annual_rate,
            scenario.years,
            config.defaults.compounding_frequency,
        )?;
        println!(
            "\n{}: {} at {} for {} years",
            scenario.name.cyan(),
            format_money(scenario.principal, config),
            percent(scenario.annual_rate * dec!(100), config),
            scenario.years
        );
        line("Final Amount", format_money(r.final_amount, config));
        line("Interest Earned", format_money(r.total_interest, config));
        line("Growth", percent(r.growth_percentage, config));
    }

    let savings = calculate_savings_goal(dec!(50_000), dec!(500), dec!(0.03))?;
    println!("\n{}: save $50,000 with $500 monthly at 3%", "Savings Goal".cyan());
    match (savings.months_required, savings.years_required) {
        (Some(months), Some(years)) => {
            line("Months To Goal", months.to_string());
            line("Years To Goal", years.round_dp(1).to_string());
        }
        _ => line("Months To Goal", "unreachable".yellow().to_string()),
    }
    Ok(())
}

fn demonstrate_business_analysis(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    header("BUSINESS CONSULTING ANALYSIS");

    let roi = calculate_roi(dec!(100_000), dec!(150_000), dec!(3))?;
    println!("\n{}: $100,000 returning $150,000 over 3 years", "ROI".cyan());
    line("ROI", percent(roi.roi_percentage, config));
    line("Annualized Return", percent(roi.annualized_return_percentage, config));

    let margin = calculate_profit_margin(dec!(500_000), dec!(350_000))?;
    println!("\n{}: revenue $500,000, costs $350,000", "Profit Margin".cyan());
    line("Profit", format_money(margin.gross_profit, config));
    line("Margin", percent(margin.margin_percentage, config));

    let flows = [dec!(25_000), dec!(30_000), dec!(35_000), dec!(40_000), dec!(45_000)];
    let payback = calculate_payback_period_uneven(dec!(100_000), &flows)?;
    println!("\n{}: $100,000 against rising annual cash flows", "Payback".cyan());
    line("Payback Years", payback.payback_years.round_dp(2).to_string());
    line("Payback Months", payback.payback_months.round_dp(1).to_string());

    for scenario in business_scenarios() {
        println!("\n{}", scenario.name.cyan());
        match calculate_break_even_point(
            scenario.fixed_costs,
            scenario.variable_cost_per_unit,
            scenario.price_per_unit,
        ) {
            Ok(be) => {
                line("Break-Even Units", be.break_even_units.round_dp(2).to_string());
                line("Break-Even Revenue", format_money(be.break_even_revenue, config));
                line("Contribution Margin", format_money(be.contribution_margin, config));
            }
            Err(e) => line("Break-Even", e.to_string().red().to_string()),
        }
        let ratios = calculate_financial_ratios(&scenario.figures);
        let show = |v: Option<Decimal>| {
            v.map(|d| d.round_dp(config.display.decimal_places).to_string())
                .unwrap_or_else(|| "n/a".into())
        };
        line("Current Ratio", show(ratios.current_ratio));
        line("Asset Turnover", show(ratios.asset_turnover));
        line("Return On Assets %", show(ratios.return_on_assets_percentage));
        line("Net Profit Margin %", show(ratios.net_profit_margin_percentage));
    }
    Ok(())
}

fn create_sample_reports(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    header("GENERATING SAMPLE REPORTS");

    if ensure_reports_dir(config)? {
        println!("Created {} directory", config.charts.reports_dir.display());
    }
    let dir = &config.charts.reports_dir;
    let style = config.charts.style();

    let loan = calculate_loan_payment(dec!(250_000), dec!(0.045), 30)?;
    let loan_path = dir.join("loan_amortization.png");
    charts::render_loan_amortization(&loan, &style).save(&loan_path)?;
    println!("Chart saved to {}", loan_path.display());

    let growth = calculate_compound_interest(
        dec!(10_000),
        dec!(0.07),
        20,
        config.defaults.compounding_frequency,
    )?;
    let growth_path = dir.join("investment_growth.png");
    charts::render_investment_growth(&growth, &style).save(&growth_path)?;
    println!("Chart saved to {}", growth_path.display());

    let options = BreakEvenChartOptions {
        max_units: config.charts.max_units.max(2000),
        unit_step: config.charts.unit_step,
    };
    let be_path = dir.join("breakeven_analysis.png");
    charts::plot_break_even_analysis_with(dec!(50_000), dec!(20), dec!(50), &options, &style, &be_path)?;
    println!("Chart saved to {}", be_path.display());

    info!("demo reports written to {}", dir.display());
    Ok(())
}

/// Run every calculation on the built-in scenarios and write the sample charts.
pub fn run_demo(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    demonstrate_calculations(config)?;
    demonstrate_business_analysis(config)?;
    create_sample_reports(config)?;
    header("DEMONSTRATION COMPLETE");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        let config = AppConfig::default();
        assert_eq!(format_money(dec!(1266.7132), &config), "$1,266.71");
        assert_eq!(format_money(dec!(456016.785), &config), "$456,016.79");
        assert_eq!(format_money(dec!(-25), &config), "-$25.00");
        assert_eq!(format_money(dec!(999), &config), "$999.00");
    }

    #[test]
    fn test_sample_scenarios_are_valid() {
        for s in loan_scenarios() {
            assert!(calculate_loan_payment(s.principal, s.annual_rate, s.years).is_ok(), "{}", s.name);
        }
        for s in investment_scenarios() {
            assert!(calculate_compound_interest(s.principal, s.annual_rate, s.years, 12).is_ok(), "{}", s.name);
        }
        for s in business_scenarios() {
            assert!(
                calculate_break_even_point(s.fixed_costs, s.variable_cost_per_unit, s.price_per_unit).is_ok(),
                "{}",
                s.name
            );
            assert!(calculate_financial_ratios(&s.figures).current_ratio.is_some());
        }
    }
}
