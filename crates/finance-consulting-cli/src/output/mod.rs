pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, decimal_places: u32) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, decimal_places),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Numbers arrive as decimal strings; round those for display and pass
/// everything else through untouched.
pub fn display_number(raw: &str, decimal_places: u32) -> String {
    match raw.parse::<rust_decimal::Decimal>() {
        Ok(d) => d
            .round_dp_with_strategy(decimal_places, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_number_rounds_half_up() {
        assert_eq!(display_number("1266.7132745647", 2), "1266.71");
        assert_eq!(display_number("0.125", 2), "0.13");
        assert_eq!(display_number("Reached", 2), "Reached");
    }
}
