use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use finance_consulting_core::charts::{BreakEvenChartOptions, ChartStyle};

/// Defaults applied when a rate or frequency flag is omitted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FinancialDefaults {
    pub loan_rate: Decimal,
    pub investment_rate: Decimal,
    pub compounding_frequency: u32,
    pub payback_horizon_years: u32,
}

impl Default for FinancialDefaults {
    fn default() -> Self {
        FinancialDefaults {
            loan_rate: dec!(0.05),
            investment_rate: dec!(0.07),
            compounding_frequency: 12,
            payback_horizon_years: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartSettings {
    pub reports_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub max_units: u32,
    pub unit_step: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            reports_dir: PathBuf::from("reports"),
            width: 1200,
            height: 800,
            max_units: 1000,
            unit_step: 10,
        }
    }
}

impl ChartSettings {
    pub fn style(&self) -> ChartStyle {
        ChartStyle {
            width: self.width,
            height: self.height,
        }
    }

    pub fn break_even_options(&self) -> BreakEvenChartOptions {
        BreakEvenChartOptions {
            max_units: self.max_units,
            unit_step: self.unit_step,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub decimal_places: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: "$".to_string(),
            decimal_places: 2,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: FinancialDefaults,
    pub charts: ChartSettings,
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Load from `path` when given, otherwise fall back to built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => {
                debug!("No config file given; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
