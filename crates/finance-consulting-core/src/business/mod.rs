//! Business analysis formulas: ROI, break-even, margins, payback and
//! statement ratios.

pub mod break_even;
pub mod margin;
pub mod payback;
pub mod ratios;
pub mod roi;

pub use break_even::{calculate_break_even_point, BreakEvenResult};
pub use margin::{calculate_profit_margin, ProfitMarginResult};
pub use payback::{calculate_payback_period, calculate_payback_period_uneven, PaybackPeriodResult};
pub use ratios::{calculate_financial_ratios, FinancialRatioBundle, FinancialStatementFigures};
pub use roi::{calculate_roi, RoiResult};
