pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "calculator")]
pub mod calculator;

#[cfg(feature = "business")]
pub mod business;

#[cfg(feature = "charts")]
pub mod charts;

pub use error::FinanceError;
pub use types::*;

/// Standard result type for all finance-consulting operations
pub type FinanceResult<T> = Result<T, FinanceError>;
