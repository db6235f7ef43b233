use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid argument: {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("I/O error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chart encoding error: {0}")]
    ChartEncoding(String),
}

impl FinanceError {
    /// Shorthand for the precondition failures every formula reports.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinanceError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// An intermediate or final value left the representable Decimal range.
    pub fn overflow(field: &str) -> Self {
        Self::invalid(field, "result overflows Decimal range")
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FinanceError::InvalidArgument { .. })
    }
}
