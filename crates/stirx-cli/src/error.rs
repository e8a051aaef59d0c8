//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid tenor.
    #[error("Invalid tenor: {0}. Use forms like 3M, 1Y, 2W.")]
    InvalidTenor(String),

    /// Invalid futures price.
    #[error("Invalid price: {0}. Must be between 0 and 200.")]
    InvalidPrice(String),

    /// Invalid decimal number.
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber {
        /// Argument name.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] stirx_config::ConfigError),

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(#[from] stirx_core::StirError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
