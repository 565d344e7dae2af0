//! Error types for the input and configuration surfaces
//!
//! The valuation core never fails; these errors only come from reading
//! cashflow files and interpreting configuration strings.

use std::path::PathBuf;

/// Top-level error type for irr_calc.
#[derive(Debug, thiserror::Error)]
pub enum IrrError {
    #[error("failed to read cashflow file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed cashflow CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid timing offset '{value}' (expected 0, 0.5 or 1)")]
    InvalidTimingOffset { value: String },
}

pub type Result<T> = std::result::Result<T, IrrError>;
