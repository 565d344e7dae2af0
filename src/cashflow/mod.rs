//! Cashflow sequences and their input sources

mod series;
pub mod loader;

pub use series::CashflowSeries;
pub use loader::{load_cashflows, load_cashflows_from_reader, parse_cashflow};
