//! Command-line interface for legalytics.

mod commands;

pub use commands::{is_verbose, run};
