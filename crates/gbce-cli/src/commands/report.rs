use serde_json::Value;

use gbce_core::{Market, UtcDateTime};

use crate::error::CliError;

/// Per-metric failures are part of the report, so this only fails on
/// serialization.
pub fn run(market: &Market, as_of: Option<UtcDateTime>) -> Result<Value, CliError> {
    Ok(serde_json::to_value(market.report(as_of))?)
}
