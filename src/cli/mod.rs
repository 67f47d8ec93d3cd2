pub mod convert;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::{RateProvider, RateSnapshot};
use anyhow::{Context, Result};

/// Fetches the rate snapshot behind a spinner.
pub async fn fetch_snapshot(provider: &dyn RateProvider) -> Result<RateSnapshot> {
    let pb = ui::new_spinner("Fetching latest exchange rates...");
    let result = provider.fetch_rates().await;
    pb.finish_and_clear();
    result.context("Could not fetch exchange rates")
}
