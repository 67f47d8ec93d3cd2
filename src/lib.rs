pub mod cli;
pub mod core;
pub mod providers;

use crate::core::{RateProvider, RateTable, config::AppConfig};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Rates,
    Convert {
        from: String,
        to: String,
        amount: f64,
        reverse: bool,
    },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::FxRatesProvider::from_config(&config.provider);
    run_with_provider(command, &provider).await
}

/// Fetches rates once from `provider` and executes `command` against them.
pub async fn run_with_provider(command: AppCommand, provider: &dyn RateProvider) -> Result<()> {
    let snapshot = cli::fetch_snapshot(provider).await?;

    match command {
        AppCommand::Rates => {
            cli::rates::run(snapshot);
            Ok(())
        }
        AppCommand::Convert {
            from,
            to,
            amount,
            reverse,
        } => cli::convert::run(&RateTable::from(snapshot), &from, &to, amount, reverse),
        AppCommand::Interactive => {
            let table = RateTable::from(snapshot);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            let history = cli::interactive::run(&table, &mut stdin.lock(), &mut stdout)?;
            debug!(conversions = history.len(), "Interactive session finished");
            Ok(())
        }
    }
}
