use clap::{Parser, Subcommand};
use fxconv::cli::ui;
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the available currencies and their rates
    Rates,
    /// Convert an amount from one currency to another
    Convert {
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. EUR
        to: String,
        /// Amount of the source currency
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Also convert the same amount from the target back to the source currency
        #[arg(short, long)]
        reverse: bool,
    },
    /// Convert currencies interactively (default)
    Interactive,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Rates => fxconv::AppCommand::Rates,
            Commands::Convert {
                from,
                to,
                amount,
                reverse,
            } => fxconv::AppCommand::Convert {
                from,
                to,
                amount,
                reverse,
            },
            Commands::Interactive => fxconv::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            fxconv::run_command(fxconv::AppCommand::Interactive, cli.config_path.as_deref()).await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        eprintln!(
            "{}",
            ui::style_text(&format!("Error: {e:#}"), ui::StyleType::Error)
        );
        std::process::exit(1);
    }
}
