use anyhow::Result;
use cambio::core::log::init_logging;
use cambio::core::{CurrencyKey, Direction};
use clap::{CommandFactory, Parser, Subcommand};

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

impl From<Commands> for cambio::AppCommand {
    fn from(cmd: Commands) -> cambio::AppCommand {
        match cmd {
            Commands::Rates => cambio::AppCommand::Rates,
            Commands::Convert {
                amount,
                currency,
                to_local,
                no_chart,
            } => cambio::AppCommand::Convert {
                amount,
                currency,
                direction: if to_local {
                    Direction::ForeignToLocal
                } else {
                    Direction::LocalToForeign
                },
                chart: !no_chart,
            },
            Commands::History => cambio::AppCommand::History,
            Commands::ClearHistory { yes } => cambio::AppCommand::ClearHistory { assume_yes: yes },
            Commands::Chart { currency } => cambio::AppCommand::Chart { currency },
            Commands::Interactive => cambio::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the current rate of every indicator
    Rates,
    /// Convert an amount between CLP and an indicator
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// One of dolar, euro, utm, uf, bitcoin
        currency: CurrencyKey,
        /// Convert from the indicator into CLP instead of CLP into the indicator
        #[arg(long)]
        to_local: bool,
        /// Skip the trend chart
        #[arg(long)]
        no_chart: bool,
    },
    /// Display the conversion history
    History,
    /// Delete the conversion history
    ClearHistory {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Display the last 10 observations of an indicator
    Chart {
        /// One of dolar, euro, utm, uf, bitcoin
        currency: CurrencyKey,
    },
    /// Convert repeatedly in one session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cambio::cli::setup::setup(),
        Some(cmd) => cambio::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
