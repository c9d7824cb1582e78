//! co2cast CLI - CO2 emission views and seasonal forecasts.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use co2cast_lib::Granularity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "co2cast")]
#[command(about = "CO2 emission views and seasonal forecasts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Survey dataset (CSV)
    #[arg(short, long, global = true, default_value = "stationary_df.csv")]
    data: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List surveyed locations
    Locations,

    /// Show latest reading, statistics and forecast for a location
    View {
        /// Location name, as listed by `locations`
        location: String,

        /// Bucket width (daily, weekly, monthly, yearly)
        #[arg(short, long, default_value = "monthly")]
        granularity: Granularity,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,

        /// Number of buckets to forecast
        #[arg(long, default_value = "30")]
        horizon: usize,

        /// Model fitting budget in milliseconds
        #[arg(long, default_value = "5000")]
        fit_timeout_ms: u64,
    },

    /// Write the monthly forecast of a location to a file
    Forecast {
        /// Location name, as listed by `locations`
        location: String,

        /// Output file path. Defaults to forecasted_data.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Number of buckets to forecast
        #[arg(long, default_value = "30")]
        horizon: usize,

        /// Model fitting budget in milliseconds
        #[arg(long, default_value = "5000")]
        fit_timeout_ms: u64,
    },

    /// Write the resampled series of a location
    Resample {
        /// Location name, as listed by `locations`
        location: String,

        /// Bucket width (daily, weekly, monthly, yearly)
        #[arg(short, long, default_value = "monthly")]
        granularity: Granularity,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Locations => commands::locations::list_locations(&cli.data, cli.quiet).await,
        Commands::View {
            location,
            granularity,
            json,
            horizon,
            fit_timeout_ms,
        } => {
            commands::view::show_view(
                &cli.data,
                location,
                granularity,
                json,
                horizon,
                fit_timeout_ms,
                cli.quiet,
            )
            .await
        }
        Commands::Forecast {
            location,
            output,
            format,
            horizon,
            fit_timeout_ms,
        } => {
            commands::forecast::forecast(
                &cli.data,
                location,
                output,
                format,
                horizon,
                fit_timeout_ms,
                cli.quiet,
            )
            .await
        }
        Commands::Resample {
            location,
            granularity,
            output,
            format,
        } => {
            commands::resample::resample(&cli.data, &location, granularity, output, format, cli.quiet)
                .await
        }
    }
}
