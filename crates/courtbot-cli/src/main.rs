mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "courtbot")]
#[command(about = "Court reservation tool for the club booking site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List open courts for a day inside the booking window.
    OpenCourts {
        /// Weekday to inspect, e.g. "Tuesday".
        #[arg(long)]
        day: String,
    },
    /// Book a court slot and attach a partner.
    Reserve {
        /// Weekday inside the booking window.
        #[arg(long)]
        day: String,
        /// Court number as shown in the grid header.
        #[arg(long)]
        court: u32,
        /// Slot start time, e.g. "9:00 AM".
        #[arg(long)]
        time: String,
        /// Partner's display name, typed into the player search.
        #[arg(long)]
        partner_name: String,
        /// Membership number that picks the partner from the suggestions.
        #[arg(long)]
        partner_membership: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = courtbot_core::load_app_config()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::OpenCourts { day } => commands::run_open_courts(&config, &day).await,
        Commands::Reserve {
            day,
            court,
            time,
            partner_name,
            partner_membership,
        } => {
            commands::run_reserve(
                &config,
                &day,
                court,
                &time,
                partner_name,
                partner_membership,
            )
            .await
        }
    }
}
