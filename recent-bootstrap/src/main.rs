use anyhow::Result;
use clap::{Parser, Subcommand};

use recent_bootstrap::context::AppContext;
use recent_bootstrap::{lifecycle, telemetry};
use recent_domain::{AccountId, Region};

#[derive(Parser, Debug)]
#[command(name = "recent-db")]
#[command(about = "Per-player ship statistics history", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the refresh and compaction schedules until interrupted
    Run,
    /// Refresh every tracked player of a region now
    Refresh {
        #[arg(long)]
        region: Region,
    },
    /// Migrate and compact stored records
    Compact {
        #[arg(long)]
        region: Option<Region>,
    },
    /// Start tracking a player and take a first snapshot
    Track {
        #[arg(long)]
        region: Region,
        #[arg(long)]
        account: u64,
        #[arg(long)]
        premium: bool,
    },
    /// Print a stored snapshot as JSON
    Show {
        #[arg(long)]
        region: Region,
        #[arg(long)]
        account: u64,
        /// Unix timestamp; the next snapshot at or after it is shown
        #[arg(long)]
        at: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("RECENT_CONFIG", config);
    }

    let context = {
        let _startup_log = telemetry::console_default();
        AppContext::new().await?
    };
    let _log_guard = telemetry::init_tracing(context.config.log_dir.as_deref())?;

    match args.command {
        Command::Run => lifecycle::run_daemon(context).await,
        Command::Refresh { region } => lifecycle::refresh_once(context, region).await,
        Command::Compact { region } => lifecycle::compact_once(context, region).await,
        Command::Track {
            region,
            account,
            premium,
        } => lifecycle::track(context, region, AccountId(account), premium).await,
        Command::Show {
            region,
            account,
            at,
        } => lifecycle::show(context, region, AccountId(account), at).await,
    }
}
