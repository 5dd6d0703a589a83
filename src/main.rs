//! # Mission Control CLI (`mc`)
//!
//! Every command that touches a store first runs the startup bootstrap
//! (launch feed download + Kepler dataset load), applies the strict or
//! degraded startup policy, and then calls the in-process store operations.
//! Nothing is persisted between invocations.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mc sources` | Show the configured feed and dataset |
//! | `mc bootstrap` | Ingest both datasets and print the startup report |
//! | `mc launches list` | List all launches |
//! | `mc launches get <id>` | Show one launch |
//! | `mc launches abort <id>` | Mark a launch aborted and show it |
//! | `mc launches add ...` | Insert a new upcoming launch |
//! | `mc planets list` | List habitable planets |
//!
//! ## Examples
//!
//! ```bash
//! mc --config ./config/mc.toml bootstrap
//! RUST_LOG=debug mc launches get 42
//! mc --degraded planets list --json
//! ```

use clap::{Parser, Subcommand};
use mission_control::{config, ingest, launches, logging, planets, sources};
use mission_control_core::models::Launch;
use std::path::PathBuf;

/// Mission Control: launch history and habitable exoplanet stores.
#[derive(Parser)]
#[command(
    name = "mc",
    about = "Mission Control: launch history and habitable exoplanet stores",
    version
)]
struct Cli {
    /// Path to a TOML configuration file. Built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Continue when one of the two ingestions fails.
    ///
    /// Overrides `[startup].allow_degraded` from the config file.
    #[arg(long, global = true)]
    degraded: bool,

    /// Log at debug level unless `RUST_LOG` is set.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the configured launch feed and planet dataset.
    Sources,

    /// Run both ingestions and print the startup report.
    Bootstrap {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Work with the launch store.
    Launches {
        #[command(subcommand)]
        action: LaunchAction,
    },

    /// Work with the planet store.
    Planets {
        #[command(subcommand)]
        action: PlanetAction,
    },
}

/// Launch store subcommands.
#[derive(Subcommand)]
enum LaunchAction {
    /// List every launch.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one launch by flight number.
    Get { id: i64 },

    /// Abort a launch (it stays in the store, marked not upcoming and failed).
    Abort { id: i64 },

    /// Insert a launch. It is always stored as upcoming with the default customer.
    Add {
        #[arg(long)]
        flight_number: i64,
        #[arg(long)]
        mission: String,
        #[arg(long)]
        rocket: String,
        /// Launch date as a Unix timestamp.
        #[arg(long)]
        launch_date: i64,
        #[arg(long)]
        target: Option<String>,
    },
}

/// Planet store subcommands.
#[derive(Subcommand)]
enum PlanetAction {
    /// List habitable planets.
    List {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = config::load_or_default(cli.config.as_deref())?;

    let degraded = cli.degraded || cfg.startup.allow_degraded;

    match cli.command {
        Commands::Sources => sources::list_sources(&cfg)?,
        Commands::Bootstrap { json } => {
            let (_mc, report) = start(&cfg, degraded).await?;
            print_report(&report, json)?;
        }
        Commands::Launches { action } => {
            let (mc, _) = start(&cfg, degraded).await?;
            match action {
                LaunchAction::List { json } => launches::run_list(&*mc.launches, json).await?,
                LaunchAction::Get { id } => launches::run_get(&*mc.launches, id).await?,
                LaunchAction::Abort { id } => launches::run_abort(&*mc.launches, id).await?,
                LaunchAction::Add {
                    flight_number,
                    mission,
                    rocket,
                    launch_date,
                    target,
                } => {
                    let launch = Launch {
                        flight_number,
                        mission,
                        rocket,
                        customers: Vec::new(),
                        launch_date,
                        upcoming: true,
                        success: None,
                        target,
                    };
                    launches::run_add(&*mc.launches, launch).await?;
                }
            }
        }
        Commands::Planets { action } => {
            let (mc, _) = start(&cfg, degraded).await?;
            match action {
                PlanetAction::List { json } => planets::run_list(&mc.planets, json)?,
            }
        }
    }

    Ok(())
}

/// Ingest both datasets and apply the startup policy.
async fn start(
    cfg: &config::Config,
    degraded: bool,
) -> anyhow::Result<(ingest::MissionControl, ingest::StartupReport)> {
    let (mc, report) = ingest::bootstrap(cfg).await;
    report.check(degraded)?;
    Ok((mc, report))
}

fn print_report(report: &ingest::StartupReport, json: bool) -> anyhow::Result<()> {
    if json {
        let value = serde_json::json!({
            "launches": outcome_json(&report.launches)?,
            "planets": outcome_json(&report.planets)?,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("bootstrap");
    match &report.launches {
        Ok(r) => {
            println!("  launches fetched: {}", r.fetched);
            println!("  launches stored: {}", r.stored);
            println!("  launches skipped: {}", r.skipped.len());
        }
        Err(e) => println!("  launches: FAILED ({})", e),
    }
    match &report.planets {
        Ok(r) => {
            println!("  planet rows read: {}", r.rows_read);
            println!("  habitable planets: {}", r.habitable);
            println!("  planet rows skipped: {}", r.skipped.len());
        }
        Err(e) => println!("  planets: FAILED ({})", e),
    }
    println!("{}", if report.is_complete() { "ok" } else { "degraded" });
    Ok(())
}

fn outcome_json<T: serde::Serialize>(
    outcome: &Result<T, mission_control::error::IngestError>,
) -> anyhow::Result<serde_json::Value> {
    Ok(match outcome {
        Ok(r) => serde_json::to_value(r)?,
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    })
}
