//! Launch commands.
//!
//! Thin wrappers over [`LaunchStore`] used by `mc launches ...`. Each command
//! prints to stdout; lookups that miss are reported as errors so the process
//! exits non-zero.

use anyhow::{bail, Result};
use mission_control_core::models::Launch;
use mission_control_core::store::LaunchStore;

/// `mc launches list`: every launch, sorted by flight number for display.
pub async fn run_list(store: &dyn LaunchStore, json: bool) -> Result<()> {
    let mut launches = store.get_all_launches().await?;
    launches.sort_by_key(|l| l.flight_number);

    if json {
        println!("{}", serde_json::to_string_pretty(&launches)?);
        return Ok(());
    }

    println!(
        "{:<8} {:<28} {:<14} {:<22} STATUS",
        "FLIGHT", "MISSION", "ROCKET", "DATE"
    );
    for l in &launches {
        println!(
            "{:<8} {:<28} {:<14} {:<22} {}",
            l.flight_number,
            truncate(&l.mission, 28),
            truncate(&l.rocket, 14),
            format_ts_iso(l.launch_date),
            status(l)
        );
    }
    println!("{} launches", launches.len());
    Ok(())
}

/// `mc launches get <id>`
pub async fn run_get(store: &dyn LaunchStore, flight_number: i64) -> Result<()> {
    match store.get_one(flight_number).await? {
        Some(launch) => {
            print_launch(&launch);
            Ok(())
        }
        None => bail!("launch not found: {}", flight_number),
    }
}

/// `mc launches abort <id>`
pub async fn run_abort(store: &dyn LaunchStore, flight_number: i64) -> Result<()> {
    match store.remove_one(flight_number).await? {
        Some(launch) => {
            println!("aborted launch {}", flight_number);
            print_launch(&launch);
            Ok(())
        }
        None => bail!("launch not found: {}", flight_number),
    }
}

/// `mc launches add ...`: inserts, then prints the stored record.
pub async fn run_add(store: &dyn LaunchStore, launch: Launch) -> Result<()> {
    let flight_number = launch.flight_number;
    store.add_one(launch).await?;
    match store.get_one(flight_number).await? {
        Some(stored) => {
            println!("added launch {}", flight_number);
            print_launch(&stored);
            Ok(())
        }
        None => bail!("launch {} missing right after insert", flight_number),
    }
}

pub fn print_launch(launch: &Launch) {
    println!("--- Launch ---");
    println!("flight:     {}", launch.flight_number);
    println!("mission:    {}", launch.mission);
    println!("rocket:     {}", launch.rocket);
    println!("date:       {}", format_ts_iso(launch.launch_date));
    println!("status:     {}", status(launch));
    if let Some(ref target) = launch.target {
        println!("target:     {}", target);
    }
    if launch.customers.is_empty() {
        println!("customers:  (none)");
    } else {
        println!("customers:  {}", launch.customers.join(", "));
    }
}

fn status(launch: &Launch) -> &'static str {
    match (launch.upcoming, launch.success) {
        (true, _) => "upcoming",
        (false, Some(true)) => "success",
        (false, Some(false)) => "failed/aborted",
        (false, None) => "unknown",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
