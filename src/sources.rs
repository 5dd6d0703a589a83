use anyhow::Result;

use crate::config::Config;

pub fn list_sources(config: &Config) -> Result<()> {
    // The feed is only checked during bootstrap; report its settings here.
    let feed_status = format!("timeout {}s", config.launches.timeout_secs);

    let dataset = &config.planets.path;
    let dataset_status = if dataset.is_file() {
        ("OK", true)
    } else {
        ("MISSING", false)
    };

    println!("{:<10} {:<12} {:<8} LOCATION", "SOURCE", "STATUS", "HEALTHY");
    println!(
        "{:<10} {:<12} {:<8} {}",
        "launches", feed_status, "-", config.launches.feed_url
    );
    println!(
        "{:<10} {:<12} {:<8} {}",
        "planets",
        dataset_status.0,
        dataset_status.1,
        dataset.display()
    );

    Ok(())
}
