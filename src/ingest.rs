//! Startup ingestion.
//!
//! [`bootstrap`] runs the launch and planet pipelines concurrently, builds
//! both stores, and returns them together with a [`StartupReport`]. Stores
//! are only handed out once both pipelines have finished, so nothing can
//! read them mid-ingestion.
//!
//! A failed pipeline leaves its store empty. The caller decides, through
//! [`StartupReport::check`], whether that is fatal or a degraded start.

use std::sync::Arc;

use anyhow::{bail, Result};
use mission_control_core::store::memory::InMemoryLaunchStore;
use mission_control_core::store::PlanetStore;

use crate::config::Config;
use crate::connector_launches::{self, LaunchFeed, LaunchSyncReport};
use crate::connector_planets::{self, PlanetLoadReport};
use crate::error::IngestError;

/// The stores every caller shares after startup.
#[derive(Clone)]
pub struct MissionControl {
    pub launches: Arc<InMemoryLaunchStore>,
    pub planets: PlanetStore,
}

/// Outcome of each ingestion pipeline.
#[derive(Debug)]
pub struct StartupReport {
    pub launches: Result<LaunchSyncReport, IngestError>,
    pub planets: Result<PlanetLoadReport, IngestError>,
}

impl StartupReport {
    pub fn is_complete(&self) -> bool {
        self.launches.is_ok() && self.planets.is_ok()
    }

    /// Names of the pipelines that failed.
    pub fn failed(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if self.launches.is_err() {
            failed.push("launches");
        }
        if self.planets.is_err() {
            failed.push("planets");
        }
        failed
    }

    /// Decide whether startup may proceed.
    ///
    /// Succeeds when every pipeline succeeded, or when `allow_degraded` is set
    /// and at least one pipeline succeeded. Each failure is logged either way.
    pub fn check(&self, allow_degraded: bool) -> Result<()> {
        if let Err(e) = &self.launches {
            tracing::error!(error = %e, "launch ingestion failed");
        }
        if let Err(e) = &self.planets {
            tracing::error!(error = %e, "planet ingestion failed");
        }

        let failed = self.failed();
        if failed.is_empty() {
            return Ok(());
        }
        if allow_degraded && failed.len() < 2 {
            tracing::warn!(failed = ?failed, "continuing with degraded stores");
            return Ok(());
        }
        bail!("startup failed: {} ingestion failed", failed.join(" and "))
    }
}

/// Run both ingestions from configuration.
pub async fn bootstrap(config: &Config) -> (MissionControl, StartupReport) {
    match connector_launches::HttpLaunchFeed::from_config(&config.launches) {
        Ok(feed) => bootstrap_with_feed(config, &feed).await,
        Err(e) => {
            let (planets, planet_report) = load_planets(config).await;
            (
                MissionControl {
                    launches: Arc::new(InMemoryLaunchStore::new()),
                    planets,
                },
                StartupReport {
                    launches: Err(e),
                    planets: planet_report,
                },
            )
        }
    }
}

/// Run both ingestions, taking launches from `feed`.
pub async fn bootstrap_with_feed(
    config: &Config,
    feed: &dyn LaunchFeed,
) -> (MissionControl, StartupReport) {
    let launches = Arc::new(InMemoryLaunchStore::new());

    let (launch_report, (planets, planet_report)) = tokio::join!(
        connector_launches::download_launch_data(feed, &*launches),
        load_planets(config),
    );

    (
        MissionControl { launches, planets },
        StartupReport {
            launches: launch_report,
            planets: planet_report,
        },
    )
}

async fn load_planets(config: &Config) -> (PlanetStore, Result<PlanetLoadReport, IngestError>) {
    let path = config.planets.path.clone();
    let criteria = config.planets.criteria;

    // CSV parsing is blocking I/O; keep it off the runtime threads.
    let task_path = path.clone();
    let joined = tokio::task::spawn_blocking(move || {
        connector_planets::load_planets_data(&task_path, &criteria)
    })
    .await;

    match joined {
        Ok(Ok(load)) => (PlanetStore::new(load.planets), Ok(load.report)),
        Ok(Err(e)) => (PlanetStore::default(), Err(e)),
        Err(join_err) => (
            PlanetStore::default(),
            Err(IngestError::data_unavailable(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, join_err),
            )),
        ),
    }
}
