//! Launch feed connector.
//!
//! Downloads the launch history feed (a JSON array of launch records), decodes
//! each element into a typed intermediate shape, flattens it into a
//! [`Launch`], and writes the batch into a [`LaunchStore`].
//!
//! # Feed shape
//!
//! ```json
//! [
//!   {
//!     "flight_number": 1,
//!     "mission_name": "FalconSat",
//!     "rocket": {
//!       "rocket_name": "Falcon 1",
//!       "second_stage": { "payloads": [ { "customers": ["DARPA"] } ] }
//!     },
//!     "launch_date_unix": 1143239400,
//!     "upcoming": false,
//!     "launch_success": false
//!   }
//! ]
//! ```
//!
//! # Failure handling
//!
//! - Transport errors, timeouts, non-2xx statuses, and bodies that are not a
//!   JSON array fail the whole pass with [`IngestError::FetchFailure`]. The
//!   store is not touched.
//! - An element missing a required field (including the nested `rocket`,
//!   `second_stage`, or `payloads`) is skipped and reported as a
//!   [`MalformedRecord`]; the remaining elements are still stored.
//! - The store is written once, after the whole feed has been normalized.

use std::time::Duration;

use async_trait::async_trait;
use mission_control_core::models::Launch;
use mission_control_core::store::LaunchStore;
use serde::{Deserialize, Serialize};

use crate::config::LaunchesConfig;
use crate::error::{IngestError, MalformedRecord};

/// Source of the raw launch feed body.
///
/// [`HttpLaunchFeed`] is the production implementation; tests can supply a
/// canned body.
#[async_trait]
pub trait LaunchFeed: Send + Sync {
    /// Location reported in logs and errors.
    fn url(&self) -> &str;

    /// Fetch the raw feed body.
    async fn fetch(&self) -> Result<String, IngestError>;
}

/// Fetches the feed with a single HTTP GET, bounded by a timeout.
pub struct HttpLaunchFeed {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpLaunchFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, IngestError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::fetch(&url, e))?;
        Ok(Self {
            url,
            timeout,
            client,
        })
    }

    pub fn from_config(config: &LaunchesConfig) -> Result<Self, IngestError> {
        Self::new(
            config.feed_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn describe(&self, err: reqwest::Error) -> IngestError {
        if err.is_timeout() {
            IngestError::fetch(
                &self.url,
                format!("timed out after {}s", self.timeout.as_secs_f64()),
            )
        } else {
            IngestError::fetch(&self.url, err)
        }
    }
}

#[async_trait]
impl LaunchFeed for HttpLaunchFeed {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, IngestError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.describe(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, %status, "problem downloading launch data");
            return Err(IngestError::fetch(
                &self.url,
                format!("unexpected status {}", status),
            ));
        }

        response.text().await.map_err(|e| self.describe(e))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Feed records
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct RawLaunch {
    flight_number: i64,
    mission_name: String,
    rocket: RawRocket,
    launch_date_unix: i64,
    upcoming: bool,
    launch_success: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawRocket {
    rocket_name: String,
    second_stage: RawSecondStage,
}

#[derive(Debug, Deserialize)]
struct RawSecondStage {
    payloads: Vec<RawPayload>,
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    // The feed sends `null` for payloads without customers.
    customers: Option<Vec<String>>,
}

impl From<RawLaunch> for Launch {
    fn from(raw: RawLaunch) -> Self {
        let customers = raw
            .rocket
            .second_stage
            .payloads
            .into_iter()
            .flat_map(|payload| payload.customers.unwrap_or_default())
            .collect();

        Launch {
            flight_number: raw.flight_number,
            mission: raw.mission_name,
            rocket: raw.rocket.rocket_name,
            customers,
            launch_date: raw.launch_date_unix,
            upcoming: raw.upcoming,
            success: raw.launch_success,
            target: None,
        }
    }
}

/// Result of decoding a feed body.
#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub launches: Vec<Launch>,
    pub skipped: Vec<MalformedRecord>,
}

/// Decode a feed body into launches, skipping malformed elements.
///
/// Fails only when the body as a whole is not a JSON array.
pub fn parse_launch_feed(body: &str) -> Result<ParsedFeed, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body)?;

    let mut parsed = ParsedFeed::default();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<RawLaunch>(record) {
            Ok(raw) => {
                tracing::debug!(flight_number = raw.flight_number, "decoded launch record");
                parsed.launches.push(raw.into());
            }
            Err(e) => parsed.skipped.push(MalformedRecord {
                index,
                reason: e.to_string(),
            }),
        }
    }
    Ok(parsed)
}

/// Summary of one launch ingestion pass.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchSyncReport {
    /// Elements in the feed array.
    pub fetched: usize,
    /// Launches written to the store.
    pub upserted: usize,
    /// Launches in the store after the write. Lower than `upserted` when the
    /// feed repeats a flight number.
    pub stored: usize,
    pub skipped: Vec<MalformedRecord>,
}

/// Download the launch feed and populate `store`.
pub async fn download_launch_data(
    feed: &dyn LaunchFeed,
    store: &dyn LaunchStore,
) -> Result<LaunchSyncReport, IngestError> {
    tracing::info!(url = %feed.url(), "downloading launch data");

    let body = feed.fetch().await?;
    let parsed = parse_launch_feed(&body)
        .map_err(|e| IngestError::fetch(feed.url(), format!("feed is not a JSON array: {}", e)))?;

    for skipped in &parsed.skipped {
        tracing::warn!(index = skipped.index, reason = %skipped.reason, "skipping malformed launch record");
    }

    let fetched = parsed.launches.len() + parsed.skipped.len();
    let upserted = store.upsert_many(parsed.launches).await?;
    let stored = store.len().await?;

    tracing::info!("Downloaded data for {} launches", stored);

    Ok(LaunchSyncReport {
        fetched,
        upserted,
        stored,
        skipped: parsed.skipped,
    })
}

/// Build an HTTP feed from config and run [`download_launch_data`].
pub async fn sync_launches(
    config: &LaunchesConfig,
    store: &dyn LaunchStore,
) -> Result<LaunchSyncReport, IngestError> {
    let feed = HttpLaunchFeed::from_config(config)?;
    download_launch_data(&feed, store).await
}
