//! Record stores for Mission Control.
//!
//! The [`LaunchStore`] trait defines the keyed, mutable launch collection
//! that callers read and write after startup. [`PlanetStore`] is a fixed
//! snapshot built once by the planet ingestion and never mutated.
//!
//! Implementations of [`LaunchStore`] must be `Send + Sync` to be shared
//! across async request handlers.

pub mod memory;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Launch, Planet};

/// Customer list forced onto every launch inserted through [`LaunchStore::add_one`].
pub const ADDED_LAUNCH_CUSTOMER: &str = "FindFocus Holdings";

/// Abstract launch store keyed by flight number.
///
/// Lookup misses are `Ok(None)`, never errors. Errors are reserved for
/// store-level failures (e.g. a poisoned lock) and are always surfaced.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`get_all_launches`](LaunchStore::get_all_launches) | Every record, in no particular order |
/// | [`get_one`](LaunchStore::get_one) | One record by flight number |
/// | [`remove_one`](LaunchStore::remove_one) | Mark a record aborted (logical delete) |
/// | [`add_one`](LaunchStore::add_one) | Insert a new upcoming launch |
/// | [`upsert_many`](LaunchStore::upsert_many) | Batch insert used by ingestion |
#[async_trait]
pub trait LaunchStore: Send + Sync {
    /// Return every launch. Callers must not rely on the order.
    async fn get_all_launches(&self) -> Result<Vec<Launch>>;

    /// Return the launch with this flight number, if any.
    async fn get_one(&self, flight_number: i64) -> Result<Option<Launch>>;

    /// Abort a launch: set `upcoming = false` and `success = Some(false)`.
    ///
    /// The record stays in the store. Returns the aborted record, or `None`
    /// when no launch has this flight number.
    async fn remove_one(&self, flight_number: i64) -> Result<Option<Launch>>;

    /// Insert `launch` keyed by its flight number, overwriting any existing
    /// record. `upcoming` is forced to `true` and `customers` is replaced by
    /// `[ADDED_LAUNCH_CUSTOMER]`.
    async fn add_one(&self, launch: Launch) -> Result<()>;

    /// Insert or overwrite each launch as-is, all under one write.
    ///
    /// Returns the number of records written.
    async fn upsert_many(&self, launches: Vec<Launch>) -> Result<usize>;

    /// Number of stored launches.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Read-only collection of habitable planets.
///
/// Cloning is cheap; every clone shares the same snapshot.
#[derive(Debug, Clone)]
pub struct PlanetStore {
    planets: Arc<[Planet]>,
}

impl PlanetStore {
    pub fn new(planets: Vec<Planet>) -> Self {
        Self {
            planets: planets.into(),
        }
    }

    pub fn get_all_planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

impl Default for PlanetStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
