//! In-memory [`LaunchStore`] implementation.
//!
//! Uses a `HashMap` behind a single `std::sync::RwLock`. Every operation
//! holds the lock for its whole read or write, so readers never see a
//! half-updated record and writers to the same key are serialized.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::Launch;

use super::{LaunchStore, ADDED_LAUNCH_CUSTOMER};

/// Process-local launch store.
pub struct InMemoryLaunchStore {
    launches: RwLock<HashMap<i64, Launch>>,
}

impl InMemoryLaunchStore {
    pub fn new() -> Self {
        Self {
            launches: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<i64, Launch>>> {
        self.launches
            .read()
            .map_err(|_| anyhow!("launch store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<i64, Launch>>> {
        self.launches
            .write()
            .map_err(|_| anyhow!("launch store lock poisoned"))
    }
}

impl Default for InMemoryLaunchStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LaunchStore for InMemoryLaunchStore {
    async fn get_all_launches(&self) -> Result<Vec<Launch>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn get_one(&self, flight_number: i64) -> Result<Option<Launch>> {
        Ok(self.read()?.get(&flight_number).cloned())
    }

    async fn remove_one(&self, flight_number: i64) -> Result<Option<Launch>> {
        let mut launches = self.write()?;
        Ok(launches.get_mut(&flight_number).map(|aborted| {
            aborted.upcoming = false;
            aborted.success = Some(false);
            aborted.clone()
        }))
    }

    async fn add_one(&self, mut launch: Launch) -> Result<()> {
        launch.upcoming = true;
        launch.customers = vec![ADDED_LAUNCH_CUSTOMER.to_string()];
        self.write()?.insert(launch.flight_number, launch);
        Ok(())
    }

    async fn upsert_many(&self, launches: Vec<Launch>) -> Result<usize> {
        let count = launches.len();
        let mut stored = self.write()?;
        for launch in launches {
            stored.insert(launch.flight_number, launch);
        }
        Ok(count)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
