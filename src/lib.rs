//! # Mission Control
//!
//! Ingests two independent datasets into in-memory stores: the launch history
//! feed (HTTP, JSON) and the NASA Kepler objects-of-interest catalog (CSV,
//! filtered down to habitable candidates).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐
//! │ Launch feed  │──▶│ flatten/upsert │──▶│ LaunchStore  │
//! │ (HTTP JSON)  │   └────────────────┘   │ (RwLock map) │
//! └──────────────┘                        └──────────────┘
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐
//! │ Kepler CSV   │──▶│ filter/project │──▶│ PlanetStore  │
//! └──────────────┘   └────────────────┘   │ (read-only)  │
//!                                         └──────────────┘
//! ```
//!
//! Both pipelines run once, in [`ingest::bootstrap`], before any caller gets
//! a handle to the stores.
//!
//! ## Quick Start
//!
//! ```bash
//! mc sources                    # show configured feed and dataset
//! mc bootstrap                  # ingest both and print the report
//! mc launches list
//! mc launches abort 42
//! mc planets list --json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Ingestion error taxonomy |
//! | [`connector_launches`] | Launch feed download and normalization |
//! | [`connector_planets`] | Kepler CSV loading, filtering, projection |
//! | [`ingest`] | Startup bootstrap and readiness report |
//! | [`launches`] | Launch store commands |
//! | [`planets`] | Planet store commands |
//! | [`sources`] | Source listing |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! Models, the habitability filter, and the stores live in
//! `mission-control-core`.

pub mod config;
pub mod connector_launches;
pub mod connector_planets;
pub mod error;
pub mod ingest;
pub mod launches;
pub mod logging;
pub mod planets;
pub mod sources;
