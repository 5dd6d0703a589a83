//! # Mission Control Core
//!
//! Shared logic for Mission Control: data models, the habitability filter,
//! and the launch and planet stores.
//!
//! This crate contains no tokio, HTTP, or filesystem I/O. Ingestion lives in
//! the `mission-control` crate, which fills these stores once at startup.

pub mod habitability;
pub mod models;
pub mod store;
