//! Core library surface for the Travel Planner terminal application.
//!
//! `db` holds the SQLite-backed store for plans and their itinerary details,
//! `ui` is the terminal front-end driving it.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// The persistence handle `main.rs` opens once and hands to the UI.
pub use db::Store;

/// Error types callers branch on: validation is recoverable, storage is not.
pub use error::{Result, StoreError, ValidationError};

/// The two records the store reads and writes.
pub use models::{Plan, PlanDetail};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
