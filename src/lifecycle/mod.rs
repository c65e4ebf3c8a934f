//! # System Lifecycle
//!
//! Starting, wiring and stopping the café's actors.
//!
//! ## Startup
//!
//! ```text
//! CafeConfig ──> MenuCatalog ─────────────┐
//!            └─> HistoryStore::load ──> history actor ──> HistoryClient
//!                                                            │
//!                    table actor.run(TableContext { menu, history })
//! ```
//!
//! ## Shutdown
//!
//! 1. Flush history (the only disk write of a run)
//! 2. Drop the table client; the table actor exits and releases its history client
//! 3. Drop the history client; the history actor exits
//! 4. Join both tasks
//!
//! [`setup_tracing`](tracing::setup_tracing) installs the log subscriber.

pub mod cafe_system;
pub mod tracing;

pub use cafe_system::*;
