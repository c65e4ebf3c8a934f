//! # Biscotti Café Point of Sale
//!
//! Order taking, billing and order history for a six-table café, built on
//! two Tokio actors.
//!
//! ## Design
//!
//! ### State lives in actors
//! Each actor is one task owning its state outright; everything else talks to
//! it through a cloneable client. Requests are handled one at a time, so no
//! state is behind a lock.
//!
//! - The **table actor** is a generic [`ResourceActor`](framework::ResourceActor)
//!   keyed by [`TableNumber`](model::TableNumber). Each entry is an
//!   [`Order`](model::Order); at most one order per table is open.
//! - The **history actor** owns the all-time and session history tables, the
//!   order-id counter and the recommendations.
//!
//! ### Late-bound context
//! The table actor gets the menu and a history client at `run()` time, through
//! [`TableContext`](table_actor::TableContext). Closing an order therefore
//! records it directly, and a failed record leaves the order open.
//!
//! ### Typed errors
//! Each actor has its own `thiserror` enum ([`TableError`](table_actor::TableError),
//! [`HistoryError`](history_actor::HistoryError)). Framework failures are
//! mapped back into them by the clients.
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic resource actor, its client and test mocks
//! - [`model`]: dishes, orders and history records
//! - [`menu`], [`billing`], [`recommend`]: pure calculations
//! - [`table_actor`], [`history_actor`]: the two actors
//! - [`clients`]: [`TableClient`](clients::TableClient) and [`HistoryClient`](clients::HistoryClient)
//! - [`config`]: optional `cafe.toml`
//! - [`lifecycle`]: [`CafeSystem`](lifecycle::CafeSystem) startup and shutdown, tracing setup
//! - [`console`]: the operator prompt loop
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod billing;
pub mod clients;
pub mod config;
pub mod console;
pub mod framework;
pub mod history_actor;
pub mod lifecycle;
pub mod menu;
pub mod model;
pub mod recommend;
pub mod table_actor;
