//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by
//! `RUST_LOG`. Output goes to stderr: stdout belongs to the operator's
//! prompts and bills.
//!
//! ```bash
//! # Lifecycle events only
//! RUST_LOG=info cargo run
//!
//! # Full payloads: actions, created orders, appended records
//! RUST_LOG=debug cargo run
//!
//! # Only the actor loops
//! RUST_LOG=biscotti_pos::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`, closing a table reads:
//!
//! ```text
//! INFO Appended order_id=4 table=3
//! INFO Order closed table=3 order_id=Some(OrderId(4)) total=190.00
//! INFO Action ok entity_type="Order" id=3
//! ```
//!
//! Without `RUST_LOG` only errors are printed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and table fields say where a line came from
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
