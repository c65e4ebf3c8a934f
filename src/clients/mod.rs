//! Type-safe wrappers around the actors' request channels.

pub mod actor_client;
pub mod history_client;
pub mod table_client;

pub use actor_client::*;
pub use history_client::*;
pub use table_client::*;
