//! Plain data types shared by the actors, the clients and the console.

pub mod food;
pub mod history;
pub mod order;

pub use food::*;
pub use history::*;
pub use order::*;
