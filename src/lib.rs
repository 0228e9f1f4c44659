//! PriceFeed - Live item price demo server
//!
//! Serves a small catalog of priced items over HTTP and pushes a full
//! snapshot to every connected WebSocket client after each periodic
//! randomized price mutation.

pub mod broadcast;
pub mod config;
pub mod mutator;
pub mod server;
pub mod store;
