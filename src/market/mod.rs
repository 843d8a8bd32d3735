//! Core market domain types
//!
//! Snapshot inputs the analysis engine operates on: an order book of resting
//! quotes and an execution-ordered trade tape.

pub mod types;

pub use types::{OrderBook, OrderBookLevel, Side, Trade};
