// Library exports for market-pulse

pub mod error;

pub mod config; // Heuristic configuration
pub mod market; // Core domain types

pub mod analysis; // Metric computation and scoring core

pub mod binance; // REST market-data fetch layer
pub mod report; // Markdown rendering of analysis results
