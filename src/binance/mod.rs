//! Binance market-data fetch layer
//!
//! Thin REST collaborator around the analysis core: fetches one depth
//! snapshot and one recent-trades page from the spot or USD-M futures API
//! and converts the wire shapes into core types. Public endpoints only; no
//! signing, no streaming, no caching.

pub mod client;
pub mod types;

pub use client::{MarketDataClient, MarketKind};
pub use types::{DepthSnapshot, RawTrade};
