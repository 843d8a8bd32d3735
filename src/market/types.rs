//! Order book and trade entities
//!
//! These are the already-parsed shapes the analysis core consumes. Wire
//! formats (decimal strings, `isBuyerMaker` flags) are converted into these
//! types at the fetch boundary; nothing here depends on any exchange.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Taker side of an executed trade.
///
/// `is_buyer_maker = true` means the buyer was the resting (maker) side, so
/// the trade was seller-initiated: a taker sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Derive the taker side from the wire maker flag.
    pub fn from_buyer_maker(is_buyer_maker: bool) -> Self {
        if is_buyer_maker {
            Side::Sell
        } else {
            Side::Buy
        }
    }
}

/// One executed transaction from the trade tape.
///
/// Trades form an ordered sequence in exchange-reported execution order.
/// Market-impact and last-trade calculations depend on that order, so it is
/// never re-sorted by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Trade {
    /// Execution time, milliseconds since Unix epoch
    pub timestamp: i64,

    /// Execution price (positive)
    pub price: f64,

    /// Executed quantity in base units (non-negative; zero-volume trades
    /// contribute nothing to ratios)
    pub volume: f64,

    /// Taker side
    pub side: Side,
}

impl Trade {
    pub fn new(timestamp: i64, price: f64, volume: f64, side: Side) -> Self {
        Self {
            timestamp,
            price,
            volume,
            side,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }
}

/// A resting quote: price and quantity at one book level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrderBookLevel {
    pub price: f64,
    pub qty: f64,
}

impl OrderBookLevel {
    pub fn new(price: f64, qty: f64) -> Self {
        Self { price, qty }
    }
}

/// Snapshot of resting limit orders on both sides of the market.
///
/// `bids` are ordered descending by price and `asks` ascending, as the
/// exchange serves them. A healthy market has best bid < best ask; a
/// crossed book violates that but must not break any computation — spread
/// simply reports negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrderBook {
    /// Buy side, descending by price (best bid first)
    pub bids: Vec<OrderBookLevel>,

    /// Sell side, ascending by price (best ask first)
    pub asks: Vec<OrderBookLevel>,

    /// Book revision identifier supplied by the data source, passed through
    /// verbatim into the order-book report
    pub last_update_id: i64,
}

impl OrderBook {
    pub fn new(bids: Vec<OrderBookLevel>, asks: Vec<OrderBookLevel>, last_update_id: i64) -> Self {
        Self {
            bids,
            asks,
            last_update_id,
        }
    }

    /// Build a book from `(price, qty)` pairs already in book order.
    pub fn from_levels(bids: &[(f64, f64)], asks: &[(f64, f64)], last_update_id: i64) -> Self {
        Self {
            bids: bids.iter().map(|&(p, q)| OrderBookLevel::new(p, q)).collect(),
            asks: asks.iter().map(|&(p, q)| OrderBookLevel::new(p, q)).collect(),
            last_update_id,
        }
    }

    /// Best (highest) bid level, if the buy side is non-empty.
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    /// Best (lowest) ask level, if the sell side is non-empty.
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    pub fn total_bid_volume(&self) -> f64 {
        self.bids.iter().map(|level| level.qty).sum()
    }

    pub fn total_ask_volume(&self) -> f64 {
        self.asks.iter().map(|level| level.qty).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taker_side_derivation() {
        // Buyer was maker: the aggressor sold.
        assert_eq!(Side::from_buyer_maker(true), Side::Sell);
        assert_eq!(Side::from_buyer_maker(false), Side::Buy);
    }

    #[test]
    fn test_best_levels() {
        let book = OrderBook::from_levels(&[(100.0, 2.0), (99.0, 5.0)], &[(101.0, 1.0)], 7);
        assert_eq!(book.best_bid().unwrap().price, 100.0);
        assert_eq!(book.best_ask().unwrap().price, 101.0);
        assert_eq!(book.last_update_id, 7);
    }

    #[test]
    fn test_empty_sides() {
        let book = OrderBook::from_levels(&[], &[], 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert_eq!(book.total_bid_volume(), 0.0);
    }

    #[test]
    fn test_total_volumes() {
        let book = OrderBook::from_levels(&[(100.0, 2.0), (99.0, 5.0)], &[(101.0, 1.5)], 0);
        assert_eq!(book.total_bid_volume(), 7.0);
        assert_eq!(book.total_ask_volume(), 1.5);
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), r#""buy""#);
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), r#""sell""#);
    }
}
