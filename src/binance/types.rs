//! Binance wire types
//!
//! Response shapes for the two public endpoints this crate consumes, with
//! decimal fields kept as strings the way the API serves them, plus the
//! conversions into core types. Conversion is where malformed wire data is
//! rejected; nothing downstream re-validates.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::market::{OrderBook, OrderBookLevel, Side, Trade};

/// Response from `/api/v3/depth` (spot) or `/fapi/v1/depth` (futures).
///
/// Bids arrive descending by price and asks ascending, best level first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthSnapshot {
    /// Book revision identifier
    pub last_update_id: i64,

    /// Bid levels as [price, quantity] decimal strings
    pub bids: Vec<(String, String)>,

    /// Ask levels as [price, quantity] decimal strings
    pub asks: Vec<(String, String)>,
}

impl DepthSnapshot {
    /// Convert into the core order book, preserving level order and the
    /// revision identifier.
    ///
    /// # Errors
    /// `InvalidInput` on any unparseable or non-positive price, or any
    /// unparseable or negative quantity.
    pub fn into_order_book(self) -> Result<OrderBook, AnalysisError> {
        let bids = parse_levels(&self.bids, "bid")?;
        let asks = parse_levels(&self.asks, "ask")?;
        Ok(OrderBook::new(bids, asks, self.last_update_id))
    }
}

fn parse_levels(
    levels: &[(String, String)],
    side: &str,
) -> Result<Vec<OrderBookLevel>, AnalysisError> {
    levels
        .iter()
        .map(|(price, qty)| {
            let price: f64 = price.parse().map_err(|_| {
                AnalysisError::InvalidInput(format!("unparseable {} price: {:?}", side, price))
            })?;
            let qty: f64 = qty.parse().map_err(|_| {
                AnalysisError::InvalidInput(format!("unparseable {} quantity: {:?}", side, qty))
            })?;
            if price <= 0.0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "{} price must be positive, got {}",
                    side, price
                )));
            }
            if qty < 0.0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "{} quantity must be non-negative, got {}",
                    side, qty
                )));
            }
            Ok(OrderBookLevel::new(price, qty))
        })
        .collect()
}

/// One record from `/api/v3/trades` (spot) or `/fapi/v1/trades` (futures).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    /// Trade ID
    pub id: i64,

    /// Price as decimal string
    pub price: String,

    /// Quantity as decimal string
    pub qty: String,

    /// Quote asset quantity as decimal string
    pub quote_qty: String,

    /// Execution time, milliseconds since Unix epoch
    pub time: i64,

    /// True when the buyer was the resting maker (the trade was a taker
    /// sell)
    pub is_buyer_maker: bool,

    /// Whether the trade was the best price match
    pub is_best_match: Option<bool>,
}

impl RawTrade {
    /// Convert into a core trade, deriving the taker side from the maker
    /// flag.
    ///
    /// # Errors
    /// `InvalidInput` on unparseable fields, a non-positive price, a
    /// negative quantity, or a negative timestamp.
    pub fn into_trade(self) -> Result<Trade, AnalysisError> {
        let price: f64 = self.price.parse().map_err(|_| {
            AnalysisError::InvalidInput(format!("unparseable trade price: {:?}", self.price))
        })?;
        let volume: f64 = self.qty.parse().map_err(|_| {
            AnalysisError::InvalidInput(format!("unparseable trade quantity: {:?}", self.qty))
        })?;
        if price <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "trade price must be positive, got {}",
                price
            )));
        }
        if volume < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "trade quantity must be non-negative, got {}",
                volume
            )));
        }
        if self.time < 0 {
            return Err(AnalysisError::InvalidInput(format!(
                "trade timestamp must be non-negative, got {}",
                self.time
            )));
        }
        Ok(Trade::new(
            self.time,
            price,
            volume,
            Side::from_buyer_maker(self.is_buyer_maker),
        ))
    }
}

/// Convert a wire trade page into core trades, preserving the reported
/// execution order.
pub fn into_trades(raw: Vec<RawTrade>) -> Result<Vec<Trade>, AnalysisError> {
    raw.into_iter().map(RawTrade::into_trade).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_deserialization_and_conversion() {
        let json = r#"{
            "lastUpdateId": 1027024,
            "bids": [["100.00", "2.0"], ["99.00", "5.0"]],
            "asks": [["101.00", "1.0"], ["102.00", "4.0"]]
        }"#;

        let snapshot: DepthSnapshot = serde_json::from_str(json).unwrap();
        let book = snapshot.into_order_book().unwrap();
        assert_eq!(book.last_update_id, 1027024);
        assert_eq!(book.best_bid().unwrap().price, 100.0);
        assert_eq!(book.best_ask().unwrap().qty, 1.0);
    }

    #[test]
    fn test_depth_rejects_garbage_price() {
        let snapshot = DepthSnapshot {
            last_update_id: 1,
            bids: vec![("not-a-number".to_string(), "1.0".to_string())],
            asks: vec![],
        };
        assert!(matches!(
            snapshot.into_order_book(),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_trade_deserialization_and_side() {
        let json = r#"{
            "id": 28457,
            "price": "16800.50",
            "qty": "1.25",
            "quoteQty": "21000.62",
            "time": 1672531200000,
            "isBuyerMaker": true,
            "isBestMatch": true
        }"#;

        let raw: RawTrade = serde_json::from_str(json).unwrap();
        let trade = raw.into_trade().unwrap();
        assert_eq!(trade.timestamp, 1672531200000);
        assert_eq!(trade.price, 16800.50);
        assert_eq!(trade.volume, 1.25);
        // Buyer was maker: the taker sold.
        assert_eq!(trade.side, Side::Sell);
    }

    #[test]
    fn test_trade_rejects_negative_timestamp() {
        let raw = RawTrade {
            id: 1,
            price: "100.0".to_string(),
            qty: "1.0".to_string(),
            quote_qty: "100.0".to_string(),
            time: -5,
            is_buyer_maker: false,
            is_best_match: None,
        };
        assert!(matches!(
            raw.into_trade(),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_into_trades_preserves_order() {
        let raw = vec![
            RawTrade {
                id: 2,
                price: "101.0".to_string(),
                qty: "1.0".to_string(),
                quote_qty: "101.0".to_string(),
                time: 2000,
                is_buyer_maker: false,
                is_best_match: None,
            },
            RawTrade {
                id: 1,
                price: "100.0".to_string(),
                qty: "1.0".to_string(),
                quote_qty: "100.0".to_string(),
                time: 1000,
                is_buyer_maker: true,
                is_best_match: None,
            },
        ];
        let trades = into_trades(raw).unwrap();
        // Wire order is execution order; no re-sorting by timestamp.
        assert_eq!(trades[0].timestamp, 2000);
        assert_eq!(trades[1].timestamp, 1000);
    }
}
