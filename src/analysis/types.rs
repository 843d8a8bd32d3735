//! Analysis result entities
//!
//! Output shapes for the three report flavors. Every numeric field is
//! stored already rounded to its contract precision (prices 2 decimals,
//! volumes 5, ratios and scores 2, taker-buy proportion 3) so serialized
//! results and rendered rationale text agree byte for byte.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Round to `dp` decimal places, half away from zero.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

// ============================================================================
// Order-book report
// ============================================================================

/// Intermediate ratios and sub-scores of the order-book bullishness score.
///
/// Each field is independently reproducible from the report's volume fields
/// and the configured weights.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookScoreBreakdown {
    /// Near-market bid/ask volume ratio, capped at 10
    pub near_ratio: f64,

    /// `min(near_ratio * 2, 10)`
    pub near_score: f64,

    /// Whole-book bid/ask volume ratio, capped at 5
    pub total_ratio: f64,

    /// `min(total_ratio, 5)`
    pub total_score: f64,

    /// Top-of-book bid/ask size ratio, capped at 5
    pub top_ratio: f64,

    /// `min(top_ratio * 0.5, 2.5)`
    pub top_score: f64,

    /// Weighted combination before rounding and clamping
    pub raw_score: f64,
}

/// Order-book-only heuristic report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookReport {
    /// Composite bullishness, integer in [1, 10]
    pub bullishness_score: u8,

    /// Best bid price
    pub current_price: f64,

    /// Best ask minus best bid; negative for a crossed book
    pub spread: f64,

    /// Bid volume at prices within the near band below the best bid
    pub near_bid_volume: f64,

    /// Ask volume at prices within the near band above the best bid
    pub near_ask_volume: f64,

    pub total_bid_volume: f64,

    pub total_ask_volume: f64,

    /// Quantity resting at the best bid
    pub top_bid_size: f64,

    /// Quantity resting at the best ask
    pub top_ask_size: f64,

    /// Book revision identifier, passed through verbatim from the input
    pub last_update_id: i64,

    /// Near-market band half-width used for this report
    pub near_band: f64,

    pub breakdown: BookScoreBreakdown,
}

// ============================================================================
// Trade-tape report
// ============================================================================

/// Dominant trader population inferred from the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TraderType {
    Retail,
    #[serde(rename = "Professional/Institutional")]
    Professional,
    Mixed,
}

impl std::fmt::Display for TraderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TraderType::Retail => "Retail",
            TraderType::Professional => "Professional/Institutional",
            TraderType::Mixed => "Mixed",
        };
        write!(f, "{}", label)
    }
}

/// Trade-size and frequency statistics behind the trader classification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TraderProfile {
    pub trader_type: TraderType,

    /// Mean trade volume
    pub avg_trade_size: f64,

    /// Sample standard deviation of trade volumes, 0 for fewer than 2 trades
    pub size_std: f64,

    /// Trades at or above the large-trade threshold
    pub large_trade_count: usize,

    /// Largest number of trades sharing one identical timestamp
    pub max_trades_per_timestamp: usize,
}

/// Intermediate ratios and sub-scores of the trade-tape bullishness score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TapeScoreBreakdown {
    /// Buy/sell volume ratio, capped at 10
    pub volume_ratio: f64,

    /// `min(volume_ratio * 2, 10)`
    pub volume_score: f64,

    /// `min(market_buy_ratio * 10, 10)`
    pub market_score: f64,

    /// Average buy/sell size ratio, capped at 5
    pub size_ratio: f64,

    /// `min(size_ratio * 2, 5)`
    pub size_score: f64,

    /// Weighted combination before rounding and clamping
    pub raw_score: f64,
}

/// Trade-only heuristic report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TapeReport {
    /// Composite bullishness, integer in [1, 10]
    pub bullishness_score: u8,

    pub total_volume: f64,

    /// Volume of taker-buy trades
    pub buy_volume: f64,

    /// Volume of taker-sell trades
    pub sell_volume: f64,

    /// Fraction of trades where the buyer was the taker, 3 decimals
    pub market_buy_ratio: f64,

    /// Buy volume over buy count, 0 when there are no buys
    pub avg_buy_size: f64,

    /// Sell volume over sell count, 0 when there are no sells
    pub avg_sell_size: f64,

    pub trade_count: usize,

    pub buy_count: usize,

    pub sell_count: usize,

    /// Timestamp of the final trade in execution order, passed through
    /// verbatim (epoch milliseconds)
    pub last_trade_time: i64,

    pub profile: TraderProfile,

    pub breakdown: TapeScoreBreakdown,
}

// ============================================================================
// Combined market report
// ============================================================================

/// Fixed metric names of the combined market report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MetricName {
    BidAskSpread,
    OrderBookDepth,
    OrderBookImbalance,
    #[serde(rename = "VWAP")]
    Vwap,
    RealizedVolatility,
    MarketImpact,
    NetOrderFlow,
}

impl MetricName {
    /// Static explanation template attached to every instance of the
    /// metric. Not computed from the input.
    pub fn explanation(&self) -> &'static str {
        match self {
            MetricName::BidAskSpread => {
                "The difference between the highest buy price and lowest sell price. \
                 A smaller spread means lower trading costs and higher liquidity."
            }
            MetricName::OrderBookDepth => {
                "Total volume of buy (bids) and sell (asks) orders in the top 10 levels. \
                 Shows how much can be traded without moving the price much."
            }
            MetricName::OrderBookImbalance => {
                "Compares buy vs. sell volume. Positive means more buying pressure; \
                 negative means more selling pressure."
            }
            MetricName::Vwap => {
                "Volume-weighted average price of recent trades. A benchmark for what \
                 traders paid on average."
            }
            MetricName::RealizedVolatility => {
                "Measures price swings over time. Higher values mean more risk and \
                 opportunity for price changes."
            }
            MetricName::MarketImpact => {
                "Price change after the largest trade. Shows how much trades affect \
                 the market."
            }
            MetricName::NetOrderFlow => {
                "Net difference between buy and sell volumes. Positive suggests \
                 bullish sentiment; negative suggests bearish."
            }
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MetricName::BidAskSpread => "Bid-Ask Spread",
            MetricName::OrderBookDepth => "Order Book Depth (Bids, Asks)",
            MetricName::OrderBookImbalance => "Order Book Imbalance",
            MetricName::Vwap => "VWAP",
            MetricName::RealizedVolatility => "Realized Volatility",
            MetricName::MarketImpact => "Market Impact",
            MetricName::NetOrderFlow => "Net Order Flow",
        };
        write!(f, "{}", label)
    }
}

/// A metric value: a single number, or a (bid, ask) pair for depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MetricValue {
    Single(f64),
    Pair(f64, f64),
}

impl MetricValue {
    pub fn as_single(&self) -> Option<f64> {
        match self {
            MetricValue::Single(v) => Some(*v),
            MetricValue::Pair(_, _) => None,
        }
    }

    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            MetricValue::Single(_) => None,
            MetricValue::Pair(a, b) => Some((*a, *b)),
        }
    }
}

/// One named metric with its static explanation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MetricResult {
    pub name: MetricName,
    pub value: MetricValue,
    pub explanation: String,
}

impl MetricResult {
    pub fn new(name: MetricName, value: MetricValue) -> Self {
        Self {
            name,
            value,
            explanation: name.explanation().to_string(),
        }
    }
}

/// Combined seven-metric descriptive report. Carries no bullishness score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MarketReport {
    pub metrics: Vec<MetricResult>,
}

impl MarketReport {
    /// Look up a metric by name.
    pub fn get(&self, name: MetricName) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.name == name)
    }
}
