//! Composite analyzer
//!
//! Assembles the three report shapes from the leaf metric components. Each
//! shape is independently constructible and every call is a pure
//! recomputation over its inputs; there is no caching and no shared state.

use crate::analysis::types::{
    round_dp, BookReport, MarketReport, MetricName, MetricResult, MetricValue, TapeReport,
};
use crate::analysis::{book, tape};
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::market::{OrderBook, Trade};

/// Stateless orchestrator binding the analysis components to one
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct MarketAnalyzer {
    config: AnalyzerConfig,
}

impl MarketAnalyzer {
    /// Create an analyzer with the production default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with an explicit configuration.
    ///
    /// # Errors
    /// `InvalidInput` if the configuration fails validation.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(AnalysisError::InvalidInput)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Order-book-only heuristic report.
    ///
    /// # Errors
    /// `InsufficientData` if either side of the book is empty.
    pub fn order_book_report(&self, order_book: &OrderBook) -> Result<BookReport> {
        book::analyze(order_book, &self.config.book)
    }

    /// Trade-only heuristic report.
    ///
    /// # Errors
    /// `InvalidInput` if the trade list is empty.
    pub fn trade_report(&self, trades: &[Trade]) -> Result<TapeReport> {
        tape::analyze(trades, &self.config.tape, &self.config.classifier)
    }

    /// Combined seven-metric descriptive report over an order book and a
    /// trade tape captured at the same nominal instant. No bullishness
    /// score is attached to this shape.
    ///
    /// # Errors
    /// `InsufficientData` if either book side is empty (spread needs both
    /// best prices); `InvalidInput` if the trade list is empty.
    pub fn market_report(&self, order_book: &OrderBook, trades: &[Trade]) -> Result<MarketReport> {
        if trades.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "trade list is empty".to_string(),
            ));
        }

        let levels = self.config.depth_levels;
        let spread = book::spread(order_book)?;
        let (bid_depth, ask_depth) = book::depth(order_book, levels);
        let imbalance = book::imbalance(order_book, levels);

        let metrics = vec![
            MetricResult::new(
                MetricName::BidAskSpread,
                MetricValue::Single(round_dp(spread, 2)),
            ),
            MetricResult::new(
                MetricName::OrderBookDepth,
                MetricValue::Pair(round_dp(bid_depth, 5), round_dp(ask_depth, 5)),
            ),
            MetricResult::new(
                MetricName::OrderBookImbalance,
                MetricValue::Single(round_dp(imbalance, 4)),
            ),
            MetricResult::new(
                MetricName::Vwap,
                MetricValue::Single(round_dp(tape::vwap(trades), 2)),
            ),
            MetricResult::new(
                MetricName::RealizedVolatility,
                MetricValue::Single(round_dp(tape::realized_volatility(trades), 2)),
            ),
            MetricResult::new(
                MetricName::MarketImpact,
                MetricValue::Single(round_dp(tape::market_impact(trades), 2)),
            ),
            MetricResult::new(
                MetricName::NetOrderFlow,
                MetricValue::Single(round_dp(tape::net_order_flow(trades), 5)),
            ),
        ];

        Ok(MarketReport { metrics })
    }
}
