//! Order book metrics
//!
//! Spread, depth, imbalance and the order-book flavor of the bullishness
//! score, computed from a single depth snapshot.

use crate::analysis::types::{round_dp, BookReport, BookScoreBreakdown};
use crate::analysis::clamp_score;
use crate::config::BookScoreConfig;
use crate::error::{AnalysisError, Result};
use crate::market::OrderBook;

/// Cap on the near-market bid/ask ratio
const NEAR_RATIO_CAP: f64 = 10.0;

/// Scale and cap turning the near ratio into a 0-10 sub-score
const NEAR_SCORE_SCALE: f64 = 2.0;
const NEAR_SCORE_CAP: f64 = 10.0;

/// Cap on the whole-book volume ratio and its sub-score
const TOTAL_RATIO_CAP: f64 = 5.0;
const TOTAL_SCORE_CAP: f64 = 5.0;

/// Cap on the top-of-book size ratio; its sub-score is halved and capped
const TOP_RATIO_CAP: f64 = 5.0;
const TOP_SCORE_SCALE: f64 = 0.5;
const TOP_SCORE_CAP: f64 = 2.5;

/// Best ask minus best bid.
///
/// Negative for a crossed book; that is reported, not rejected.
///
/// # Errors
/// `InsufficientData` if either side of the book is empty.
pub fn spread(book: &OrderBook) -> Result<f64> {
    let best_bid = book
        .best_bid()
        .ok_or_else(|| AnalysisError::InsufficientData("order book has no bids".to_string()))?;
    let best_ask = book
        .best_ask()
        .ok_or_else(|| AnalysisError::InsufficientData("order book has no asks".to_string()))?;
    Ok(best_ask.price - best_bid.price)
}

/// Summed quantity over the first `levels` levels of each side.
///
/// A side with fewer than `levels` entries contributes the sum of what it
/// has; an empty side contributes 0.
pub fn depth(book: &OrderBook, levels: usize) -> (f64, f64) {
    let bid_depth: f64 = book.bids.iter().take(levels).map(|l| l.qty).sum();
    let ask_depth: f64 = book.asks.iter().take(levels).map(|l| l.qty).sum();
    (bid_depth, ask_depth)
}

/// `(bid_depth - ask_depth) / (bid_depth + ask_depth)` over the first
/// `levels` levels, in [-1, 1].
///
/// Exactly 0 when both summed depths are 0. That is a division guard, not
/// a claim the market is neutral.
pub fn imbalance(book: &OrderBook, levels: usize) -> f64 {
    let (bid_depth, ask_depth) = depth(book, levels);
    let total = bid_depth + ask_depth;
    if total > 0.0 {
        (bid_depth - ask_depth) / total
    } else {
        0.0
    }
}

/// Full order-book heuristic report: descriptive volumes plus the
/// bullishness score and its breakdown.
///
/// # Errors
/// `InsufficientData` if either side of the book is empty.
pub fn analyze(book: &OrderBook, config: &BookScoreConfig) -> Result<BookReport> {
    let best_bid = book
        .best_bid()
        .ok_or_else(|| AnalysisError::InsufficientData("order book has no bids".to_string()))?;
    let best_ask = book
        .best_ask()
        .ok_or_else(|| AnalysisError::InsufficientData("order book has no asks".to_string()))?;

    let spread = best_ask.price - best_bid.price;

    // Near-market band: fixed dollar window around the best bid.
    let near_min = best_bid.price - config.near_band;
    let near_max = best_bid.price + config.near_band;

    let near_bid_volume: f64 = book
        .bids
        .iter()
        .filter(|l| l.price >= near_min)
        .map(|l| l.qty)
        .sum();
    let near_ask_volume: f64 = book
        .asks
        .iter()
        .filter(|l| l.price <= near_max)
        .map(|l| l.qty)
        .sum();

    let total_bid_volume = book.total_bid_volume();
    let total_ask_volume = book.total_ask_volume();

    let floor = config.volume_floor;

    let near_ratio = (near_bid_volume / near_ask_volume.max(floor)).min(NEAR_RATIO_CAP);
    let near_score = (near_ratio * NEAR_SCORE_SCALE).min(NEAR_SCORE_CAP);

    let total_ratio = (total_bid_volume / total_ask_volume.max(floor)).min(TOTAL_RATIO_CAP);
    let total_score = total_ratio.min(TOTAL_SCORE_CAP);

    let top_ratio = (best_bid.qty / best_ask.qty.max(floor)).min(TOP_RATIO_CAP);
    let top_score = (top_ratio * TOP_SCORE_SCALE).min(TOP_SCORE_CAP);

    let raw_score = near_score * config.near_weight
        + total_score * config.total_weight
        + top_score * config.top_weight;
    let bullishness_score = clamp_score(raw_score);

    Ok(BookReport {
        bullishness_score,
        current_price: round_dp(best_bid.price, 2),
        spread: round_dp(spread, 2),
        near_bid_volume: round_dp(near_bid_volume, 5),
        near_ask_volume: round_dp(near_ask_volume, 5),
        total_bid_volume: round_dp(total_bid_volume, 5),
        total_ask_volume: round_dp(total_ask_volume, 5),
        top_bid_size: round_dp(best_bid.qty, 5),
        top_ask_size: round_dp(best_ask.qty, 5),
        last_update_id: book.last_update_id,
        near_band: config.near_band,
        breakdown: BookScoreBreakdown {
            near_ratio: round_dp(near_ratio, 2),
            near_score: round_dp(near_score, 2),
            total_ratio: round_dp(total_ratio, 2),
            total_score: round_dp(total_score, 2),
            top_ratio: round_dp(top_ratio, 2),
            top_score: round_dp(top_score, 2),
            raw_score: round_dp(raw_score, 2),
        },
    })
}
