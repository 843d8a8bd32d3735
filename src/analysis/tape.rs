//! Trade tape metrics
//!
//! Volume, flow, volatility and impact statistics over an execution-ordered
//! trade list, plus the tape flavor of the bullishness score and the
//! retail/professional classification.

use std::collections::HashMap;

use statrs::statistics::Statistics;

use crate::analysis::clamp_score;
use crate::analysis::types::{round_dp, TapeReport, TapeScoreBreakdown, TraderProfile, TraderType};
use crate::config::{ClassifierConfig, TapeScoreConfig};
use crate::error::{AnalysisError, Result};
use crate::market::Trade;

/// Cap on the buy/sell volume ratio and the scale/cap of its sub-score
const VOLUME_RATIO_CAP: f64 = 10.0;
const VOLUME_SCORE_SCALE: f64 = 2.0;
const VOLUME_SCORE_CAP: f64 = 10.0;

/// Scale and cap of the taker-buy proportion sub-score
const MARKET_SCORE_SCALE: f64 = 10.0;
const MARKET_SCORE_CAP: f64 = 10.0;

/// Cap on the average-size ratio and the scale/cap of its sub-score
const SIZE_RATIO_CAP: f64 = 5.0;
const SIZE_SCORE_SCALE: f64 = 2.0;
const SIZE_SCORE_CAP: f64 = 5.0;

/// Annualization scale for realized volatility: `sqrt(252 * 24 * 60)`.
///
/// Treats each consecutive trade pair as one minute apart. A fixed-count
/// trade sample has no calendar spacing, so the scaled figure has no
/// calendar meaning; it is a convention kept for comparability across
/// snapshots, not a statistical claim.
const ANNUALIZATION_MINUTES: f64 = 252.0 * 24.0 * 60.0;

/// Volume-weighted average price. 0 when total volume is 0.
pub fn vwap(trades: &[Trade]) -> f64 {
    let total_volume: f64 = trades.iter().map(|t| t.volume).sum();
    if total_volume > 0.0 {
        let total_value: f64 = trades.iter().map(|t| t.price * t.volume).sum();
        total_value / total_volume
    } else {
        0.0
    }
}

/// Annualized population standard deviation of consecutive log-returns.
///
/// Returns are taken over the tape in its given execution order, never
/// resampled by time, and scaled by `sqrt(252 * 24 * 60)` under the
/// one-trade-per-minute convention documented on [`ANNUALIZATION_MINUTES`].
/// 0 for fewer than 2 trades.
pub fn realized_volatility(trades: &[Trade]) -> f64 {
    if trades.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = trades
        .windows(2)
        .map(|pair| pair[1].price.ln() - pair[0].price.ln())
        .collect();
    returns.iter().population_std_dev() * ANNUALIZATION_MINUTES.sqrt()
}

/// Price move immediately after the single largest trade.
///
/// The largest trade is the first occurrence of the maximum volume; ties
/// must not resolve to a later index, so this is an explicit scan rather
/// than a library max search. 0 when the largest trade is the last one.
pub fn market_impact(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let mut largest_idx = 0;
    for (idx, trade) in trades.iter().enumerate().skip(1) {
        if trade.volume > trades[largest_idx].volume {
            largest_idx = idx;
        }
    }
    if largest_idx < trades.len() - 1 {
        trades[largest_idx + 1].price - trades[largest_idx].price
    } else {
        0.0
    }
}

/// Taker-buy volume minus taker-sell volume.
pub fn net_order_flow(trades: &[Trade]) -> f64 {
    trades
        .iter()
        .map(|t| if t.is_buy() { t.volume } else { -t.volume })
        .sum()
}

/// Full trade-tape heuristic report: volume summary, bullishness score with
/// breakdown, and the trader-type profile.
///
/// # Errors
/// `InvalidInput` if the trade list is empty.
pub fn analyze(
    trades: &[Trade],
    config: &TapeScoreConfig,
    classifier: &ClassifierConfig,
) -> Result<TapeReport> {
    if trades.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "trade list is empty".to_string(),
        ));
    }

    let trade_count = trades.len();
    let total_volume: f64 = trades.iter().map(|t| t.volume).sum();
    let buy_volume: f64 = trades.iter().filter(|t| t.is_buy()).map(|t| t.volume).sum();
    let sell_volume = total_volume - buy_volume;

    let buy_count = trades.iter().filter(|t| t.is_buy()).count();
    let sell_count = trade_count - buy_count;
    let market_buy_ratio = buy_count as f64 / trade_count as f64;

    let avg_buy_size = if buy_count > 0 {
        buy_volume / buy_count as f64
    } else {
        0.0
    };
    let avg_sell_size = if sell_count > 0 {
        sell_volume / sell_count as f64
    } else {
        0.0
    };

    let floor = config.volume_floor;

    let volume_ratio = (buy_volume / sell_volume.max(floor)).min(VOLUME_RATIO_CAP);
    let volume_score = (volume_ratio * VOLUME_SCORE_SCALE).min(VOLUME_SCORE_CAP);

    let market_score = (market_buy_ratio * MARKET_SCORE_SCALE).min(MARKET_SCORE_CAP);

    let size_ratio = (avg_buy_size / avg_sell_size.max(floor)).min(SIZE_RATIO_CAP);
    let size_score = (size_ratio * SIZE_SCORE_SCALE).min(SIZE_SCORE_CAP);

    let raw_score = volume_score * config.volume_weight
        + market_score * config.market_weight
        + size_score * config.size_weight;
    let bullishness_score = clamp_score(raw_score);

    let profile = profile_traders(trades, classifier);

    Ok(TapeReport {
        bullishness_score,
        total_volume: round_dp(total_volume, 5),
        buy_volume: round_dp(buy_volume, 5),
        sell_volume: round_dp(sell_volume, 5),
        market_buy_ratio: round_dp(market_buy_ratio, 3),
        avg_buy_size: round_dp(avg_buy_size, 5),
        avg_sell_size: round_dp(avg_sell_size, 5),
        trade_count,
        buy_count,
        sell_count,
        last_trade_time: trades[trade_count - 1].timestamp,
        profile,
        breakdown: TapeScoreBreakdown {
            volume_ratio: round_dp(volume_ratio, 2),
            volume_score: round_dp(volume_score, 2),
            market_score: round_dp(market_score, 2),
            size_ratio: round_dp(size_ratio, 2),
            size_score: round_dp(size_score, 2),
            raw_score: round_dp(raw_score, 2),
        },
    })
}

/// Size/frequency statistics and the retail/professional classification.
///
/// Rule order is fixed: retail is checked first, so an input satisfying
/// both the retail and professional conditions classifies as retail.
fn profile_traders(trades: &[Trade], config: &ClassifierConfig) -> TraderProfile {
    let sizes: Vec<f64> = trades.iter().map(|t| t.volume).collect();

    let avg_trade_size = sizes.iter().sum::<f64>() / sizes.len() as f64;
    let size_std = if sizes.len() > 1 {
        sizes.iter().std_dev()
    } else {
        0.0
    };
    let large_trade_count = sizes
        .iter()
        .filter(|s| **s >= config.large_trade_threshold)
        .count();

    let mut per_timestamp: HashMap<i64, usize> = HashMap::new();
    for trade in trades {
        *per_timestamp.entry(trade.timestamp).or_insert(0) += 1;
    }
    let max_trades_per_timestamp = per_timestamp.values().copied().max().unwrap_or(1);

    let trader_type = if avg_trade_size < config.retail_max_avg_size
        && size_std < config.retail_max_size_std
        && max_trades_per_timestamp <= config.retail_max_burst
    {
        TraderType::Retail
    } else if avg_trade_size >= config.pro_min_avg_size
        || large_trade_count > config.pro_min_large_trades
        || max_trades_per_timestamp > config.pro_min_burst
    {
        TraderType::Professional
    } else {
        TraderType::Mixed
    };

    TraderProfile {
        trader_type,
        avg_trade_size: round_dp(avg_trade_size, 5),
        size_std: round_dp(size_std, 5),
        large_trade_count,
        max_trades_per_timestamp,
    }
}
