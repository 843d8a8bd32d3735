//! Heuristic configuration
//!
//! Every tunable constant of the scoring heuristics lives here as a named
//! field with the production default, so each knob is independently testable
//! and adjustable without touching the scoring code. The ratio caps and
//! scale multipliers are formula constants and stay beside the scoring
//! functions instead.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Weights and bounds for the order-book bullishness score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookScoreConfig {
    /// Half-width of the near-market band around the best bid, in quote
    /// currency (default: $10)
    pub near_band: f64,

    /// Denominator floor substituted for any volume divisor that could be
    /// zero (default: 0.001)
    pub volume_floor: f64,

    /// Weight of the near-market bid/ask ratio (default: 0.7)
    pub near_weight: f64,

    /// Weight of the whole-book bid/ask volume ratio (default: 0.15)
    pub total_weight: f64,

    /// Weight of the top-of-book bid/ask size ratio (default: 0.15)
    pub top_weight: f64,
}

impl Default for BookScoreConfig {
    fn default() -> Self {
        Self {
            near_band: 10.0,
            volume_floor: 0.001,
            near_weight: 0.7,
            total_weight: 0.15,
            top_weight: 0.15,
        }
    }
}

impl BookScoreConfig {
    /// Validates band, floor and weights.
    ///
    /// Weights must be non-negative and sum to 1.0 (within 1e-9) so the raw
    /// score stays inside the clamping range the integer score assumes.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.near_band <= 0.0 {
            return Err(format!("near_band must be positive, got {}", self.near_band));
        }
        if self.volume_floor <= 0.0 {
            return Err(format!(
                "volume_floor must be positive, got {}",
                self.volume_floor
            ));
        }
        validate_weights(&[self.near_weight, self.total_weight, self.top_weight])
    }
}

/// Weights and bounds for the trade-tape bullishness score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TapeScoreConfig {
    /// Denominator floor substituted for any volume divisor that could be
    /// zero (default: 0.001)
    pub volume_floor: f64,

    /// Weight of the buy/sell volume ratio (default: 0.5)
    pub volume_weight: f64,

    /// Weight of the taker-buy proportion (default: 0.3)
    pub market_weight: f64,

    /// Weight of the average buy/sell size ratio (default: 0.2)
    pub size_weight: f64,
}

impl Default for TapeScoreConfig {
    fn default() -> Self {
        Self {
            volume_floor: 0.001,
            volume_weight: 0.5,
            market_weight: 0.3,
            size_weight: 0.2,
        }
    }
}

impl TapeScoreConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.volume_floor <= 0.0 {
            return Err(format!(
                "volume_floor must be positive, got {}",
                self.volume_floor
            ));
        }
        validate_weights(&[self.volume_weight, self.market_weight, self.size_weight])
    }
}

/// Thresholds for the retail/professional trader classification.
///
/// Rule order is fixed: the retail rule is evaluated before the
/// professional rule, so an input satisfying both classifies as retail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassifierConfig {
    /// Volume at or above which a single trade counts as large
    /// (default: 1.0 base units)
    pub large_trade_threshold: f64,

    /// Retail rule: average trade size strictly below this (default: 0.1)
    pub retail_max_avg_size: f64,

    /// Retail rule: sample std dev of trade sizes strictly below this
    /// (default: 0.5)
    pub retail_max_size_std: f64,

    /// Retail rule: at most this many trades sharing one timestamp
    /// (default: 5)
    pub retail_max_burst: usize,

    /// Professional rule: average trade size at or above this (default: 1.0)
    pub pro_min_avg_size: f64,

    /// Professional rule: strictly more than this many large trades
    /// (default: 10)
    pub pro_min_large_trades: usize,

    /// Professional rule: strictly more than this many trades sharing one
    /// timestamp (default: 20)
    pub pro_min_burst: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            large_trade_threshold: 1.0,
            retail_max_avg_size: 0.1,
            retail_max_size_std: 0.5,
            retail_max_burst: 5,
            pro_min_avg_size: 1.0,
            pro_min_large_trades: 10,
            pro_min_burst: 20,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.large_trade_threshold <= 0.0 {
            return Err(format!(
                "large_trade_threshold must be positive, got {}",
                self.large_trade_threshold
            ));
        }
        Ok(())
    }
}

/// Full analyzer configuration: one value per report shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzerConfig {
    /// Book levels summed by depth and imbalance (default: 10)
    #[serde(default = "default_depth_levels")]
    pub depth_levels: usize,

    #[serde(default)]
    pub book: BookScoreConfig,

    #[serde(default)]
    pub tape: TapeScoreConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            depth_levels: default_depth_levels(),
            book: BookScoreConfig::default(),
            tape: TapeScoreConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

fn default_depth_levels() -> usize {
    10
}

impl AnalyzerConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.depth_levels == 0 {
            return Err("depth_levels must be at least 1".to_string());
        }
        self.book.validate()?;
        self.tape.validate()?;
        self.classifier.validate()
    }
}

fn validate_weights(weights: &[f64]) -> std::result::Result<(), String> {
    if weights.iter().any(|w| *w < 0.0) {
        return Err(format!("weights must be non-negative, got {:?}", weights));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-9 {
        return Err(format!("weights must sum to 1.0, got {}", sum));
    }
    Ok(())
}
