//! Rationale rendering
//!
//! Fixed markdown templates explaining how each bullishness score was
//! computed. Section structure and number formatting are the external
//! contract: prices render to 2 decimals, volumes to 5, ratios and scores
//! to 2, the taker-buy proportion to 3.

use crate::analysis::types::{BookReport, TapeReport, TraderType};
use crate::config::{BookScoreConfig, TapeScoreConfig};

/// Render the weight of a sub-score as a whole percentage, e.g. `70%`.
fn weight_pct(weight: f64) -> String {
    format!("{:.0}%", weight * 100.0)
}

/// Render the order-book rationale document.
///
/// The weights come from the configuration the report was produced with;
/// the band bounds come from the report itself.
pub fn render_book_rationale(report: &BookReport, config: &BookScoreConfig) -> String {
    let b = &report.breakdown;
    let near_min = report.current_price - report.near_band;
    let near_max = report.current_price + report.near_band;

    let mut doc = String::new();

    doc.push_str(&format!(
        "# Rationale for Order Book Analysis\n\
         \n\
         ## Bullishness Score Explanation\n\
         The bullishness score (1-10) is a weighted combination of three ratios:\n\
         - **Near-market bid-to-ask ratio ({near_w})**: Measures buying vs. selling pressure within \u{00b1}${band:.0} of the top bid.\n\
         - **Total bid-to-ask volume ratio ({total_w})**: Reflects overall demand vs. supply across the entire order book.\n\
         - **Top bid-to-ask size ratio ({top_w})**: Indicates aggressive buying intent at the top of the book.\n\
         \n",
        near_w = weight_pct(config.near_weight),
        total_w = weight_pct(config.total_weight),
        top_w = weight_pct(config.top_weight),
        band = report.near_band,
    ));

    doc.push_str(&format!(
        "### Current Calculation\n\
         - **Near-market ratio**: {near_ratio:.2} (capped at 10), scaled to {near_score:.2}. Weight: {near_w}.\n\
         - **Total volume ratio**: {total_ratio:.2} (capped at 5), scaled to {total_score:.2}. Weight: {total_w}.\n\
         - **Top order ratio**: {top_ratio:.2} (capped at 5), scaled to {top_score:.2}. Weight: {top_w}.\n\
         - **Final Score**: ({near_score:.2} \u{00d7} {near_weight}) + ({total_score:.2} \u{00d7} {total_weight}) + ({top_score:.2} \u{00d7} {top_weight}) = {raw:.2}, rounded and clamped to **{score}**.\n\
         \n",
        near_ratio = b.near_ratio,
        near_score = b.near_score,
        total_ratio = b.total_ratio,
        total_score = b.total_score,
        top_ratio = b.top_ratio,
        top_score = b.top_score,
        raw = b.raw_score,
        score = report.bullishness_score,
        near_w = weight_pct(config.near_weight),
        total_w = weight_pct(config.total_weight),
        top_w = weight_pct(config.top_weight),
        near_weight = config.near_weight,
        total_weight = config.total_weight,
        top_weight = config.top_weight,
    ));

    doc.push_str(&format!(
        "## Near-Market Volume Explanation\n\
         Near-market volumes are sums of bid and ask quantities within \u{00b1}${band:.0} of the top bid ({top_bid:.2} USDT):\n\
         - **Bids**: From {near_min:.2} USDT and up, totaling **{near_bid:.5} BTC**.\n\
         - **Asks**: Up to {near_max:.2} USDT, totaling **{near_ask:.5} BTC**.\n\
         \n",
        band = report.near_band,
        top_bid = report.current_price,
        near_min = near_min,
        near_max = near_max,
        near_bid = report.near_bid_volume,
        near_ask = report.near_ask_volume,
    ));

    doc.push_str(&format!(
        "## Total Volume Explanation\n\
         Total volumes are the sums of all bid and ask quantities in the order book:\n\
         - **Total Bids**: **{total_bid:.5} BTC**\n\
         - **Total Asks**: **{total_ask:.5} BTC**\n\
         \n",
        total_bid = report.total_bid_volume,
        total_ask = report.total_ask_volume,
    ));

    doc.push_str(&format!(
        "## Top Order Explanation\n\
         Top order sizes are the quantities at the highest bid and lowest ask:\n\
         - **Top Bid**: **{top_bid_size:.5} BTC** at {top_bid:.2} USDT\n\
         - **Top Ask**: **{top_ask_size:.5} BTC** at {top_ask:.2} USDT\n\
         \n",
        top_bid_size = report.top_bid_size,
        top_ask_size = report.top_ask_size,
        top_bid = report.current_price,
        top_ask = report.current_price + report.spread,
    ));

    doc.push_str(&format!(
        "## Score Interpretation\n\
         How to interpret the bullishness score:\n\
         - **8-10**: Strong bullishness (buying pressure dominates).\n\
         - **4-7**: Neutral to mild bullishness or bearishness.\n\
         - **1-3**: Strong bearishness (selling pressure dominates).\n\
         \n\
         **Current Score**: {score}\n",
        score = report.bullishness_score,
    ));

    doc
}

/// Render the trade-tape rationale document for `symbol`.
pub fn render_trade_rationale(report: &TapeReport, config: &TapeScoreConfig, symbol: &str) -> String {
    let b = &report.breakdown;

    let mut doc = String::new();

    doc.push_str(&format!(
        "# Trades Rationale for {symbol}\n\
         \n\
         ## Bullishness Score Explanation\n\
         The bullishness score (1-10) reflects buying pressure in recent trades, based on:\n\
         - **Buy-to-sell volume ratio ({volume_w})**: Higher buy volume indicates bullishness.\n\
         - **Market buy proportion ({market_w})**: Percentage of trades where buyers were takers (market buys), showing aggressive buying.\n\
         - **Average buy-to-sell size ratio ({size_w})**: Larger buy trades suggest stronger conviction.\n\
         \n",
        symbol = symbol,
        volume_w = weight_pct(config.volume_weight),
        market_w = weight_pct(config.market_weight),
        size_w = weight_pct(config.size_weight),
    ));

    doc.push_str(&format!(
        "### Current Calculation\n\
         - **Buy-to-sell volume ratio**: {buy_volume:.5} BTC / {sell_volume:.5} BTC = {volume_ratio:.2} (capped at 10), scaled to {volume_score:.2}.\n\
         - **Market buy proportion**: {buy_count} taker buys / {trade_count} trades = {market_buy_ratio:.3}, scaled to {market_score:.2}.\n\
         - **Avg buy-to-sell size ratio**: {avg_buy:.5} BTC / {avg_sell:.5} BTC = {size_ratio:.2} (capped at 5), scaled to {size_score:.2}.\n\
         - **Final Score**: ({volume_score:.2} \u{00d7} {volume_weight}) + ({market_score:.2} \u{00d7} {market_weight}) + ({size_score:.2} \u{00d7} {size_weight}) = {raw:.2}, rounded to **{score}**.\n\
         \n",
        buy_volume = report.buy_volume,
        sell_volume = report.sell_volume,
        volume_ratio = b.volume_ratio,
        volume_score = b.volume_score,
        buy_count = report.buy_count,
        trade_count = report.trade_count,
        market_buy_ratio = report.market_buy_ratio,
        market_score = b.market_score,
        avg_buy = report.avg_buy_size,
        avg_sell = report.avg_sell_size,
        size_ratio = b.size_ratio,
        size_score = b.size_score,
        raw = b.raw_score,
        score = report.bullishness_score,
        volume_weight = config.volume_weight,
        market_weight = config.market_weight,
        size_weight = config.size_weight,
    ));

    doc.push_str(&format!(
        "## Trade Volume Summary\n\
         - **Total Volume**: **{total:.5} BTC** over {count} trades.\n\
         - **Buy Volume**: **{buy:.5} BTC** (market/taker buys).\n\
         - **Sell Volume**: **{sell:.5} BTC** (market/taker sells).\n\
         \n",
        total = report.total_volume,
        count = report.trade_count,
        buy = report.buy_volume,
        sell = report.sell_volume,
    ));

    doc.push_str(&format!(
        "## Market Buy Analysis\n\
         - **Market Buy Ratio**: **{ratio:.3}** ({buys} taker buys out of {count} trades).\n\
         - Taker buys (`isBuyerMaker: false`) indicate aggressive buying, lifting offers from the order book.\n\
         \n",
        ratio = report.market_buy_ratio,
        buys = report.buy_count,
        count = report.trade_count,
    ));

    doc.push_str(&format!(
        "## Trade Size Analysis\n\
         - **Average Buy Size**: **{avg_buy:.5} BTC** across {buy_count} buy trades.\n\
         - **Average Sell Size**: **{avg_sell:.5} BTC** across {sell_count} sell trades.\n\
         - Larger buy sizes relative to sell sizes suggest stronger buying intent.\n\
         \n",
        avg_buy = report.avg_buy_size,
        buy_count = report.buy_count,
        avg_sell = report.avg_sell_size,
        sell_count = report.sell_count,
    ));

    doc.push_str("## Retail vs. Professional Assessment\nBased on trade sizes and frequency:\n");
    doc.push_str(&trader_assessment(report));
    doc.push_str(&format!(
        "- **Conclusion**: Likely **{trader_type}** activity dominates these trades.\n\n",
        trader_type = report.profile.trader_type,
    ));

    doc.push_str(&format!(
        "## Score Interpretation\n\
         - **8-10**: Strong bullishness (buyers dominate in volume and aggression).\n\
         - **4-7**: Neutral or mild bullishness/bearishness.\n\
         - **1-3**: Strong bearishness (sellers dominate).\n\
         - **Current Score**: **{score}**\n",
        score = report.bullishness_score,
    ));

    doc
}

/// Evidence bullets backing the trader classification.
fn trader_assessment(report: &TapeReport) -> String {
    let p = &report.profile;
    match p.trader_type {
        TraderType::Retail => format!(
            "- **Average trade size**: {avg:.5} BTC (<0.1 BTC, typical for retail).\n\
             - **Size variability**: Std dev {std:.5} BTC (low, suggesting small, consistent trades).\n\
             - **Max trades per millisecond**: {burst} (low frequency, not algorithmic).\n",
            avg = p.avg_trade_size,
            std = p.size_std,
            burst = p.max_trades_per_timestamp,
        ),
        TraderType::Professional => format!(
            "- **Average trade size**: {avg:.5} BTC (>=1 BTC or significant).\n\
             - **Large trades**: {large} trades >= 1 BTC (institutional activity).\n\
             - **Max trades per millisecond**: {burst} (high frequency, likely bots).\n",
            avg = p.avg_trade_size,
            large = p.large_trade_count,
            burst = p.max_trades_per_timestamp,
        ),
        TraderType::Mixed => format!(
            "- **Average trade size**: {avg:.5} BTC (moderate, not clearly retail or pro).\n\
             - **Size variability**: Std dev {std:.5} BTC (some variation).\n\
             - **Max trades per millisecond**: {burst} (moderate frequency).\n",
            avg = p.avg_trade_size,
            std = p.size_std,
            burst = p.max_trades_per_timestamp,
        ),
    }
}
