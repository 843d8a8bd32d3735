// Report module for rendering analysis results
//
// Deterministic markdown rendering of the core's report shapes. The
// rationale templates are part of the external contract: consumers parse
// and display them verbatim.

pub mod formatter;
pub mod market;
pub mod rationale;

pub use market::render_market_report;
pub use rationale::{render_book_rationale, render_trade_rationale};
