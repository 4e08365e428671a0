//! Analysis Module - Trade-off and synergy classification.
//!
//! This module contains stateless functions that turn harmonized impact
//! deltas into qualitative categories.
//!
//! # Components
//!
//! - `Category` - Ordered win/lose/tie tuple with a joined label
//! - `TradeoffClassifier` - Sign lookup, Euclidean magnitude, aggregation
//! - `TradeoffAnalyzer` - Geographical, impact and sectoral pivots
//! - `RunSummary` - Condensed result of a run
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results.

mod category;
mod classifier;
mod summary;
mod tradeoff_analyzer;

pub use category::{
    all_pair_categories, all_triple_categories, pair_category, triple_category, Category,
    CategoryKind,
};
pub use classifier::{CategoryTally, ClassificationResult, ClassifiedRow, TradeoffClassifier};
pub use summary::{AnalysisSummary, CategoryCount, RunSummary};
pub use tradeoff_analyzer::{
    AnalysisAxis, AnalysisSpec, GroupTotal, TradeoffAnalysis, TradeoffAnalyzer,
};
