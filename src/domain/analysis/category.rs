//! Trade-off and synergy categories.
//!
//! A category is the ordered tuple of per-position outcomes, labeled by
//! joining the outcome labels with `-` (e.g. `win-tie-lose`). Both lookup
//! tables are built from the full product of outcomes, so every sign
//! combination has a category.

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::Outcome;

/// Coarse reading of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// At least one win and no loss.
    Synergy,
    /// Wins and losses together.
    TradeOff,
    /// At least one loss and no win.
    Loss,
    /// Ties only.
    Neutral,
}

impl CategoryKind {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Synergy => "synergy",
            CategoryKind::TradeOff => "trade_off",
            CategoryKind::Loss => "loss",
            CategoryKind::Neutral => "neutral",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One discrete trade-off/synergy category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    label: String,
    outcomes: Vec<Outcome>,
}

impl Category {
    fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let label = outcomes
            .iter()
            .map(Outcome::label)
            .collect::<Vec<_>>()
            .join("-");
        Self {
            label,
            outcomes: outcomes.to_vec(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn arity(&self) -> usize {
        self.outcomes.len()
    }

    pub fn kind(&self) -> CategoryKind {
        let wins = self.outcomes.iter().any(Outcome::is_win);
        let losses = self.outcomes.iter().any(Outcome::is_lose);
        match (wins, losses) {
            (true, true) => CategoryKind::TradeOff,
            (true, false) => CategoryKind::Synergy,
            (false, true) => CategoryKind::Loss,
            (false, false) => CategoryKind::Neutral,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

static PAIR_CATEGORIES: Lazy<HashMap<[Outcome; 2], Category>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(9);
    for a in Outcome::ALL {
        for b in Outcome::ALL {
            table.insert([a, b], Category::from_outcomes(&[a, b]));
        }
    }
    table
});

static TRIPLE_CATEGORIES: Lazy<HashMap<[Outcome; 3], Category>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(27);
    for a in Outcome::ALL {
        for b in Outcome::ALL {
            for c in Outcome::ALL {
                table.insert([a, b, c], Category::from_outcomes(&[a, b, c]));
            }
        }
    }
    table
});

/// Category of a two-position outcome tuple.
pub fn pair_category(outcomes: [Outcome; 2]) -> Option<&'static Category> {
    PAIR_CATEGORIES.get(&outcomes)
}

/// Category of a three-position outcome tuple.
pub fn triple_category(outcomes: [Outcome; 3]) -> Option<&'static Category> {
    TRIPLE_CATEGORIES.get(&outcomes)
}

/// Every two-position category, in win/lose/tie label order.
pub fn all_pair_categories() -> Vec<&'static Category> {
    let mut categories: Vec<_> = PAIR_CATEGORIES.values().collect();
    categories.sort_by_key(|c| c.outcomes().iter().map(label_rank).collect::<Vec<_>>());
    categories
}

/// Every three-position category, in win/lose/tie label order.
pub fn all_triple_categories() -> Vec<&'static Category> {
    let mut categories: Vec<_> = TRIPLE_CATEGORIES.values().collect();
    categories.sort_by_key(|c| c.outcomes().iter().map(label_rank).collect::<Vec<_>>());
    categories
}

fn label_rank(outcome: &Outcome) -> usize {
    Outcome::ALL.iter().position(|o| o == outcome).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn pair_table_covers_all_nine_combinations() {
        assert_eq!(PAIR_CATEGORIES.len(), 9);
        let labels: HashSet<_> = all_pair_categories().iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 9);
        assert!(labels.contains("tie-lose"));
    }

    #[test]
    fn triple_table_covers_all_twenty_seven_combinations() {
        assert_eq!(TRIPLE_CATEGORIES.len(), 27);
        let labels: HashSet<_> = all_triple_categories().iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 27);
    }

    #[test]
    fn labels_follow_position_order() {
        let c = triple_category([Outcome::Win, Outcome::Tie, Outcome::Lose]).unwrap();
        assert_eq!(c.label(), "win-tie-lose");
        assert_eq!(c.arity(), 3);
        let p = pair_category([Outcome::Lose, Outcome::Win]).unwrap();
        assert_eq!(p.to_string(), "lose-win");
    }

    #[test]
    fn kinds_summarize_outcomes() {
        assert_eq!(pair_category([Outcome::Win, Outcome::Tie]).unwrap().kind(), CategoryKind::Synergy);
        assert_eq!(pair_category([Outcome::Win, Outcome::Lose]).unwrap().kind(), CategoryKind::TradeOff);
        assert_eq!(pair_category([Outcome::Tie, Outcome::Lose]).unwrap().kind(), CategoryKind::Loss);
        assert_eq!(pair_category([Outcome::Tie, Outcome::Tie]).unwrap().kind(), CategoryKind::Neutral);
    }

    #[test]
    fn listing_starts_with_all_wins() {
        assert_eq!(all_pair_categories()[0].label(), "win-win");
        assert_eq!(all_triple_categories()[26].label(), "tie-tie-tie");
    }

    #[test]
    fn category_serializes_as_label() {
        let c = pair_category([Outcome::Win, Outcome::Lose]).unwrap();
        assert_eq!(serde_json::to_string(c).unwrap(), "\"win-lose\"");
        assert_eq!(serde_json::to_string(&CategoryKind::TradeOff).unwrap(), "\"trade_off\"");
    }
}
