//! Outcome value object: the tri-state sign of a single impact delta.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative outcome of one indicator for one entity.
///
/// Harmonized deltas are oriented so that a positive value is always an
/// improvement, which lets the sign alone decide the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum Outcome {
    Lose = -1,
    #[default]
    Tie = 0,
    Win = 1,
}

impl Outcome {
    /// All outcomes in label order (win, lose, tie).
    pub const ALL: [Outcome; 3] = [Outcome::Win, Outcome::Lose, Outcome::Tie];

    /// Maps a value to its outcome: `> 0` wins, `< 0` loses, `== 0` ties.
    ///
    /// Returns `None` for NaN, which has no sign.
    pub fn from_value(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Outcome::Win)
        } else if value < 0.0 {
            Some(Outcome::Lose)
        } else if value == 0.0 {
            Some(Outcome::Tie)
        } else {
            None
        }
    }

    /// Returns the numeric sign.
    pub fn value(&self) -> i8 {
        *self as i8
    }

    /// Returns the lowercase label used inside category strings.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Tie => "tie",
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win)
    }

    pub fn is_lose(&self) -> bool {
        matches!(self, Outcome::Lose)
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
