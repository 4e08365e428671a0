//! Two-level axis labels shared by every matrix and table in the model.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::ValidationError;

/// A `(region, item)` label for one row or column.
///
/// On industry axes `item` is the sector; on final-demand columns it is the
/// final-demand category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AxisKey {
    pub region: String,
    pub item: String,
}

impl AxisKey {
    /// Creates a new key.
    pub fn new(region: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            item: item.into(),
        }
    }
}

impl fmt::Display for AxisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.region, self.item)
    }
}

/// Ordered, duplicate-free set of axis keys with constant-time lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AxisKey>", into = "Vec<AxisKey>")]
pub struct AxisIndex {
    keys: Vec<AxisKey>,
    positions: HashMap<AxisKey, usize>,
}

impl AxisIndex {
    /// Builds an index, rejecting empty labels and duplicate keys.
    pub fn new(keys: Vec<AxisKey>) -> Result<Self, ValidationError> {
        let mut positions = HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            if key.region.trim().is_empty() {
                return Err(ValidationError::empty_field("region"));
            }
            if key.item.trim().is_empty() {
                return Err(ValidationError::empty_field("item"));
            }
            if positions.insert(key.clone(), i).is_some() {
                return Err(ValidationError::duplicate_label("axis", key.to_string()));
            }
        }
        Ok(Self { keys, positions })
    }

    /// Builds the full `regions × items` product, region-major.
    pub fn product(regions: &[&str], items: &[&str]) -> Result<Self, ValidationError> {
        let keys = regions
            .iter()
            .flat_map(|r| items.iter().map(move |i| AxisKey::new(*r, *i)))
            .collect();
        Self::new(keys)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[AxisKey] {
        &self.keys
    }

    pub fn get(&self, position: usize) -> Option<&AxisKey> {
        self.keys.get(position)
    }

    /// Position of a key, if present.
    pub fn position(&self, key: &AxisKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Position of `(region, item)`, if present.
    pub fn position_of(&self, region: &str, item: &str) -> Option<usize> {
        self.position(&AxisKey::new(region, item))
    }

    /// Distinct regions in first-seen order.
    pub fn regions(&self) -> Vec<&str> {
        first_seen(self.keys.iter().map(|k| k.region.as_str()))
    }

    /// Distinct items in first-seen order.
    pub fn items(&self) -> Vec<&str> {
        first_seen(self.keys.iter().map(|k| k.item.as_str()))
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.keys.iter().any(|k| k.region == region)
    }

    pub fn contains_item(&self, item: &str) -> bool {
        self.keys.iter().any(|k| k.item == item)
    }
}

/// Distinct labels in first-seen order.
pub(crate) fn first_seen<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    labels.filter(|l| seen.insert(*l)).collect()
}

impl TryFrom<Vec<AxisKey>> for AxisIndex {
    type Error = ValidationError;

    fn try_from(keys: Vec<AxisKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<AxisIndex> for Vec<AxisKey> {
    fn from(index: AxisIndex) -> Self {
        index.keys
    }
}
